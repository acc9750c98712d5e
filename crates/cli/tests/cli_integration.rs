//! Runs the `gldispatch` binary against fixture declarations.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const API_XML: &str = r#"<?xml version="1.0"?>
<OpenGLAPI>
  <category name="1.5">
    <function name="MapBuffer">
      <param name="target" type="GLenum"/>
      <param name="access" type="GLenum"/>
      <return type="GLvoid *"/>
    </function>
  </category>
  <category name="GL_ARB_vertex_buffer_object">
    <function name="MapBufferARB" alias="MapBuffer">
      <param name="target" type="GLenum"/>
      <param name="access" type="GLenum"/>
      <return type="GLvoid *"/>
    </function>
    <enum name="READ_ONLY_ARB" value="0x88B8"/>
  </category>
</OpenGLAPI>
"#;

fn gldispatch(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gldispatch"))
        .args(args)
        .env_remove("GLDISPATCH_LOG")
        .output()
        .expect("failed to spawn gldispatch")
}

#[test]
fn test_generates_both_files() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("gl_API.xml");
    let source = dir.path().join("generated_dispatch.c");
    let header = dir.path().join("generated_dispatch.h");
    fs::write(&input, API_XML).unwrap();

    let output = gldispatch(&[&input, &source, &header]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let source = fs::read_to_string(source).unwrap();
    let header = fs::read_to_string(header).unwrap();
    assert!(source.contains("static GLvoid * stub_glMapBuffer(GLenum target, GLenum access)\n"));
    assert!(source.contains("\telse if (__check_extension(\"GL_ARB_vertex_buffer_object\"))\n"));
    assert!(header.contains("#define glMapBufferARB __piglit_dispatch_glMapBuffer\n"));
    assert!(header.contains("#define GL_READ_ONLY_ARB 0x88B8\n"));
    assert!(header.ends_with("\n#define GL_ARB_vertex_buffer_object\n"));
}

#[test]
fn test_regeneration_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("gl_API.xml");
    fs::write(&input, API_XML).unwrap();

    let mut runs = Vec::new();
    for round in 0..2 {
        let source = dir.path().join(format!("dispatch{round}.c"));
        let header = dir.path().join(format!("dispatch{round}.h"));
        assert!(gldispatch(&[&input, &source, &header]).status.success());
        runs.push((fs::read(source).unwrap(), fs::read(header).unwrap()));
    }
    assert_eq!(runs[0], runs[1]);
}

#[test]
fn test_unexpected_element_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("gl_API.xml");
    let source = dir.path().join("out.c");
    let header = dir.path().join("out.h");
    fs::write(
        &input,
        r#"<OpenGLAPI><category name="1.0"><typedef name="GLint"/></category></OpenGLAPI>"#,
    )
    .unwrap();

    let output = gldispatch(&[&input, &source, &header]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unexpected <typedef> inside <category>"), "{stderr}");
    assert!(!source.exists());
    assert!(!header.exists());
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("absent.xml");
    let output = gldispatch(&[&input, &dir.path().join("a.c"), &dir.path().join("a.h")]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("absent.xml"));
}

#[test]
fn test_wrong_argument_count_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let output = gldispatch(&[&dir.path().join("gl_API.xml")]);
    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());
}
