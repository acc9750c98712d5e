//! Generator for lazily bound OpenGL dispatch code.
//!
//! Reads an XML description of the GL API (functions, enums, and the version
//! or extension each one belongs to) and produces:
//! - a header with one function pointer typedef per function name, one
//!   dispatch pointer per set of synonymous functions, a `#define` routing
//!   every synonym to its dispatch pointer, and the enum/extension constants;
//! - a source file with one stub per dispatch pointer. On first call a stub
//!   picks the best available synonym (core version first, then extensions),
//!   stores the resolved entry point in the dispatch pointer and forwards the
//!   call through it.

pub mod config;
pub mod emitter;
pub mod error;
pub mod ir;
pub mod output;
pub mod source;

use std::path::Path;

use tracing::info;

pub use config::GeneratorConfig;
pub use emitter::{generate, generate_from_path, load_api, GeneratedCode};
pub use error::{GenError, Result};
pub use output::write_outputs;

/// Full run: read the declarations at `input` and write the generated source
/// and header. Nothing is written unless generation succeeds.
pub fn run(input: &Path, source_out: &Path, header_out: &Path) -> Result<()> {
    let config = GeneratorConfig::default();
    let code = generate_from_path(input, &config)?;
    write_outputs(&code, source_out, header_out)?;
    info!(
        input = %input.display(),
        source = %source_out.display(),
        header = %header_out.display(),
        "Dispatch code regenerated."
    );
    Ok(())
}
