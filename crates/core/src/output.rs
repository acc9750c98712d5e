//! All-or-nothing writing of the generated files.
//!
//! Each text goes to a temporary file next to its destination. Only when
//! both temporaries are fully written are they renamed into place, so a
//! failed run never leaves a truncated file behind.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::emitter::GeneratedCode;
use crate::error::{GenError, Result};

/// Write `code.source` to `source_path` and `code.header` to `header_path`.
pub fn write_outputs(code: &GeneratedCode, source_path: &Path, header_path: &Path) -> Result<()> {
    let source = stage(source_path, &code.source)?;
    let header = stage(header_path, &code.header)?;

    persist(source, source_path)?;
    persist(header, header_path)?;

    debug!(
        source = %source_path.display(),
        header = %header_path.display(),
        "Wrote generated files."
    );
    Ok(())
}

fn stage(destination: &Path, contents: &str) -> Result<NamedTempFile> {
    let dir = destination
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir).map_err(|err| GenError::io(dir, err))?;
    file.write_all(contents.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|err| GenError::io(file.path(), err))?;
    Ok(file)
}

fn persist(file: NamedTempFile, destination: &Path) -> Result<()> {
    file.persist(destination)
        .map(drop)
        .map_err(|err| GenError::io(destination, err.error))
}
