//! Artifact writing for generated functions.

use crate::error::{CodegenError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Create or truncate `output_path` with the generated function text
///
/// Missing parent directories are created. Returns the number of bytes written.
pub fn write_function(output_path: &Path, code: &str) -> Result<usize> {
    let write_failed = |source| CodegenError::WriteFailed {
        path: output_path.to_path_buf(),
        source,
    };

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating output directory {}", parent.display());
            fs::create_dir_all(parent).map_err(write_failed)?;
        }
    }

    fs::write(output_path, code).map_err(write_failed)?;

    debug!("Wrote {} bytes to {}", code.len(), output_path.display());
    Ok(code.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("generated").join("fn.m");

        let code = "function x = f()\nend\n";
        let bytes = write_function(&output_path, code).unwrap();

        assert_eq!(bytes, code.len());
        assert_eq!(fs::read_to_string(&output_path).unwrap(), code);
    }

    #[test]
    fn test_write_truncates_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("fn.m");
        fs::write(&output_path, "a much longer previous artifact body").unwrap();

        write_function(&output_path, "short").unwrap();

        assert_eq!(fs::read_to_string(&output_path).unwrap(), "short");
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not_a_dir");
        fs::write(&blocker, "").unwrap();
        let output_path = blocker.join("fn.m");

        match write_function(&output_path, "x") {
            Err(CodegenError::WriteFailed { path, .. }) => assert_eq!(path, output_path),
            other => panic!("expected WriteFailed, got {other:?}"),
        }
    }
}
