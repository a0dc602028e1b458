//! Keystore file copies.

use std::path::Path;

use tracing::debug;

use crate::error::{KeyshellError, Result};

/// Copy `from` to `to` byte for byte, replacing `to` if it exists.
///
/// Copying a file onto itself is refused: the destination is truncated
/// before it is read, which would empty the keystore.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    let copy_error = |source: std::io::Error| KeyshellError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };
    if same_file(from, to) {
        return Err(copy_error(std::io::Error::other(
            "source and destination are the same file",
        )));
    }
    let bytes = std::fs::copy(from, to).map_err(copy_error)?;
    debug!("copied {} bytes from {} to {}", bytes, from.display(), to.display());
    Ok(())
}

/// True when both paths exist and resolve to the same file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_missing_source_keeps_paths() {
        let err = copy_file(Path::new("/nonexistent/a.jks"), Path::new("b.jks")).unwrap_err();
        match err {
            KeyshellError::Copy { from, to, source } => {
                assert_eq!(from, Path::new("/nonexistent/a.jks"));
                assert_eq!(to, Path::new("b.jks"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_copy_onto_itself_keeps_contents() {
        let dir = std::env::temp_dir().join(format!("keyshell_same_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let store = dir.join("_store.jks");
        std::fs::write(&store, b"keystore bytes").unwrap();
        let via_dot = dir.join(".").join("_store.jks");

        let err = copy_file(&store, &via_dot).unwrap_err();
        assert!(matches!(err, KeyshellError::Copy { .. }));
        assert_eq!(std::fs::read(&store).unwrap(), b"keystore bytes");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
