use std::{io::Write, path::Path};

use tempfile::NamedTempFile;

use crate::{error::ResultExt, Error::FileError, Result};

/// Replaces `target` with `bytes`, or leaves it untouched on failure.
///
/// The bytes are written to a temporary file in the target's directory, which is then renamed
/// over the target. A reader never observes a partially written table.
///
/// # Errors
/// Returns [`crate::Error::FileError`], wrapped with the target path, if the temporary file
/// cannot be created, written or persisted.
pub fn write_atomic(target: &Path, bytes: &[u8]) -> Result<()> {
    let directory = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(directory)
        .map_err(FileError)
        .in_file(target)?;
    temp.write_all(bytes).map_err(FileError).in_file(target)?;
    temp.flush().map_err(FileError).in_file(target)?;
    temp.persist(target)
        .map_err(|error| FileError(error.error))
        .in_file(target)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.tiny");
        std::fs::write(&target, "old").unwrap();

        write_atomic(&target, b"new contents").unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new contents");

        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nope").join("out.tiny");

        let err = write_atomic(&target, b"x").unwrap_err();
        assert!(matches!(err.root(), crate::Error::FileError(_)));
        assert!(!target.exists());
    }
}
