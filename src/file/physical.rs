//! Physical file backend for memory-mapped I/O.
//!
//! The mapping is dropped as soon as the source is merged.

use super::Backend;
use crate::{Error::FileError, Result};

use memmap2::Mmap;
use std::{fs, path::Path};

/// A file backend that uses memory-mapped I/O for files on disk.
///
/// # Examples
///
/// ```rust,no_run
/// use tinymerge::file::{Backend, Physical};
///
/// let physical = Physical::new("mappings.tiny")?;
/// println!("{} bytes", physical.len());
/// # Ok::<(), tinymerge::Error>(())
/// ```
#[derive(Debug)]
pub struct Physical {
    /// Memory-mapped file data
    data: Mmap,
}

impl Physical {
    /// Create a new physical file backend by memory-mapping the specified file.
    ///
    /// # Arguments
    /// * `path` - Path to the file on disk
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or mapped.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(error) => return Err(FileError(error)),
        };

        // Read-only mapping, inputs are not modified during a run
        let mmap = match unsafe { Mmap::map(&file) } {
            Ok(mmap) => mmap,
            Err(error) => return Err(FileError(error)),
        };

        Ok(Physical { data: mmap })
    }
}

impl Backend for Physical {
    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn physical() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"c\tnet/example/Widget\ta\n").unwrap();
        temp.flush().unwrap();

        let physical = Physical::new(temp.path()).unwrap();
        assert_eq!(physical.len(), 23);
        assert_eq!(physical.data()[0], b'c');
    }

    #[test]
    fn physical_empty() {
        let temp = NamedTempFile::new().unwrap();
        let physical = Physical::new(temp.path()).unwrap();
        assert_eq!(physical.len(), 0);
    }

    #[test]
    fn physical_missing() {
        let result = Physical::new("does/not/exist.tiny");
        assert!(matches!(result, Err(FileError(_))));
    }
}
