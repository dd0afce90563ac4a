//! Input and output files of a merge run.
//!
//! Inputs are read through the [`Backend`] trait, which abstracts over where the bytes come
//! from. [`File`] wraps a backend and hands UTF-8 text to the codec and the auxiliary loaders.
//! Files ending in `.gz` are decompressed into memory when they are opened.
//!
//! # Key Components
//!
//! - [`File`] - An input file, from disk or from memory
//! - [`Backend`] - Trait for data sources
//! - [`Physical`] - Memory-mapped file backend for disk access
//! - [`Memory`] - In-memory buffer backend
//! - [`write_atomic`] - All-or-nothing output
//!
//! # Examples
//!
//! ```rust
//! use tinymerge::File;
//!
//! let file = File::from_mem(b"tiny\t2\t0\tnamed\tofficial\n".to_vec());
//! assert!(file.text()?.starts_with("tiny"));
//! # Ok::<(), tinymerge::Error>(())
//! ```

mod gzip;
mod memory;
mod output;
mod physical;

use std::path::{Path, PathBuf};

use crate::{error::ResultExt, Error::Encoding, Result};

pub use memory::Memory;
pub use output::write_atomic;
pub use physical::Physical;

/// Backend trait for file data sources.
pub trait Backend: Send + Sync {
    /// Returns the entire data buffer.
    fn data(&self) -> &[u8];

    /// Returns the total length of the data buffer.
    fn len(&self) -> usize;

    /// Returns `true` if the buffer holds no data.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An input file of a merge run.
pub struct File {
    path: Option<PathBuf>,
    data: Box<dyn Backend>,
}

impl File {
    /// Maps the file at `path`, or decompresses it if the name ends in `.gz`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`], wrapped with the path, if the file cannot be opened
    /// or is not a valid gzip stream.
    pub fn from_file(path: &Path) -> Result<File> {
        let physical = Physical::new(path).in_file(path)?;
        let data: Box<dyn Backend> = if gzip::is_compressed(path) {
            Box::new(Memory::new(gzip::decompress(physical.data()).in_file(path)?))
        } else {
            Box::new(physical)
        };

        Ok(File {
            path: Some(path.to_path_buf()),
            data,
        })
    }

    /// Wraps an in-memory buffer.
    #[must_use]
    pub fn from_mem(data: Vec<u8>) -> File {
        File {
            path: None,
            data: Box::new(Memory::new(data)),
        }
    }

    /// The path the file was loaded from, `None` for memory buffers.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the raw bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.data()
    }

    /// Returns the size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` for an empty file.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the contents as UTF-8 text.
    ///
    /// # Errors
    /// Returns [`crate::Error::Encoding`] if the contents are not valid UTF-8.
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(self.data()).map_err(|error| {
            Encoding(format!(
                "invalid UTF-8 at byte {}",
                error.valid_up_to()
            ))
        })
    }

    /// Runs `parse` over the text of the file and attaches the path to any error.
    ///
    /// # Errors
    /// Returns the error of `parse`, or [`crate::Error::Encoding`], wrapped with the path.
    pub fn parse_with<T, F>(&self, parse: F) -> Result<T>
    where
        F: FnOnce(&str) -> Result<T>,
    {
        let result = self.text().and_then(parse);
        match &self.path {
            Some(path) => result.in_file(path),
            None => result,
        }
    }
}

/// Loads the file at `path` and runs `parse` over its text.
///
/// The mapping is released before this returns.
///
/// # Errors
/// See [`File::from_file`] and [`File::parse_with`].
pub fn read_with<T, F>(path: &Path, parse: F) -> Result<T>
where
    F: FnOnce(&str) -> Result<T>,
{
    File::from_file(path)?.parse_with(parse)
}
