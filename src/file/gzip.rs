//! Gzip-compressed inputs, recognized by their `.gz` extension.

use std::{io::Read, path::Path};

use flate2::read::GzDecoder;
use log::debug;

use crate::{Error::FileError, Result};

/// Returns `true` if `path` names a gzip-compressed file.
pub(crate) fn is_compressed(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("gz"))
}

/// Decompresses a complete gzip stream.
///
/// # Errors
/// Returns [`crate::Error::FileError`] for a corrupt or truncated stream.
pub(crate) fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut decompressed = Vec::new();

    decoder.read_to_end(&mut decompressed).map_err(FileError)?;

    debug!(
        "Decompressed {} bytes to {} bytes",
        data.len(),
        decompressed.len()
    );
    Ok(decompressed)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::{write::GzEncoder, Compression};

    use super::*;
    use crate::Error;

    #[test]
    fn extension() {
        assert!(is_compressed(Path::new("mappings/yarn.tiny.gz")));
        assert!(is_compressed(Path::new("YARN.TINY.GZ")));
        assert!(!is_compressed(Path::new("yarn.tiny")));
        assert!(!is_compressed(Path::new("gz")));
    }

    #[test]
    fn decompress_gzip() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"tiny\t2\t0\tnamed\tofficial\n").unwrap();
        let compressed = encoder.finish().unwrap();

        let data = decompress(&compressed).unwrap();
        assert_eq!(data, b"tiny\t2\t0\tnamed\tofficial\n");
    }

    #[test]
    fn decompress_corrupt() {
        let err = decompress(b"tiny\t2\t0\tnamed\tofficial\n").unwrap_err();
        assert!(matches!(err, Error::FileError(_)));
    }
}
