use std::path::{Path, PathBuf};

use thiserror::Error;

macro_rules! structural_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::StructuralViolation($msg.to_string())
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::StructuralViolation(format!($fmt, $($arg)*))
    };
}

macro_rules! auxiliary_error {
    ($msg:expr) => {
        crate::Error::InvalidAuxiliary($msg.to_string())
    };

    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidAuxiliary(format!($fmt, $($arg)*))
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every variant is fatal for the merge run that produced it.
///
/// # Error Categories
///
/// ## Table format errors
/// - [`Error::TruncatedFile`] - Input ended where a header was expected
/// - [`Error::UnsupportedVersion`] - Header magic, major version or namespace count rejected
/// - [`Error::MalformedEscape`] - Bad escape sequence while `escaped-names` is active
/// - [`Error::StructuralViolation`] - A record broke the nesting or field-count contract
/// - [`Error::UnsupportedFeature`] - The file uses a part of the format this crate refuses
///
/// ## Merge errors
/// - [`Error::DuplicateDeclaration`] - The same symbol was declared twice by one source
/// - [`Error::UnresolvedMemberIndex`] - No numeric member index could be found for a method
/// - [`Error::IncompleteMapping`] - A symbol is still missing a namespace at write time
/// - [`Error::ParameterMismatch`] - Auxiliary parameter names disagree with the descriptor
///
/// ## Context
/// - [`Error::InFile`], [`Error::AtLine`], [`Error::InSymbol`] wrap another error with the
///   location it was raised at. Use [`Error::root`] to get at the underlying cause.
///
/// # Examples
///
/// ```rust
/// use tinymerge::{tiny::TinyFile, Error};
///
/// let err = TinyFile::parse("tiny\t1\t0\tnamed\tofficial\n").unwrap_err();
/// assert!(matches!(err.root(), Error::UnsupportedVersion(_)));
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The input ended before the table header could be read.
    #[error("File is truncated, expected a table header")]
    TruncatedFile,

    /// The header does not announce a supported table format.
    ///
    /// Raised for a wrong magic, a major version other than 2, or a namespace list that does not
    /// contain at least the primary namespace plus one more.
    #[error("Unsupported table format - {0}")]
    UnsupportedVersion(String),

    /// An escaped name contained an incomplete or unknown escape sequence.
    #[error("Malformed escape sequence - {0}")]
    MalformedEscape(String),

    /// A record violated the nesting or field-count rules of the table format.
    #[error("Structural violation - {0}")]
    StructuralViolation(String),

    /// The same class or member was declared twice by one source, or two sources disagree on
    /// the value of the same namespace slot.
    #[error("Duplicate declaration - {0}")]
    DuplicateDeclaration(String),

    /// A method has no resolvable member index, so its parameters cannot be named.
    #[error("Unresolved member index - {0}")]
    UnresolvedMemberIndex(String),

    /// A symbol reached the writer without a value for every namespace.
    #[error("Incomplete mapping - {0}")]
    IncompleteMapping(String),

    /// The input uses a format feature which is not supported (local variable names).
    #[error("Unsupported feature - {0}")]
    UnsupportedFeature(String),

    /// A field or method descriptor did not follow the descriptor grammar.
    #[error("Invalid descriptor - {0}")]
    InvalidDescriptor(String),

    /// A line of an auxiliary side file (static methods, constructors, parameter names) was
    /// malformed or conflicting.
    #[error("Invalid auxiliary data - {0}")]
    InvalidAuxiliary(String),

    /// The auxiliary parameter names for a method do not line up with its descriptor.
    #[error("Parameter mismatch - {0}")]
    ParameterMismatch(String),

    /// The input was not valid UTF-8.
    #[error("Invalid encoding - {0}")]
    Encoding(String),

    /// The run was cancelled before the output was written.
    #[error("Merge cancelled")]
    Cancelled,

    /// File I/O error.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Wraps an error raised while processing the file at `path`.
    #[error("{}: {source}", path.display())]
    InFile {
        /// The file being processed
        path: PathBuf,
        /// The underlying error
        source: Box<Error>,
    },

    /// Wraps an error raised on a specific line (1-based) of a table or side file.
    #[error("line {line}: {source}")]
    AtLine {
        /// The offending line
        line: usize,
        /// The underlying error
        source: Box<Error>,
    },

    /// Wraps an error raised while handling a class, method or field.
    #[error("{symbol}: {source}")]
    InSymbol {
        /// Identity of the symbol, e.g. `net/example/Foo#bar(I)V`
        symbol: String,
        /// The underlying error
        source: Box<Error>,
    },
}

impl Error {
    /// Returns the innermost error, skipping every context wrapper.
    #[must_use]
    pub fn root(&self) -> &Error {
        match self {
            Error::InFile { source, .. }
            | Error::AtLine { source, .. }
            | Error::InSymbol { source, .. } => source.root(),
            other => other,
        }
    }

    /// Wraps this error with the file it was raised for.
    #[must_use]
    pub fn in_file(self, path: &Path) -> Error {
        Error::InFile {
            path: path.to_path_buf(),
            source: Box::new(self),
        }
    }

    /// Wraps this error with the (1-based) line it was raised on.
    #[must_use]
    pub fn at_line(self, line: usize) -> Error {
        Error::AtLine {
            line,
            source: Box::new(self),
        }
    }

    /// Wraps this error with the identity of the symbol being processed.
    #[must_use]
    pub fn in_symbol(self, symbol: impl Into<String>) -> Error {
        Error::InSymbol {
            symbol: symbol.into(),
            source: Box::new(self),
        }
    }
}

/// Attaches location context to the error side of a [`crate::Result`].
pub(crate) trait ResultExt<T> {
    fn in_file(self, path: &Path) -> crate::Result<T>;

    fn at_line(self, line: usize) -> crate::Result<T>;

    fn in_symbol<F, S>(self, symbol: F) -> crate::Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> ResultExt<T> for crate::Result<T> {
    fn in_file(self, path: &Path) -> crate::Result<T> {
        self.map_err(|e| e.in_file(path))
    }

    fn at_line(self, line: usize) -> crate::Result<T> {
        self.map_err(|e| e.at_line(line))
    }

    fn in_symbol<F, S>(self, symbol: F) -> crate::Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| e.in_symbol(symbol()))
    }
}
