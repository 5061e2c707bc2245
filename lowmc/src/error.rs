//! Library-wide error and result types.
//!
//! Every fallible public function returns [`Result`]. There are no transient
//! or recoverable errors here: callers either get `Ok` or one of the
//! variants below, and none of them are swallowed.

use std::fmt;
use std::io;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the library can produce.
#[derive(Debug)]
pub enum Error {
    /// The security-level tag on the command line or in a file header was not
    /// one of the three documented spellings.
    UnknownParameter(String),
    /// The constants file could not be opened or read.
    Io(io::Error),
    /// The constants file header (blocksize/keysize/rounds) did not match the
    /// parameters the cipher was constructed with.
    HeaderMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    /// The constants file did not contain the expected number of lines.
    LineCountMismatch { expected: usize, found: usize },
    /// A line in the constants file was not `blocksize` ASCII `0`/`1` characters.
    MalformedBitLine { line: usize },
    /// A linear-layer matrix loaded from a constants file is not full rank,
    /// so it has no inverse and decrypt would silently produce garbage.
    SingularLinearLayer { round: usize },
    /// A plaintext, ciphertext or key had the wrong length for this instance.
    WrongLength {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// `encrypt`/`decrypt` was called before a private key was set.
    KeyNotSet,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownParameter(tag) => write!(f, "unknown parameter tag: {tag}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::HeaderMismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "constants file header mismatch on {field}: expected {expected}, found {found}"
            ),
            Error::LineCountMismatch { expected, found } => write!(
                f,
                "constants file has the wrong number of lines: expected {expected}, found {found}"
            ),
            Error::MalformedBitLine { line } => {
                write!(f, "malformed bit line at line {line}")
            }
            Error::SingularLinearLayer { round } => write!(
                f,
                "linear-layer matrix for round {round} is not full rank and has no inverse"
            ),
            Error::WrongLength {
                what,
                expected,
                found,
            } => write!(
                f,
                "{what} has the wrong length: expected {expected} bits, found {found}"
            ),
            Error::KeyNotSet => write!(f, "private key not set"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Error::Io(e) = self {
            Some(e)
        } else {
            None
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
