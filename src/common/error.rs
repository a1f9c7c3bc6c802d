//! Host-side error definitions.
//!
//! The simulation proper has no recoverable runtime errors: undefined
//! opcodes retire silently and every memory address is masked to the
//! 16-bit SRAM space. What can fail is the host surface around the
//! core, and those failures are fatal.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// A fatal host error: file I/O or a malformed input.
#[derive(Debug)]
pub enum SimError {
    /// Reading or writing a host file failed.
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A program-image line is not an 8-digit hex word.
    ImageParse {
        /// Image file.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// The program image has more words than the SRAM can hold.
    ImageTooLarge {
        /// Image file.
        path: PathBuf,
    },
    /// The configuration file did not parse.
    Config {
        /// Configuration file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Io { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
            SimError::ImageParse { path, line, token } => {
                write!(
                    f,
                    "{}:{}: invalid hex word '{}'",
                    path.display(),
                    line,
                    token
                )
            }
            SimError::ImageTooLarge { path } => {
                write!(f, "{}: image exceeds 65536 words", path.display())
            }
            SimError::Config { path, message } => {
                write!(f, "{}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
