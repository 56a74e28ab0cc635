use thiserror::Error;

/// Conditions reported by the checksum operations and the hex text helpers.
///
/// None of them are fatal; the caller decides whether to re-prompt or abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input does not have the length the layout requires. Nothing was mutated.
    #[error("expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    /// A token of hex text could not be read as a byte.
    #[error("invalid hex byte {token:?}")]
    InvalidHexByte { token: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn check_len(expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::LengthMismatch { expected, actual })
        }
    }
}

impl From<Error> for std::io::Error {
    fn from(value: Error) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidData, value)
    }
}
