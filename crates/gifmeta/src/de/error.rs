use std::{error, fmt};

use crate::de::header::{MIN_LENGTH, SIGNATURE_SIZE};

/// Represents a read that could not be completed, or data that is not a GIF.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Attempted to read more bytes than were available.
    NotEnoughBytes {
        /// The offset the read started at.
        offset: usize,
        /// The number of bytes needed to complete the operation.
        needed: usize,
    },

    /// The data is too short to contain a GIF header.
    TooShort {
        /// The length of the data received.
        actual: usize,
    },

    /// The data does not start with the `GIF8` signature.
    InvalidSignature {
        /// The first four bytes of the data.
        actual: [u8; SIGNATURE_SIZE],
    },
}

impl error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Self::NotEnoughBytes { .. } | Self::TooShort { .. } | Self::InvalidSignature { .. } => {
                None
            }
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NotEnoughBytes { offset, needed } => {
                write!(
                    f,
                    "not enough data at offset {offset} (needed {needed} additional bytes)"
                )
            }
            Self::TooShort { actual } => {
                write!(f, "expected at least {MIN_LENGTH} bytes, got {actual}")
            }
            Self::InvalidSignature { actual } => {
                let actual = String::from_utf8_lossy(&actual).to_string();
                write!(f, "expected signature \"GIF8\", got {actual:?}")
            }
        }
    }
}
