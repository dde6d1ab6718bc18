//! Read the structure of GIF images (canvas size, frames, timing, looping) without decoding
//! them.
//!
//! ```
//! let data = [
//!     b'G', b'I', b'F', b'8', b'9', b'a', 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x3B,
//! ];
//! let info = gifmeta::info(&data);
//!
//! assert!(info.valid());
//! assert_eq!(info.frame_count(), 0);
//! assert!(!gifmeta::is_animated(&data));
//! ```

#![warn(
    missing_docs,
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

pub mod de;

use crate::de::{Info, Mode};

/// Check whether `data` is a GIF with more than one frame.
///
/// The scan stops as soon as the second frame is found.
#[must_use]
pub fn is_animated(data: &[u8]) -> bool {
    de::scan(data, Mode::Quick).animated()
}

/// Collect the metadata of every block in `data`.
#[must_use]
pub fn info(data: &[u8]) -> Info {
    de::scan(data, Mode::Full)
}
