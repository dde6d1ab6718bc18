//! Scan GIF data for metadata without decoding any pixels.

mod block;
mod duration;
mod error;
mod frame;
mod header;
mod metadata;
mod parser;

use tracing::debug;

pub use duration::{DEFAULT_DELAY, Durations};
pub use error::DecodeError;
pub use frame::{DisposalMethod, Frame};
pub use metadata::{Info, Termination};

use block::Scanner;
use parser::Parser;

/// How far a scan goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Read every block until the trailer, the end of the data, or an error.
    #[default]
    Full,
    /// Stop as soon as a second frame is found.
    Quick,
}

/// Scan `data` and collect its metadata.
///
/// This never fails: data that is not a GIF yields an [`Info`] with [`Info::valid`] set to
/// `false`, and data that ends in the middle of a block keeps whatever was collected before the
/// bad read. [`Info::termination`] tells these cases apart.
#[must_use]
pub fn scan(data: &[u8], mode: Mode) -> Info {
    let parser = Parser::new(data);

    if let Err(err) = header::validate_signature(&parser) {
        debug!("rejected {} bytes: {err}", data.len());
        return Info::rejected(err);
    }

    debug!("accepted {} bytes, scanning in {mode:?} mode", data.len());
    Scanner::new(parser, mode).run()
}
