use bitflags::bitflags;

use crate::de::error::DecodeError;
use crate::de::parser::{Endian, Parser};

/// The smallest amount of data accepted as a GIF.
pub const MIN_LENGTH: usize = 10;

/// The length of the `GIF8` prefix of the signature.
pub const SIGNATURE_SIZE: usize = 4;

/// `GIF8`, read as two big-endian words. The version suffix (`7a`/`9a`) is not checked.
const SIGNATURE: [u16; 2] = [0x4749, 0x4638];

/// Offset of the logical screen descriptor's packed byte.
pub const SCREEN_PACKED_OFFSET: usize = 10;

/// The header plus the logical screen descriptor, not counting the global color table.
pub const SCREEN_DESCRIPTOR_SIZE: usize = 13;

/// Number of channels in a color table entry (red, green and blue).
const CHANNELS: usize = 3;

bitflags! {
    /// The packed byte of a logical screen descriptor or an image descriptor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PackedFields: u8 {
        /// A color table follows the descriptor.
        const COLOR_TABLE = 0b1000_0000;
        /// The image is interlaced (image descriptors only).
        const INTERLACE = 0b0100_0000;
        /// Exponent of the color table size.
        const TABLE_SIZE = 0b0000_0111;
    }
}

impl PackedFields {
    /// Read the packed byte at `offset`.
    pub fn read(parser: &Parser, offset: usize) -> Result<Self, DecodeError> {
        parser.read_u8(offset).map(Self::from_bits_retain)
    }

    #[must_use]
    pub const fn has_color_table(self) -> bool {
        self.contains(Self::COLOR_TABLE)
    }

    #[must_use]
    pub const fn is_interlaced(self) -> bool {
        self.contains(Self::INTERLACE)
    }

    /// The 3-bit size field `e`.
    #[must_use]
    pub const fn table_size_exponent(self) -> u8 {
        self.bits() & Self::TABLE_SIZE.bits()
    }

    /// Size in bytes of the color table described by this field: `3 * 2^(1 + e)`.
    #[must_use]
    pub const fn palette_size(self) -> usize {
        CHANNELS * (1 << (1 + self.table_size_exponent()))
    }

    /// Number of colors in the color table described by this field.
    #[must_use]
    pub const fn palette_colors(self) -> usize {
        self.palette_size() / CHANNELS
    }
}

/// Canvas dimensions from the logical screen descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u16,
    pub height: u16,
}

/// Check the data is long enough and starts with `GIF8`.
///
/// # Errors
///
/// This function returns an error if:
///
/// - The data is shorter than [`MIN_LENGTH`].
/// - The signature does not match.
pub fn validate_signature(parser: &Parser) -> Result<(), DecodeError> {
    if parser.len() < MIN_LENGTH {
        return Err(DecodeError::TooShort {
            actual: parser.len(),
        });
    }

    let words = [
        parser.read_u16(0, Endian::Big)?,
        parser.read_u16(2, Endian::Big)?,
    ];

    if words != SIGNATURE {
        let [a, b] = words[0].to_be_bytes();
        let [c, d] = words[1].to_be_bytes();
        return Err(DecodeError::InvalidSignature {
            actual: [a, b, c, d],
        });
    }

    Ok(())
}

/// Read the canvas dimensions.
///
/// Height is taken from offset 6 and width from offset 8. Existing consumers depend on this
/// mapping, so it is kept even though it runs opposite to the field order in the format's
/// documentation.
pub fn read_dimensions(parser: &Parser) -> Result<Dimensions, DecodeError> {
    let height = parser.read_u16(6, Endian::Little)?;
    let width = parser.read_u16(8, Endian::Little)?;
    Ok(Dimensions { width, height })
}
