use crate::de::error::DecodeError;

/// Byte order used when reading multi-byte integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

/// Random-access, bounds-checked view over the data being scanned.
///
/// Unlike a streaming reader, every read takes an absolute offset; the caller owns the cursor.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    data: &'a [u8],
}

impl<'a> Parser<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl Parser<'_> {
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Return the `size` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// This function returns an error if:
    ///
    /// - The range `offset..offset + size` is not entirely within the data.
    pub fn bytes(&self, offset: usize, size: usize) -> Result<&[u8], DecodeError> {
        offset
            .checked_add(size)
            .and_then(|end| self.data.get(offset..end))
            .ok_or_else(|| DecodeError::NotEnoughBytes {
                offset,
                needed: offset
                    .saturating_add(size)
                    .saturating_sub(self.data.len()),
            })
    }

    /// Read a single byte at `offset`.
    ///
    /// # Errors
    ///
    /// This function returns an error if `offset` is past the end of the data.
    pub fn read_u8(&self, offset: usize) -> Result<u8, DecodeError> {
        self.bytes(offset, 1).map(|bytes| bytes[0])
    }

    /// Read a 16-bit unsigned integer at `offset`.
    ///
    /// GIF stores every multi-byte field in little-endian order; big-endian reads are only
    /// used to compare the signature.
    ///
    /// # Errors
    ///
    /// This function returns an error if fewer than two bytes are available at `offset`.
    pub fn read_u16(&self, offset: usize, endian: Endian) -> Result<u16, DecodeError> {
        let bytes = self.bytes(offset, 2)?;
        let bytes = [bytes[0], bytes[1]];

        Ok(match endian {
            Endian::Big => u16::from_be_bytes(bytes),
            Endian::Little => u16::from_le_bytes(bytes),
        })
    }
}
