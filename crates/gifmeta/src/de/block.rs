//! Walk the blocks following the logical screen descriptor.
//!
//! A GIF stream after the screen descriptor is a sequence of blocks, each introduced by a single
//! byte:
//!
//! - `0x21`: an extension (graphics control, application, comment, plain text, ...).
//! - `0x2C`: an image descriptor, followed by an optional local color table and the compressed
//!   image data.
//! - `0x3B`: the trailer.
//!
//! Extension and image data are stored as sub-block chains, which are skipped without being
//! decompressed.

use tracing::{debug, trace};

use crate::de::Mode;
use crate::de::duration::centiseconds_to_millis;
use crate::de::error::DecodeError;
use crate::de::frame::Frame;
use crate::de::header::{
    Dimensions, PackedFields, SCREEN_DESCRIPTOR_SIZE, SCREEN_PACKED_OFFSET, read_dimensions,
};
use crate::de::metadata::{Info, Termination};
use crate::de::parser::{Endian, Parser};

const EXTENSION: u8 = 0x21;
const IMAGE_DESCRIPTOR: u8 = 0x2C;
const TRAILER: u8 = 0x3B;

const GRAPHICS_CONTROL: u8 = 0xF9;
const APPLICATION: u8 = 0xFF;

/// The only block size a graphics control extension is parsed with.
const GRAPHICS_CONTROL_SIZE: u8 = 4;

/// Introducer, label, block size, four bytes of fields and the terminator.
const GRAPHICS_CONTROL_LENGTH: usize = 8;

/// Disposal method bits of the graphics control packed byte.
const DISPOSAL_MASK: u8 = 0b0001_1100;

/// Offset of the loop count from the start of a `NETSCAPE2.0` application extension.
///
/// The application identifier is not checked, so any other application extension has an
/// arbitrary byte reported as the loop count.
const LOOP_COUNT_OFFSET: usize = 16;

/// Image descriptor fields plus the LZW minimum code size byte.
const IMAGE_DESCRIPTOR_LENGTH: usize = 11;

/// What to do after a block has been handled.
enum Step {
    Continue,
    Trailer,
    Animated,
}

/// Represents an ongoing scan.
pub struct Scanner<'a> {
    parser: Parser<'a>,
    mode: Mode,
    cursor: usize,
    /// The frame whose graphics control extension has been read but whose image descriptor has
    /// not.
    pending: Option<Frame>,
    info: Info,
}

impl<'a> Scanner<'a> {
    /// Start a scan of data whose signature has already been validated.
    pub fn new(parser: Parser<'a>, mode: Mode) -> Self {
        Self {
            parser,
            mode,
            cursor: 0,
            pending: None,
            info: Info::default(),
        }
    }
}

impl Scanner<'_> {
    /// Scan to completion, returning everything that was collected.
    pub fn run(mut self) -> Info {
        if let Err(err) = self.read_screen_descriptor() {
            return self.fail(err);
        }

        loop {
            match self.step() {
                Ok(Step::Continue) => {}
                Ok(Step::Trailer) => return self.finish(Termination::Trailer),
                Ok(Step::Animated) => return self.finish(Termination::Animated),
                Err(err) => return self.fail(err),
            }

            if self.cursor >= self.parser.len() {
                return self.finish(Termination::EndOfStream);
            }
        }
    }

    fn finish(mut self, termination: Termination) -> Info {
        debug!(
            "scan finished at offset {}: {termination:?} ({} frames)",
            self.cursor,
            self.info.images.len()
        );
        self.info.termination = termination;
        self.info
    }

    fn fail(mut self, err: DecodeError) -> Info {
        self.info.valid = false;
        self.finish(Termination::Malformed(err))
    }

    /// Read the canvas dimensions and skip the global color table, if any.
    fn read_screen_descriptor(&mut self) -> Result<(), DecodeError> {
        let Dimensions { width, height } = read_dimensions(&self.parser)?;
        self.info.width = width;
        self.info.height = height;
        self.info.valid = true;

        let packed = PackedFields::read(&self.parser, SCREEN_PACKED_OFFSET)?;
        if packed.has_color_table() {
            self.info.global_palette = true;
            self.info.global_palette_size = packed.palette_colors();
            self.cursor += packed.palette_size();
        }

        self.cursor += SCREEN_DESCRIPTOR_SIZE;
        debug!("canvas {width}x{height}, first block at offset {}", self.cursor);
        Ok(())
    }

    fn step(&mut self) -> Result<Step, DecodeError> {
        let introducer = self.parser.read_u8(self.cursor)?;
        trace!("block {introducer:#04x} at offset {}", self.cursor);

        match introducer {
            EXTENSION => self.read_extension()?,
            IMAGE_DESCRIPTOR => return self.read_image_descriptor(),
            TRAILER => return Ok(Step::Trailer),
            _ => {
                debug!(
                    "skipping unknown block {introducer:#04x} at offset {}",
                    self.cursor
                );
                self.cursor += 1;
            }
        }

        Ok(Step::Continue)
    }

    fn read_extension(&mut self) -> Result<(), DecodeError> {
        let label = self.parser.read_u8(self.cursor + 1)?;

        match label {
            GRAPHICS_CONTROL => return self.read_graphics_control(),
            APPLICATION => {
                self.info.loop_count = self.parser.read_u8(self.cursor + LOOP_COUNT_OFFSET)?;
            }
            _ => trace!("skipping extension {label:#04x}"),
        }

        self.cursor += 2;
        self.cursor += sub_block_chain(&self.parser, self.cursor)?;
        Ok(())
    }

    fn read_graphics_control(&mut self) -> Result<(), DecodeError> {
        let size = self.parser.read_u8(self.cursor + 2)?;

        if size != GRAPHICS_CONTROL_SIZE {
            debug!(
                "skipping graphics control extension with size {size} at offset {}",
                self.cursor
            );
            self.cursor += 1;
            return Ok(());
        }

        let flags = self.parser.read_u8(self.cursor + 3)?;
        let delay = self.parser.read_u16(self.cursor + 4, Endian::Little)?;
        let delay = centiseconds_to_millis(delay);

        self.info.durations.add(delay);

        let frame = self.pending.get_or_insert_with(Frame::default);
        frame.delay = delay;
        frame.disposal = (flags & DISPOSAL_MASK) >> 2;

        self.cursor += GRAPHICS_CONTROL_LENGTH;
        Ok(())
    }

    fn read_image_descriptor(&mut self) -> Result<Step, DecodeError> {
        let left = self.parser.read_u16(self.cursor + 1, Endian::Little)?;
        let top = self.parser.read_u16(self.cursor + 3, Endian::Little)?;
        let width = self.parser.read_u16(self.cursor + 5, Endian::Little)?;
        let height = self.parser.read_u16(self.cursor + 7, Endian::Little)?;
        let packed = PackedFields::read(&self.parser, self.cursor + 9)?;

        let mut frame = self.pending.take().unwrap_or_default();
        frame.left = left;
        frame.top = top;
        frame.width = width;
        frame.height = height;
        frame.interlace = packed.is_interlaced();

        if packed.has_color_table() {
            frame.local_palette = true;
            frame.local_palette_size = packed.palette_colors();
            self.cursor += packed.palette_size();
        }

        debug!(
            "frame {}: {width}x{height} at ({left}, {top}), delay {}ms",
            self.info.images.len(),
            frame.delay
        );

        if self.info.push_frame(frame) && self.mode == Mode::Quick {
            return Ok(Step::Animated);
        }

        self.cursor += IMAGE_DESCRIPTOR_LENGTH;
        self.cursor += sub_block_chain(&self.parser, self.cursor)?;
        Ok(Step::Continue)
    }
}

/// Measure the sub-block chain starting at `offset`.
///
/// Returns the number of bytes up to and including the zero-length terminator. Only the length
/// bytes are read; the data itself is skipped.
fn sub_block_chain(parser: &Parser, offset: usize) -> Result<usize, DecodeError> {
    let mut total = 0;

    loop {
        let size = parser.read_u8(offset + total)?;
        total += usize::from(size) + 1;

        if size == 0 {
            return Ok(total);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Header and logical screen descriptor with a two-color global color table.
    const SCREEN: [u8; 19] = [
        b'G', b'I', b'F', b'8', b'9', b'a', // Signature
        0x01, 0x00, // Height
        0x01, 0x00, // Width
        0x80, // Packed (global color table, 2 colors)
        0x00, // Background color index
        0x00, // Pixel aspect ratio
        0x00, 0x00, 0x00, // Color 0
        0xFF, 0xFF, 0xFF, // Color 1
    ];

    fn graphics_control(delay: u16, disposal: u8) -> Vec<u8> {
        let [lo, hi] = delay.to_le_bytes();
        vec![0x21, 0xF9, 0x04, disposal << 2, lo, hi, 0x00, 0x00]
    }

    fn image_descriptor(packed: u8) -> Vec<u8> {
        vec![
            0x2C, // Introducer
            0x00, 0x00, // Left
            0x00, 0x00, // Top
            0x01, 0x00, // Width
            0x01, 0x00, // Height
            packed, // Packed
        ]
    }

    /// LZW minimum code size followed by a single data sub-block.
    const IMAGE_DATA: [u8; 5] = [0x02, 0x02, 0x44, 0x01, 0x00];

    fn scan(data: &[u8], mode: Mode) -> Info {
        Scanner::new(Parser::new(data), mode).run()
    }

    #[test]
    fn sub_blocks() {
        let data = [0x02, 0xAA, 0xBB, 0x01, 0xCC, 0x00, 0xFF];
        assert_eq!(sub_block_chain(&Parser::new(&data), 0), Ok(6));
        assert_eq!(sub_block_chain(&Parser::new(&data), 5), Ok(1));
    }

    #[test]
    fn sub_blocks_unterminated() {
        let data = [0x02, 0xAA, 0xBB, 0x01, 0xCC];
        assert_eq!(
            sub_block_chain(&Parser::new(&data), 0),
            Err(DecodeError::NotEnoughBytes {
                offset: 5,
                needed: 1
            })
        );
    }

    #[test]
    fn two_frames() {
        let mut data = SCREEN.to_vec();
        data.extend(graphics_control(5, 2));
        data.extend(image_descriptor(0x00));
        data.extend(IMAGE_DATA);
        data.extend(graphics_control(50, 1));
        data.extend(image_descriptor(0x00));
        data.extend(IMAGE_DATA);
        data.push(0x3B);

        let info = scan(&data, Mode::Full);

        assert!(info.valid());
        assert_eq!(info.termination(), Termination::Trailer);
        assert_eq!(info.width(), 1);
        assert_eq!(info.height(), 1);
        assert!(info.global_palette());
        assert_eq!(info.global_palette_size(), 2);
        assert!(info.animated());
        assert_eq!(info.frame_count(), 2);
        assert_eq!(info.frames()[0].delay(), 50);
        assert_eq!(info.frames()[0].disposal(), 2);
        assert_eq!(info.frames()[1].delay(), 500);
        assert_eq!(info.frames()[1].disposal(), 1);
        assert_eq!(info.duration(), 550);
        assert!(info.is_browser_duration());
        assert_eq!(info.duration_ie(), 600);
        assert_eq!(info.duration_safari(), 600);
        assert_eq!(info.duration_chrome(), 550);
        assert_eq!(info.duration_firefox(), 550);
        assert_eq!(info.duration_opera(), 550);
    }

    #[test]
    fn quick_pass_stops_at_second_frame() {
        let mut data = SCREEN.to_vec();
        data.extend(image_descriptor(0x00));
        data.extend(IMAGE_DATA);
        data.extend(image_descriptor(0x00));
        // Anything after the second descriptor is never looked at.
        data.extend([0x09, 0x09]);

        let info = scan(&data, Mode::Quick);
        assert!(info.valid());
        assert!(info.animated());
        assert_eq!(info.termination(), Termination::Animated);
        assert_eq!(info.frame_count(), 2);

        let info = scan(&data, Mode::Full);
        assert!(!info.valid());
        assert!(info.animated());
        assert_eq!(info.frame_count(), 2);
        assert!(matches!(info.termination(), Termination::Malformed(_)));
    }

    #[test]
    fn frame_without_graphics_control() {
        let mut data = SCREEN.to_vec();
        data.extend(image_descriptor(0x00));
        data.extend(IMAGE_DATA);
        data.push(0x3B);

        let info = scan(&data, Mode::Full);

        assert!(info.valid());
        assert!(!info.animated());
        assert_eq!(info.frames(), [Frame {
            width: 1,
            height: 1,
            ..Frame::default()
        }]);
        assert_eq!(info.duration(), 0);
    }

    #[test]
    fn local_palette_and_interlace() {
        let mut data = SCREEN.to_vec();
        data.extend(image_descriptor(0b1100_0001));
        data.extend([0u8; 12]); // 4 colors
        data.extend(IMAGE_DATA);
        data.push(0x3B);

        let info = scan(&data, Mode::Full);
        let frame = &info.frames()[0];

        assert_eq!(info.termination(), Termination::Trailer);
        assert!(frame.local_palette());
        assert_eq!(frame.local_palette_size(), 4);
        assert!(frame.interlace());
    }

    #[test]
    fn loop_count() {
        let mut data = SCREEN.to_vec();
        data.extend([0x21, 0xFF, 0x0B]);
        data.extend(b"NETSCAPE2.0");
        data.extend([0x03, 0x01, 0x05, 0x00, 0x00]);
        data.push(0x3B);

        let info = scan(&data, Mode::Full);

        assert_eq!(info.loop_count(), 5);
        assert_eq!(info.termination(), Termination::Trailer);
    }

    #[test]
    fn loop_count_from_other_application() {
        let mut data = SCREEN.to_vec();
        data.extend([0x21, 0xFF, 0x0B]);
        data.extend(b"XMP DataXMP");
        data.extend([0x04, b'<', b'x', b'm', b'p', 0x00]);
        data.push(0x3B);

        let info = scan(&data, Mode::Full);

        // The identifier is not checked, so whatever sits at +16 is taken as the loop count.
        assert!(info.valid());
        assert_eq!(info.loop_count(), b'x');
        assert_eq!(info.termination(), Termination::Trailer);
    }

    #[test]
    fn short_application_extension() {
        let mut data = SCREEN.to_vec();
        data.extend([0x21, 0xFF, 0x03, b'a', b'b', b'c', 0x00]);
        data.push(0x3B);

        let info = scan(&data, Mode::Full);

        assert!(!info.valid());
        assert_eq!(info.loop_count(), 0);
        assert_eq!(
            info.termination(),
            Termination::Malformed(DecodeError::NotEnoughBytes {
                offset: 35,
                needed: 9
            })
        );
    }

    #[test]
    fn repeated_graphics_control() {
        let mut data = SCREEN.to_vec();
        data.extend(graphics_control(5, 1));
        data.extend(graphics_control(50, 2));
        data.extend(image_descriptor(0x00));
        data.extend(IMAGE_DATA);
        data.push(0x3B);

        let info = scan(&data, Mode::Full);

        assert!(info.valid());
        assert_eq!(info.termination(), Termination::Trailer);
        assert_eq!(info.frame_count(), 1);
        assert!(!info.animated());
        assert_eq!(info.frames()[0].delay(), 500);
        assert_eq!(info.frames()[0].disposal(), 2);
        assert_eq!(info.duration(), 550);
        assert_eq!(info.duration_ie(), 600);
        assert!(info.is_browser_duration());
    }

    #[test]
    fn other_extensions_are_skipped() {
        let mut data = SCREEN.to_vec();
        data.extend([0x21, 0xFE, 0x03, b'h', b'e', b'y', 0x00]); // Comment
        data.extend(image_descriptor(0x00));
        data.extend(IMAGE_DATA);
        data.push(0x3B);

        let info = scan(&data, Mode::Full);

        assert!(info.valid());
        assert_eq!(info.frame_count(), 1);
        assert_eq!(info.termination(), Termination::Trailer);
    }

    #[test]
    fn unknown_bytes_are_skipped() {
        let mut data = SCREEN.to_vec();
        data.extend([0x00, 0x42]);
        data.extend(image_descriptor(0x00));
        data.extend(IMAGE_DATA);
        data.push(0x3B);

        let info = scan(&data, Mode::Full);

        assert!(info.valid());
        assert_eq!(info.frame_count(), 1);
    }

    #[test]
    fn bad_graphics_control_size() {
        let mut data = SCREEN.to_vec();
        data.extend([0x21, 0xF9, 0x05]);
        data.extend(image_descriptor(0x00));
        data.extend(IMAGE_DATA);
        data.push(0x3B);

        let info = scan(&data, Mode::Full);

        assert!(info.valid());
        assert_eq!(info.termination(), Termination::Trailer);
        assert_eq!(info.frame_count(), 1);
        assert_eq!(info.frames()[0].delay(), 0);
        assert_eq!(info.duration(), 0);
    }

    #[test]
    fn missing_trailer() {
        let mut data = SCREEN.to_vec();
        data.extend(image_descriptor(0x00));
        data.extend(IMAGE_DATA);

        let info = scan(&data, Mode::Full);

        assert!(info.valid());
        assert_eq!(info.frame_count(), 1);
        assert_eq!(info.termination(), Termination::EndOfStream);
    }

    #[test]
    fn truncated_image_data() {
        let mut data = SCREEN.to_vec();
        data.extend(graphics_control(10, 0));
        data.extend(image_descriptor(0x00));
        data.extend(IMAGE_DATA);
        data.extend(image_descriptor(0x00));
        data.extend(&IMAGE_DATA[..2]);

        let info = scan(&data, Mode::Full);

        assert!(!info.valid());
        assert_eq!(info.frame_count(), 2);
        assert_eq!(info.frames()[0].delay(), 100);
        assert!(matches!(
            info.termination(),
            Termination::Malformed(DecodeError::NotEnoughBytes { .. })
        ));
    }

    #[test]
    fn nothing_after_screen_descriptor() {
        let info = scan(&SCREEN, Mode::Full);

        assert!(!info.valid());
        assert!(info.global_palette());
        assert_eq!(
            info.termination(),
            Termination::Malformed(DecodeError::NotEnoughBytes {
                offset: 19,
                needed: 1
            })
        );
    }

    #[test]
    fn missing_packed_byte() {
        let info = scan(&SCREEN[..10], Mode::Full);

        assert!(!info.valid());
        assert_eq!(info.width(), 1);
        assert_eq!(info.height(), 1);
        assert!(!info.global_palette());
    }
}
