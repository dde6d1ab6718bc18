use std::time::Duration;

/// Represents a single image of the stream, as described by its image descriptor and the
/// graphics control extension preceding it (if any).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Frame {
    pub(crate) local_palette: bool,
    pub(crate) local_palette_size: usize,
    pub(crate) interlace: bool,
    pub(crate) left: u16,
    pub(crate) top: u16,
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) delay: u32,
    pub(crate) disposal: u8,
}

impl Frame {
    /// Whether the frame carries its own color table.
    #[must_use]
    pub const fn local_palette(&self) -> bool {
        self.local_palette
    }

    /// Number of colors in the local color table (0 if there is none).
    #[must_use]
    pub const fn local_palette_size(&self) -> usize {
        self.local_palette_size
    }

    /// Whether the frame is stored interlaced.
    #[must_use]
    pub const fn interlace(&self) -> bool {
        self.interlace
    }

    /// Horizontal offset of the frame on the canvas, in pixels.
    #[must_use]
    pub const fn left(&self) -> u16 {
        self.left
    }

    /// Vertical offset of the frame on the canvas, in pixels.
    #[must_use]
    pub const fn top(&self) -> u16 {
        self.top
    }

    /// Width of the frame, in pixels.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height of the frame, in pixels.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// How long the frame is displayed, in milliseconds.
    #[must_use]
    pub const fn delay(&self) -> u32 {
        self.delay
    }

    /// How long the frame is displayed.
    #[must_use]
    pub const fn delay_duration(&self) -> Duration {
        Duration::from_millis(self.delay as u64)
    }

    /// The raw 3-bit disposal code (0-7).
    #[must_use]
    pub const fn disposal(&self) -> u8 {
        self.disposal
    }

    /// How the frame is cleared before the next one is drawn.
    #[must_use]
    pub fn disposal_method(&self) -> DisposalMethod {
        self.disposal.into()
    }
}

/// Indicates what a renderer does with a frame once its delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DisposalMethod {
    /// No disposal specified.
    NoAction,
    /// Leave the frame in place.
    Keep,
    /// Restore the frame's area to the background color.
    Background,
    /// Restore the frame's area to what was there before it was drawn.
    Previous,
    /// Codes 4-7 have no defined meaning.
    Reserved(u8),
}

impl From<u8> for DisposalMethod {
    fn from(value: u8) -> Self {
        match value & 0b0111 {
            0 => Self::NoAction,
            1 => Self::Keep,
            2 => Self::Background,
            3 => Self::Previous,
            code => Self::Reserved(code),
        }
    }
}

impl From<DisposalMethod> for u8 {
    fn from(value: DisposalMethod) -> Self {
        match value {
            DisposalMethod::NoAction => 0,
            DisposalMethod::Keep => 1,
            DisposalMethod::Background => 2,
            DisposalMethod::Previous => 3,
            DisposalMethod::Reserved(code) => code & 0b0111,
        }
    }
}
