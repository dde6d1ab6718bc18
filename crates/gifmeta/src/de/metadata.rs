use crate::de::duration::Durations;
use crate::de::error::DecodeError;
use crate::de::frame::Frame;

/// Describes why a scan stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Termination {
    /// The header was rejected; nothing was scanned.
    Rejected(DecodeError),
    /// The trailer block was reached.
    Trailer,
    /// The data ended without a trailer block.
    #[default]
    EndOfStream,
    /// A quick pass stopped as soon as a second frame was found.
    Animated,
    /// A block ran past the end of the data.
    Malformed(DecodeError),
}

impl Termination {
    /// The error that ended the scan, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&DecodeError> {
        match self {
            Self::Rejected(err) | Self::Malformed(err) => Some(err),
            Self::Trailer | Self::EndOfStream | Self::Animated => None,
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Termination {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Rejected(err) => serializer.collect_str(&format_args!("rejected: {err}")),
            Self::Trailer => serializer.serialize_str("trailer"),
            Self::EndOfStream => serializer.serialize_str("end of stream"),
            Self::Animated => serializer.serialize_str("animated"),
            Self::Malformed(err) => serializer.collect_str(&format_args!("malformed: {err}")),
        }
    }
}

/// Represents everything learned about a GIF without decoding its pixels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Info {
    pub(crate) valid: bool,
    pub(crate) global_palette: bool,
    pub(crate) global_palette_size: usize,
    pub(crate) loop_count: u8,
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) animated: bool,
    pub(crate) images: Vec<Frame>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub(crate) durations: Durations,
    pub(crate) termination: Termination,
}

impl Info {
    /// Build the record returned for data that failed header validation.
    pub(crate) fn rejected(err: DecodeError) -> Self {
        Self {
            termination: Termination::Rejected(err),
            ..Self::default()
        }
    }

    /// Append a sealed frame, returning `true` if this made the stream animated.
    pub(crate) fn push_frame(&mut self, frame: Frame) -> bool {
        self.images.push(frame);

        if self.images.len() > 1 && !self.animated {
            self.animated = true;
            return true;
        }

        false
    }

    /// Whether the data looked like a GIF and every block read stayed in bounds.
    #[must_use]
    pub const fn valid(&self) -> bool {
        self.valid
    }

    /// Whether a global color table is present.
    #[must_use]
    pub const fn global_palette(&self) -> bool {
        self.global_palette
    }

    /// Number of colors in the global color table (0 if there is none).
    #[must_use]
    pub const fn global_palette_size(&self) -> usize {
        self.global_palette_size
    }

    /// Loop count from the application extension (0 if absent or looping forever).
    #[must_use]
    pub const fn loop_count(&self) -> u8 {
        self.loop_count
    }

    /// Canvas width, in pixels.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Canvas height, in pixels.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Whether more than one frame was found.
    #[must_use]
    pub const fn animated(&self) -> bool {
        self.animated
    }

    /// Frames in stream order.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.images
    }

    /// Number of frames found.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.images.len()
    }

    /// Frame delay totals, raw and per renderer.
    #[must_use]
    pub const fn durations(&self) -> &Durations {
        &self.durations
    }

    /// Whether any frame delay is below 60 ms.
    #[must_use]
    pub const fn is_browser_duration(&self) -> bool {
        self.durations.is_browser_duration()
    }

    /// Sum of every frame delay as encoded, in milliseconds.
    #[must_use]
    pub const fn duration(&self) -> u64 {
        self.durations.duration()
    }

    /// Total as played by Internet Explorer, in milliseconds.
    #[must_use]
    pub const fn duration_ie(&self) -> u64 {
        self.durations.ie()
    }

    /// Total as played by Safari, in milliseconds.
    #[must_use]
    pub const fn duration_safari(&self) -> u64 {
        self.durations.safari()
    }

    /// Total as played by Chrome, in milliseconds.
    #[must_use]
    pub const fn duration_chrome(&self) -> u64 {
        self.durations.chrome()
    }

    /// Total as played by Firefox, in milliseconds.
    #[must_use]
    pub const fn duration_firefox(&self) -> u64 {
        self.durations.firefox()
    }

    /// Total as played by Opera, in milliseconds.
    #[must_use]
    pub const fn duration_opera(&self) -> u64 {
        self.durations.opera()
    }

    /// Why the scan stopped.
    #[must_use]
    pub const fn termination(&self) -> Termination {
        self.termination
    }
}
