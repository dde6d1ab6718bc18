//! Animation length as different renderers play it back.
//!
//! Browsers refuse to honor very short frame delays and substitute their own default instead.
//! <http://nullsleep.tumblr.com/post/16524517190/animated-gif-minimum-frame-delay-browser-compatibility>

/// Delay substituted for frames below a renderer's threshold, in milliseconds.
pub const DEFAULT_DELAY: u32 = 100;

/// Delays below this are clamped by Internet Explorer and Safari.
const SLOW_THRESHOLD: u32 = 60;

/// Delays below this are clamped by Chrome, Firefox and Opera.
const FAST_THRESHOLD: u32 = 20;

/// Convert a graphics control delay (hundredths of a second) to milliseconds.
pub fn centiseconds_to_millis(delay: u16) -> u32 {
    u32::from(delay) * 10
}

const fn normalize(delay: u32, threshold: u32) -> u64 {
    if delay < threshold {
        DEFAULT_DELAY as u64
    } else {
        delay as u64
    }
}

/// Running totals of every frame delay seen, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Durations {
    pub(crate) is_browser_duration: bool,
    pub(crate) duration: u64,
    #[cfg_attr(feature = "serde", serde(rename = "durationIE"))]
    pub(crate) ie: u64,
    #[cfg_attr(feature = "serde", serde(rename = "durationSafari"))]
    pub(crate) safari: u64,
    #[cfg_attr(feature = "serde", serde(rename = "durationChrome"))]
    pub(crate) chrome: u64,
    #[cfg_attr(feature = "serde", serde(rename = "durationFirefox"))]
    pub(crate) firefox: u64,
    #[cfg_attr(feature = "serde", serde(rename = "durationOpera"))]
    pub(crate) opera: u64,
}

impl Durations {
    /// Account for one frame delay, in milliseconds.
    pub fn add(&mut self, delay: u32) {
        if delay < SLOW_THRESHOLD {
            self.is_browser_duration = true;
        }

        self.duration += u64::from(delay);
        self.ie += normalize(delay, SLOW_THRESHOLD);
        self.safari += normalize(delay, SLOW_THRESHOLD);
        self.chrome += normalize(delay, FAST_THRESHOLD);
        self.firefox += normalize(delay, FAST_THRESHOLD);
        self.opera += normalize(delay, FAST_THRESHOLD);
    }

    /// Whether any frame is short enough for at least one renderer to substitute its default.
    #[must_use]
    pub const fn is_browser_duration(&self) -> bool {
        self.is_browser_duration
    }

    /// The sum of the delays as encoded.
    #[must_use]
    pub const fn duration(&self) -> u64 {
        self.duration
    }

    /// Total as played by Internet Explorer.
    #[must_use]
    pub const fn ie(&self) -> u64 {
        self.ie
    }

    /// Total as played by Safari.
    #[must_use]
    pub const fn safari(&self) -> u64 {
        self.safari
    }

    /// Total as played by Chrome.
    #[must_use]
    pub const fn chrome(&self) -> u64 {
        self.chrome
    }

    /// Total as played by Firefox.
    #[must_use]
    pub const fn firefox(&self) -> u64 {
        self.firefox
    }

    /// Total as played by Opera.
    #[must_use]
    pub const fn opera(&self) -> u64 {
        self.opera
    }
}
