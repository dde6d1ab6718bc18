use std::sync::Once;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, Rgba, RgbaImage};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests (only runs once even if called multiple times)
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive("gifmeta=debug".parse().unwrap()),
            )
            .with_test_writer()
            .init();
    });
}

/// Encode a square GIF with one frame per delay (in milliseconds).
pub fn encode_gif(size: u32, delays: &[u32], repeat: Option<Repeat>) -> Vec<u8> {
    let frames = delays.iter().enumerate().map(|(i, &delay)| {
        let shade = u8::try_from(i * 40 % 256).unwrap();
        let buffer = RgbaImage::from_pixel(size, size, Rgba([shade, 0, 255 - shade, 255]));
        Frame::from_parts(buffer, 0, 0, Delay::from_numer_denom_ms(delay, 1))
    });

    let mut data = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut data);
        if let Some(repeat) = repeat {
            encoder.set_repeat(repeat).unwrap();
        }
        encoder.encode_frames(frames).unwrap();
    }

    data
}
