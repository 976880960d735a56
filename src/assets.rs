//! Loading of the per-job source assets: subject image and pronunciation audio.

use std::sync::Arc;

/// Image decoding and watermark cropping.
pub mod decode;
/// Audio decode/encode through the system `ffmpeg` binary.
pub mod media;

/// Raster image in premultiplied RGBA8 form, ready for the compositor.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}
