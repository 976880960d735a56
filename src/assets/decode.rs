use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::{
    assets::PreparedImage,
    foundation::error::{WordreelError, WordreelResult},
    foundation::math::premultiply_rgba8_in_place,
};

/// Share of each edge assumed to be covered by the image provider's watermark border.
pub const WATERMARK_BORDER_FRACTION: f64 = 0.1;

/// Read an image file and return its watermark-free center, premultiplied.
pub fn load_subject_image(path: &Path) -> WordreelResult<PreparedImage> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read image '{}'", path.display()))
        .map_err(|e| WordreelError::input(format!("{e:#}")))?;
    decode_cropped_image(&bytes)
}

/// Decode encoded image bytes, crop the watermark border and convert to premultiplied RGBA8.
pub fn decode_cropped_image(bytes: &[u8]) -> WordreelResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| WordreelError::input(format!("decode image: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let cropped = crop_watermark(&rgba, WATERMARK_BORDER_FRACTION)?;
    let (width, height) = cropped.dimensions();

    let mut rgba8_premul = cropped.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Cut `fraction` of the width/height off every edge.
pub fn crop_watermark(img: &image::RgbaImage, fraction: f64) -> WordreelResult<image::RgbaImage> {
    if !(0.0..0.5).contains(&fraction) {
        return Err(WordreelError::validation(
            "watermark border fraction must be in [0, 0.5)",
        ));
    }
    let (w, h) = img.dimensions();
    let x = (f64::from(w) * fraction) as u32;
    let y = (f64::from(h) * fraction) as u32;
    let new_w = (f64::from(w) * (1.0 - 2.0 * fraction)) as u32;
    let new_h = (f64::from(h) * (1.0 - 2.0 * fraction)) as u32;
    if new_w == 0 || new_h == 0 {
        return Err(WordreelError::input(format!(
            "image {w}x{h} is too small to crop its watermark border"
        )));
    }
    Ok(image::imageops::crop_imm(img, x, y, new_w, new_h).to_image())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
