use std::path::Path;

use anyhow::Context;

use crate::foundation::{
    core::Canvas,
    error::{WordreelError, WordreelResult},
    math::mul_div255_u16,
};

/// Pixel canvas for one frame, premultiplied RGBA8.
pub struct RenderSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for RenderSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl RenderSurface {
    pub fn new(canvas: Canvas) -> WordreelResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| WordreelError::compositing("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| WordreelError::compositing("surface height exceeds u16"))?;
        Ok(Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    pub(crate) fn width_u16(&self) -> u16 {
        self.width
    }

    pub(crate) fn height_u16(&self) -> u16 {
        self.height
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut vello_cpu::Pixmap {
        &mut self.pixmap
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Straight RGBA8 pixel at `(x, y)` after flattening over opaque `bg`.
    pub fn pixel_over(&self, x: u32, y: u32, bg: [u8; 3]) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let src = &self.data()[idx..idx + 4];
        let mut out = [0u8; 4];
        flatten_premul_over_bg_to_opaque_rgba8(&mut out, src, bg).ok()?;
        Some(out)
    }

    /// Fill every pixel with one premultiplied color.
    pub fn clear(&mut self, rgba_premul: [u8; 4]) {
        for px in self.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&rgba_premul);
        }
    }

    /// Flatten over `bg` and write a PNG.
    pub fn save_png(&self, path: &Path, bg: [u8; 3]) -> WordreelResult<()> {
        let mut rgba = vec![0u8; self.data().len()];
        flatten_premul_over_bg_to_opaque_rgba8(&mut rgba, self.data(), bg)?;
        image::save_buffer_with_format(
            path,
            &rgba,
            self.width(),
            self.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

pub(crate) fn flatten_premul_over_bg_to_opaque_rgba8(
    dst: &mut [u8],
    src_premul: &[u8],
    bg_rgb: [u8; 3],
) -> WordreelResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(WordreelError::compositing(
            "flatten expects equal-length rgba8 buffers",
        ));
    }

    let [bg_r, bg_g, bg_b] = bg_rgb.map(u16::from);
    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        d[0] = (u16::from(s[0]) + mul_div255_u16(bg_r, inv)).min(255) as u8;
        d[1] = (u16::from(s[1]) + mul_div255_u16(bg_g, inv)).min(255) as u8;
        d[2] = (u16::from(s[2]) + mul_div255_u16(bg_b, inv)).min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
