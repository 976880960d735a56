//! Glue between the crate's geometry/text types and `vello_cpu`.

use std::sync::Arc;

use kurbo::Shape;

use crate::{
    foundation::core::{Affine, BezPath, Point, RoundedRect},
    foundation::error::{WordreelError, WordreelResult},
    render::blur::blur_mask,
    text::layout::PreparedText,
};

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

pub(crate) fn rounded_rect_path(rr: RoundedRect) -> vello_cpu::kurbo::BezPath {
    bezpath_to_cpu(&rr.to_path(0.1))
}

pub(crate) fn solid(rgb: [u8; 3]) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(rgb[0], rgb[1], rgb[2], 255)
}

/// Wrap premultiplied RGBA8 bytes as an image paint.
pub(crate) fn premul_image(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> WordreelResult<vello_cpu::Image> {
    let w: u16 = width
        .try_into()
        .map_err(|_| WordreelError::compositing("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| WordreelError::compositing("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(WordreelError::compositing("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let pixels = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect::<Vec<_>>();

    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

/// Opaque left-to-right gradient of `width x height`.
pub(crate) fn horizontal_gradient(
    start: [u8; 3],
    end: [u8; 3],
    width: u32,
    height: u32,
) -> WordreelResult<vello_cpu::Image> {
    let w1 = (width.max(1) - 1) as f32;
    let row: Vec<[u8; 4]> = (0..width)
        .map(|x| {
            let t = if w1 <= 0.0 { 0.0 } else { (x as f32) / w1 };
            let lerp = |a: u8, b: u8| -> u8 {
                let (af, bf) = (f32::from(a), f32::from(b));
                (af + (bf - af) * t).round().clamp(0.0, 255.0) as u8
            };
            [
                lerp(start[0], end[0]),
                lerp(start[1], end[1]),
                lerp(start[2], end[2]),
                255,
            ]
        })
        .collect();

    let mut bytes = Vec::with_capacity((width as usize) * (height as usize) * 4);
    for _ in 0..height {
        for px in &row {
            bytes.extend_from_slice(px);
        }
    }
    premul_image(&bytes, width, height)
}

/// Blurred black silhouette of a rounded rect.
pub(crate) struct SoftShadow {
    pub image: vello_cpu::Image,
    /// Transparent margin around the rect inside `image`.
    pub pad: f64,
    pub width: f64,
    pub height: f64,
}

pub(crate) fn soft_shadow(
    width: f64,
    height: f64,
    radius: f64,
    sigma: f32,
    alpha: u8,
) -> WordreelResult<SoftShadow> {
    let pad = (f64::from(sigma) * 3.0).ceil();
    let img_w = (width + 2.0 * pad).ceil() as u32;
    let img_h = (height + 2.0 * pad).ceil() as u32;

    let rr = RoundedRect::new(pad, pad, pad + width, pad + height, radius);
    let mut mask = vec![0u8; (img_w as usize) * (img_h as usize)];
    for y in 0..img_h {
        for x in 0..img_w {
            let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let coverage = (0.5 - rounded_rect_sdf(&rr, p)).clamp(0.0, 1.0);
            mask[(y as usize) * (img_w as usize) + (x as usize)] =
                (coverage * f64::from(alpha)).round() as u8;
        }
    }

    let blurred = blur_mask(&mask, img_w, img_h, (sigma * 3.0).ceil() as u32, sigma)?;
    let mut rgba = Vec::with_capacity(blurred.len() * 4);
    for a in blurred {
        rgba.extend_from_slice(&[0, 0, 0, a]);
    }

    Ok(SoftShadow {
        image: premul_image(&rgba, img_w, img_h)?,
        pad,
        width: f64::from(img_w),
        height: f64::from(img_h),
    })
}

/// Signed distance from `p` to the outline of `rr` (negative inside).
fn rounded_rect_sdf(rr: &RoundedRect, p: Point) -> f64 {
    let rect = rr.rect();
    let r = rr.radii().top_left.min(rect.width() / 2.0).min(rect.height() / 2.0);
    let c = rect.center();
    let qx = (p.x - c.x).abs() - (rect.width() / 2.0 - r);
    let qy = (p.y - c.y).abs() - (rect.height() / 2.0 - r);
    let outside = qx.max(0.0).hypot(qy.max(0.0));
    outside + qx.max(qy).min(0.0) - r
}

/// Draw every glyph run of `text` under `transform`.
pub(crate) fn draw_text(ctx: &mut vello_cpu::RenderContext, text: &PreparedText, transform: Affine) {
    ctx.set_transform(affine_to_cpu(transform));
    for line in text.layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));

            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&text.font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

/// Transform placing `text` horizontally centered on `anchor.x` with its baseline on `anchor.y`.
pub(crate) fn centered_on_baseline(text: &PreparedText, anchor: Point) -> Affine {
    Affine::translate((
        anchor.x - f64::from(text.width) / 2.0,
        anchor.y - f64::from(text.baseline),
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/paint.rs"]
mod tests;
