use std::sync::Arc;

use crate::{
    assets::PreparedImage,
    foundation::core::{Affine, Canvas, Fps, FrameSpec, Point, Rect, RoundedRect},
    foundation::error::{WordreelError, WordreelResult},
    layout::placement::PlacementRecord,
    render::{
        paint::{self, SoftShadow},
        surface::RenderSurface,
    },
    text::{
        font::FontFace,
        layout::{PreparedText, TextBrushRgba8, TextLayoutEngine, truncate_chars},
    },
};

pub const BACKGROUND: [u8; 3] = [255, 255, 255];

const CAPTION_SIZE: f32 = 48.0;
const CAPTION_MAX_CHARS: usize = 6;
const CAPTION_BASELINE: f64 = 0.3;

const STATUS_SIZE: f32 = 36.0;
const PERCENT_SIZE: f32 = 24.0;
const SUCCESS_COLOR: TextBrushRgba8 = TextBrushRgba8::opaque(76, 175, 80);

const SUBJECT_CENTER_Y: f64 = 0.6;

const BAR_WIDTH: f64 = 0.4;
const BAR_TOP: f64 = 0.15;
const BAR_HEIGHT: f64 = 40.0;
const BAR_RADIUS: f64 = 20.0;
const BAR_GRADIENT: ([u8; 3], [u8; 3]) = ([0, 122, 255], [64, 156, 255]);

/// Status captions shown above the progress bar.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StatusTexts {
    pub in_progress: String,
    /// Shown during the final second of the video.
    pub success: String,
}

impl Default for StatusTexts {
    fn default() -> Self {
        Self {
            in_progress: "强行写入大脑中".to_owned(),
            success: "写入大脑成功".to_owned(),
        }
    }
}

/// Fonts and per-job inputs used to prepare [`FrameAssets`].
pub struct FrameInputs<'a> {
    pub word: &'a str,
    pub translations: &'a [String],
    pub image: &'a PreparedImage,
    pub word_font: &'a FontFace,
    pub caption_font: &'a FontFace,
    pub word_size: f32,
    pub status: &'a StatusTexts,
}

struct SubjectPaint {
    image: vello_cpu::Image,
    width: f64,
    height: f64,
    transform: Affine,
}

/// Bar geometry in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressBarGeometry {
    pub rect: Rect,
    pub radius: f64,
}

impl ProgressBarGeometry {
    pub fn for_canvas(canvas: Canvas) -> Self {
        let (w, h) = (canvas.width_f64(), canvas.height_f64());
        let bar_w = w * BAR_WIDTH;
        let x = (w - bar_w) / 2.0;
        let y = h * BAR_TOP;
        Self {
            rect: Rect::new(x, y, x + bar_w, y + BAR_HEIGHT),
            radius: BAR_RADIUS,
        }
    }

    /// Width of the filled part at `progress` in `[0, 1]`.
    pub fn fill_width(&self, progress: f64) -> f64 {
        self.rect.width() * progress.clamp(0.0, 1.0)
    }
}

/// Everything a frame needs that does not change across the job.
///
/// Shared read-only between frames, so it can be composited from several threads.
pub struct FrameAssets {
    canvas: Canvas,
    fps: Fps,
    subject: SubjectPaint,
    caption: Option<PreparedText>,
    word: PreparedText,
    status_in_progress: PreparedText,
    status_success: PreparedText,
    percent_labels: Vec<PreparedText>,
    bar: ProgressBarGeometry,
    bar_gradient: vello_cpu::Image,
    shadows: [(SoftShadow, f64); 2],
}

impl FrameAssets {
    /// Shape all text and build the image paints for one job.
    pub fn prepare(
        canvas: Canvas,
        fps: Fps,
        inputs: &FrameInputs<'_>,
        engine: &mut TextLayoutEngine,
    ) -> WordreelResult<Self> {
        let subject = subject_paint(canvas, inputs.image)?;

        let caption = match inputs.translations.first() {
            Some(t) if !truncate_chars(t, CAPTION_MAX_CHARS).is_empty() => Some(engine.layout_line(
                truncate_chars(t, CAPTION_MAX_CHARS),
                inputs.caption_font,
                CAPTION_SIZE,
                TextBrushRgba8::BLACK,
            )?),
            _ => None,
        };

        let word = engine.layout_line(
            inputs.word,
            inputs.word_font,
            inputs.word_size,
            TextBrushRgba8::BLACK,
        )?;
        let status_in_progress = engine.layout_line(
            &inputs.status.in_progress,
            inputs.caption_font,
            STATUS_SIZE,
            TextBrushRgba8::BLACK,
        )?;
        let status_success = engine.layout_line(
            &inputs.status.success,
            inputs.caption_font,
            STATUS_SIZE,
            SUCCESS_COLOR,
        )?;

        let percent_labels = (0..=100u32)
            .map(|p| {
                engine.layout_line(
                    &format!("{p}%"),
                    inputs.caption_font,
                    PERCENT_SIZE,
                    TextBrushRgba8::BLACK,
                )
            })
            .collect::<WordreelResult<Vec<_>>>()?;

        let bar = ProgressBarGeometry::for_canvas(canvas);
        let bar_gradient = paint::horizontal_gradient(
            BAR_GRADIENT.0,
            BAR_GRADIENT.1,
            bar.rect.width().ceil().max(1.0) as u32,
            bar.rect.height().ceil().max(1.0) as u32,
        )?;
        let shadows = [
            (
                paint::soft_shadow(bar.rect.width(), bar.rect.height(), bar.radius, 4.0, 50)?,
                4.0,
            ),
            (
                paint::soft_shadow(bar.rect.width(), bar.rect.height(), bar.radius, 2.0, 40)?,
                1.0,
            ),
        ];

        Ok(Self {
            canvas,
            fps,
            subject,
            caption,
            word,
            status_in_progress,
            status_success,
            percent_labels,
            bar,
            bar_gradient,
            shadows,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Shaped size of one word stamp, for placement requests.
    pub fn word_extent(&self) -> (f64, f64) {
        (f64::from(self.word.width), f64::from(self.word.height))
    }

    pub fn has_caption(&self) -> bool {
        self.caption.is_some()
    }
}

fn subject_paint(canvas: Canvas, image: &PreparedImage) -> WordreelResult<SubjectPaint> {
    if image.width == 0 || image.height == 0 {
        return Err(WordreelError::input("subject image has zero size"));
    }
    let (iw, ih) = (f64::from(image.width), f64::from(image.height));
    let (w, h) = (canvas.width_f64(), canvas.height_f64());

    let scale = (w / iw).min((h / 2.0) / ih);
    let (dw, dh) = (iw * scale, ih * scale);
    let x = (w - dw) / 2.0;
    let y = h * SUBJECT_CENTER_Y - dh / 2.0;

    Ok(SubjectPaint {
        image: paint::premul_image(&image.rgba8_premul, image.width, image.height)?,
        width: iw,
        height: ih,
        transform: Affine::translate((x, y)) * Affine::scale(scale),
    })
}

/// Draws frames for one job from shared [`FrameAssets`].
#[derive(Clone)]
pub struct FrameCompositor {
    assets: Arc<FrameAssets>,
}

impl FrameCompositor {
    pub fn new(assets: FrameAssets) -> Self {
        Self {
            assets: Arc::new(assets),
        }
    }

    pub fn assets(&self) -> &FrameAssets {
        &self.assets
    }

    /// Render frame `spec` with every stamp in `stamps` drawn on top.
    pub fn compose(
        &self,
        spec: &FrameSpec,
        stamps: &[PlacementRecord],
    ) -> WordreelResult<RenderSurface> {
        let a = &*self.assets;
        let mut surface = RenderSurface::new(a.canvas)?;
        let mut ctx = vello_cpu::RenderContext::new(surface.width_u16(), surface.height_u16());

        ctx.set_transform(paint::affine_to_cpu(Affine::IDENTITY));
        ctx.set_paint(paint::solid(BACKGROUND));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            a.canvas.width_f64(),
            a.canvas.height_f64(),
        ));

        self.draw_subject(&mut ctx);
        if let Some(caption) = &a.caption {
            let anchor = Point::new(a.canvas.width_f64() / 2.0, a.canvas.height_f64() * CAPTION_BASELINE);
            paint::draw_text(&mut ctx, caption, paint::centered_on_baseline(caption, anchor));
        }
        self.draw_progress(&mut ctx, spec)?;
        self.draw_stamps(&mut ctx, stamps);

        ctx.flush();
        ctx.render_to_pixmap(surface.pixmap_mut());
        Ok(surface)
    }

    fn draw_subject(&self, ctx: &mut vello_cpu::RenderContext) {
        let s = &self.assets.subject;
        ctx.set_transform(paint::affine_to_cpu(s.transform));
        ctx.set_paint(s.image.clone());
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, s.width, s.height));
    }

    fn draw_progress(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        spec: &FrameSpec,
    ) -> WordreelResult<()> {
        let a = &*self.assets;
        let bar = a.bar.rect;
        let origin = Affine::translate((bar.x0, bar.y0));

        for (shadow, dy) in &a.shadows {
            ctx.set_transform(paint::affine_to_cpu(Affine::translate((
                bar.x0 - shadow.pad,
                bar.y0 - shadow.pad + dy,
            ))));
            ctx.set_paint(shadow.image.clone());
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, shadow.width, shadow.height));
        }

        ctx.set_transform(paint::affine_to_cpu(origin));
        ctx.set_paint(paint::solid(BACKGROUND));
        ctx.fill_path(&paint::rounded_rect_path(RoundedRect::new(
            0.0,
            0.0,
            bar.width(),
            bar.height(),
            a.bar.radius,
        )));

        let progress = spec.progress();
        let fill_w = a.bar.fill_width(progress);
        if fill_w > 0.0 {
            let radius = a.bar.radius.min(fill_w / 2.0);
            ctx.set_paint(a.bar_gradient.clone());
            ctx.fill_path(&paint::rounded_rect_path(RoundedRect::new(
                0.0,
                0.0,
                fill_w,
                bar.height(),
                radius,
            )));
        }

        let center_x = a.canvas.width_f64() / 2.0;
        let status = if spec.in_final_second(a.fps) {
            &a.status_success
        } else {
            &a.status_in_progress
        };
        paint::draw_text(
            ctx,
            status,
            paint::centered_on_baseline(status, Point::new(center_x, bar.y0 - 20.0)),
        );

        let pct = (progress * 100.0).round() as usize;
        let label = a
            .percent_labels
            .get(pct)
            .ok_or_else(|| WordreelError::compositing(format!("no label for {pct}%")))?;
        paint::draw_text(
            ctx,
            label,
            paint::centered_on_baseline(label, Point::new(center_x, bar.y1 + 25.0)),
        );
        Ok(())
    }

    fn draw_stamps(&self, ctx: &mut vello_cpu::RenderContext, stamps: &[PlacementRecord]) {
        let word = &self.assets.word;
        for stamp in stamps {
            let tr = Affine::rotate_about(stamp.rotation_deg.to_radians(), stamp.position)
                * paint::centered_on_baseline(word, stamp.position);
            paint::draw_text(ctx, word, tr);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
