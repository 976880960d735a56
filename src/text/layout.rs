use std::{collections::HashMap, sync::Arc};

use crate::{
    foundation::error::{WordreelError, WordreelResult},
    text::font::FontFace,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl TextBrushRgba8 {
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Shaped single-line text with the font needed to draw it.
#[derive(Clone)]
pub struct PreparedText {
    pub layout: Arc<parley::Layout<TextBrushRgba8>>,
    pub font: vello_cpu::peniko::FontData,
    /// Advance width of the widest line.
    pub width: f32,
    /// Sum of line heights.
    pub height: f32,
    /// Distance from the layout top to the first baseline.
    pub baseline: f32,
}

impl std::fmt::Debug for PreparedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedText")
            .field("layout_ptr", &Arc::as_ptr(&self.layout))
            .field("width", &self.width)
            .field("height", &self.height)
            .field("baseline", &self.baseline)
            .finish()
    }
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    families: HashMap<std::path::PathBuf, String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    fn family_for(&mut self, face: &FontFace) -> WordreelResult<String> {
        if let Some(name) = self.families.get(&face.path) {
            return Ok(name.clone());
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(face.bytes.as_ref().clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            WordreelError::validation(format!(
                "no font families registered from '{}'",
                face.path.display()
            ))
        })?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| WordreelError::validation("registered font family has no name"))?
            .to_string();

        self.families.insert(face.path.clone(), family_name.clone());
        Ok(family_name)
    }

    /// Shape `text` on one line (no wrapping).
    pub fn layout_line(
        &mut self,
        text: &str,
        face: &FontFace,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> WordreelResult<PreparedText> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(WordreelError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family_name = self.family_for(face)?;
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        let mut width = 0.0f32;
        let mut height = 0.0f32;
        let mut baseline = None;
        for line in layout.lines() {
            let m = line.metrics();
            width = width.max(m.advance);
            height += m.ascent + m.descent + m.leading;
            baseline.get_or_insert(m.baseline);
        }

        Ok(PreparedText {
            layout: Arc::new(layout),
            font: face.render_font(),
            width,
            height,
            baseline: baseline.unwrap_or(0.0),
        })
    }
}

/// First `max_chars` characters of `s` (by Unicode scalar, not byte).
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
