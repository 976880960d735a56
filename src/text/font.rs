use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::foundation::error::{WordreelError, WordreelResult};

/// Fallback serif/bold faces for the stamped word.
pub const WORD_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSerif-Bold.ttf",
    "/usr/share/fonts/liberation/LiberationSerif-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSerif-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSerif-Bold.ttf",
    "/Library/Fonts/Times New Roman Bold.ttf",
    "/System/Library/Fonts/Supplemental/Times New Roman Bold.ttf",
    "C:\\Windows\\Fonts\\timesbd.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
];

/// Fallback faces for captions; CJK-capable faces come first.
pub const CAPTION_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
];

/// Raw font file contents plus the path they came from.
#[derive(Clone)]
pub struct FontFace {
    pub path: PathBuf,
    pub bytes: Arc<Vec<u8>>,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("path", &self.path)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

impl FontFace {
    pub fn from_path(path: &Path) -> WordreelResult<Self> {
        let bytes = std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        if bytes.is_empty() {
            return Err(WordreelError::validation(format!(
                "font file '{}' is empty",
                path.display()
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
            bytes: Arc::new(bytes),
        })
    }

    /// Load `configured` when set, otherwise the first existing file among `candidates`.
    pub fn resolve(configured: Option<&Path>, candidates: &[&str]) -> WordreelResult<Self> {
        if let Some(path) = configured {
            return Self::from_path(path);
        }
        let path = find_font(candidates).ok_or_else(|| {
            WordreelError::validation(format!(
                "no font configured and none of the fallback fonts exist (tried {})",
                candidates.join(", ")
            ))
        })?;
        tracing::debug!(path = %path.display(), "using fallback font");
        Self::from_path(&path)
    }

    /// Font handle for the CPU renderer.
    pub(crate) fn render_font(&self) -> vello_cpu::peniko::FontData {
        let bytes = self.bytes.as_ref().clone();
        vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0)
    }
}

/// First path in `candidates` that exists as a file.
pub fn find_font(candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}
