use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    audio::trim::SilenceOpts,
    encode::ffmpeg::EncoderSettings,
    foundation::core::{Canvas, Fps},
    foundation::error::{WordreelError, WordreelResult},
    render::{compositor::StatusTexts, sequence::RenderThreading},
};

/// Word stamp appearance and placement limits.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StampConfig {
    pub font_size: f32,
    /// Minimum distance between two stamp anchors, in pixels.
    pub min_distance: f64,
    pub max_attempts: u32,
    /// Placement attempts per second of video.
    pub per_second: u32,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            font_size: 48.0,
            min_distance: 80.0,
            max_attempts: 50,
            per_second: 5,
        }
    }
}

/// Optional font overrides; unset entries use the built-in fallback lists.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub word_font: Option<PathBuf>,
    /// Used for the caption, status line and percentage.
    pub caption_font: Option<PathBuf>,
}

/// Settings shared by every job a [`crate::VideoPipeline`] runs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// How many times the trimmed clip is repeated.
    pub repeat_count: u32,
    pub sample_rate: u32,
    pub channels: u16,
    pub silence: SilenceOpts,
    pub stamps: StampConfig,
    pub fonts: FontConfig,
    pub status: StatusTexts,
    pub encoder: EncoderSettings,
    /// Parent of per-job scratch areas; the system temp dir when unset.
    pub scratch_dir: Option<PathBuf>,
    pub threading: RenderThreading,
    /// Placement seed; derived from the word when unset.
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 30,
            repeat_count: 30,
            sample_rate: 48_000,
            channels: 2,
            silence: SilenceOpts::default(),
            stamps: StampConfig::default(),
            fonts: FontConfig::default(),
            status: StatusTexts::default(),
            encoder: EncoderSettings::default(),
            scratch_dir: None,
            threading: RenderThreading::default(),
            seed: None,
        }
    }
}

impl PipelineConfig {
    /// Read a JSON config; missing fields take their defaults.
    pub fn from_path(path: &Path) -> WordreelResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .with_context(|| format!("parse config '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> WordreelResult<()> {
        let canvas = self.canvas()?;
        if !canvas.width.is_multiple_of(2) || !canvas.height.is_multiple_of(2) {
            return Err(WordreelError::validation(
                "width/height must be even (required for yuv420p output)",
            ));
        }
        self.fps()?;
        if self.repeat_count == 0 {
            return Err(WordreelError::validation("repeat_count must be >= 1"));
        }
        if self.sample_rate == 0 || self.channels == 0 {
            return Err(WordreelError::validation(
                "sample_rate and channels must be non-zero",
            ));
        }
        if !self.silence.threshold_db.is_finite() {
            return Err(WordreelError::validation("silence threshold_db must be finite"));
        }
        if !self.stamps.font_size.is_finite() || self.stamps.font_size <= 0.0 {
            return Err(WordreelError::validation("stamp font_size must be > 0"));
        }
        if !self.stamps.min_distance.is_finite() || self.stamps.min_distance < 0.0 {
            return Err(WordreelError::validation("stamp min_distance must be >= 0"));
        }
        if self.stamps.per_second == 0 {
            return Err(WordreelError::validation("stamp per_second must be >= 1"));
        }
        if self.threading.threads == Some(0) {
            return Err(WordreelError::validation(
                "render threading 'threads' must be >= 1 when set",
            ));
        }
        self.encoder.validate()
    }

    pub fn canvas(&self) -> WordreelResult<Canvas> {
        Canvas::new(self.width, self.height)
    }

    pub fn fps(&self) -> WordreelResult<Fps> {
        Fps::whole(self.fps)
    }

    pub fn scratch_root(&self) -> PathBuf {
        self.scratch_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
