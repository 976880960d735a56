use crate::foundation::error::{WordreelError, WordreelResult};

pub use kurbo::{Affine, BezPath, Point, Rect, RoundedRect};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> WordreelResult<Self> {
        if den == 0 {
            return Err(WordreelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(WordreelError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Integer frame rate (`num / den == n`).
    pub fn whole(n: u32) -> WordreelResult<Self> {
        Self::new(n, 1)
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Frames per second rounded down, never below 1.
    pub fn frames_per_second(self) -> u64 {
        (u64::from(self.num) / u64::from(self.den)).max(1)
    }

    /// `ceil(seconds * fps)` where `seconds = sample_frames / sample_rate`.
    ///
    /// Computed in integers so whole-second audio maps to an exact frame count.
    pub fn frames_for_samples(self, sample_frames: u64, sample_rate: u32) -> u64 {
        if sample_rate == 0 {
            return 0;
        }
        let num = u128::from(sample_frames) * u128::from(self.num);
        let den = u128::from(sample_rate) * u128::from(self.den);
        num.div_ceil(den) as u64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> WordreelResult<Self> {
        if width == 0 || height == 0 {
            return Err(WordreelError::validation("canvas width/height must be > 0"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(WordreelError::validation("canvas width/height exceed u16"));
        }
        Ok(Self { width, height })
    }

    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }
}

/// Position of one frame within a job's sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSpec {
    pub index: FrameIndex,
    pub total: u64,
}

impl FrameSpec {
    pub fn new(index: FrameIndex, total: u64) -> Self {
        Self { index, total }
    }

    /// `min(index / total, 1.0)`; an empty sequence reports full progress.
    pub fn progress(self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        ((self.index.0 as f64) / (self.total as f64)).min(1.0)
    }

    /// Rounded percentage shown under the progress bar.
    pub fn percent_label(self) -> String {
        format!("{}%", (self.progress() * 100.0).round() as u32)
    }

    /// True once `total - index <= fps`, i.e. inside the last second.
    pub fn in_final_second(self, fps: Fps) -> bool {
        self.total.saturating_sub(self.index.0) <= fps.frames_per_second()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
