use crate::foundation::error::{WordreelError, WordreelResult};

/// Interleaved `f32` PCM with its format.
///
/// Buffers are values: every transform in [`crate::audio`] returns a new buffer and leaves its
/// input untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl AudioBuffer {
    /// Wrap interleaved samples; the length must be a multiple of `channels`.
    pub fn from_interleaved(
        samples: Vec<f32>,
        sample_rate: u32,
        channels: u16,
    ) -> WordreelResult<Self> {
        if sample_rate == 0 {
            return Err(WordreelError::validation("audio sample_rate must be > 0"));
        }
        if channels == 0 {
            return Err(WordreelError::validation("audio channels must be > 0"));
        }
        if !samples.len().is_multiple_of(usize::from(channels)) {
            return Err(WordreelError::validation(format!(
                "audio sample count {} is not a multiple of channel count {channels}",
                samples.len()
            )));
        }
        Ok(Self {
            samples,
            sample_rate,
            channels,
        })
    }

    /// Empty buffer sharing `self`'s format.
    pub(crate) fn empty_like(&self) -> Self {
        Self {
            samples: Vec::new(),
            sample_rate: self.sample_rate,
            channels: self.channels,
        }
    }

    /// Build a buffer with `self`'s format; callers guarantee whole frames.
    pub(crate) fn with_samples(&self, samples: Vec<f32>) -> Self {
        debug_assert!(samples.len().is_multiple_of(usize::from(self.channels)));
        Self {
            samples,
            sample_rate: self.sample_rate,
            channels: self.channels,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Number of sample frames (one sample per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        (self.frames() as f64) / f64::from(self.sample_rate)
    }

    /// Iterate interleaved frames.
    pub fn frame_chunks(&self) -> std::slice::ChunksExact<'_, f32> {
        self.samples.chunks_exact(usize::from(self.channels))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/buffer.rs"]
mod tests;
