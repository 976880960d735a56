//! Amplitude-threshold silence removal.

use crate::audio::buffer::AudioBuffer;

/// Options for [`trim_silence`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SilenceOpts {
    /// Level below which a sample counts as quiet, in dBFS.
    pub threshold_db: f32,
    /// Quiet frames in a row after which the rest of the gap is dropped.
    pub min_silence_run: usize,
}

impl Default for SilenceOpts {
    fn default() -> Self {
        Self {
            threshold_db: -40.0,
            min_silence_run: 2000,
        }
    }
}

impl SilenceOpts {
    /// Linear amplitude cutoff `10^(dB/20)`.
    pub fn linear_threshold(&self) -> f32 {
        10f32.powf(self.threshold_db / 20.0)
    }
}

/// Drop leading and trailing silence, and shorten long interior gaps.
///
/// A frame is loud when any of its channels reaches the threshold. Nothing is kept before the
/// first loud frame or after the last one. Inside the clip, a quiet run keeps its first
/// `min_silence_run - 1` frames and loses the rest, so natural pauses survive while long
/// gaps collapse.
///
/// An all-quiet input returns an empty buffer.
pub fn trim_silence(input: &AudioBuffer, opts: &SilenceOpts) -> AudioBuffer {
    let cutoff = opts.linear_threshold();
    let channels = usize::from(input.channels());

    let mut kept = Vec::<f32>::with_capacity(input.samples().len());
    // Quiet frames seen since the last loud frame that are still eligible to be kept.
    let mut pending = Vec::<f32>::new();
    let mut started = false;
    let mut quiet_run = 0usize;

    for frame in input.frame_chunks() {
        let loud = frame.iter().any(|s| s.abs() >= cutoff);
        if loud {
            started = true;
            quiet_run = 0;
            kept.append(&mut pending);
            kept.extend_from_slice(frame);
        } else if started {
            quiet_run += 1;
            if quiet_run < opts.min_silence_run {
                pending.extend_from_slice(frame);
            }
        }
    }

    if kept.is_empty() {
        return input.empty_like();
    }
    debug_assert!(kept.len().is_multiple_of(channels));
    input.with_samples(kept)
}

#[cfg(test)]
#[path = "../../tests/unit/audio/trim.rs"]
mod tests;
