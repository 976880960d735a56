use std::path::Path;

use crate::{
    audio::buffer::AudioBuffer,
    foundation::error::{WordreelError, WordreelResult},
};

/// Decode any audio file `ffmpeg` understands into interleaved `f32` PCM.
///
/// The clip is resampled to `sample_rate` and remixed to `channels` so every later stage sees
/// one known format.
#[tracing::instrument(skip(ffmpeg), fields(path = %path.display()))]
pub fn decode_audio_f32(
    ffmpeg: &Path,
    path: &Path,
    sample_rate: u32,
    channels: u16,
) -> WordreelResult<AudioBuffer> {
    if !path.is_file() {
        return Err(WordreelError::input(format!(
            "audio file '{}' does not exist",
            path.display()
        )));
    }

    let out = std::process::Command::new(ffmpeg)
        .args(["-v", "error", "-i"])
        .arg(path)
        .args([
            "-vn",
            "-f",
            "f32le",
            "-acodec",
            "pcm_f32le",
            "-ac",
            &channels.to_string(),
            "-ar",
            &sample_rate.to_string(),
            "pipe:1",
        ])
        .output()
        .map_err(|e| WordreelError::input(format!("failed to run ffmpeg for audio decode: {e}")))?;

    if !out.status.success() {
        return Err(WordreelError::input(format!(
            "ffmpeg audio decode failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let pcm = f32le_bytes_to_samples(&out.stdout)?;
    AudioBuffer::from_interleaved(pcm, sample_rate, channels)
}

/// Write interleaved samples as raw little-endian `f32`, the format the encoder reads back.
pub fn write_f32le_file(buffer: &AudioBuffer, out_path: &Path) -> WordreelResult<()> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            WordreelError::Other(anyhow::anyhow!(
                "failed to create audio output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let mut bytes = Vec::<u8>::with_capacity(buffer.samples().len() * 4);
    for &sample in buffer.samples() {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    std::fs::write(out_path, bytes).map_err(|e| {
        WordreelError::Other(anyhow::anyhow!(
            "failed to write processed audio '{}': {e}",
            out_path.display()
        ))
    })
}

fn f32le_bytes_to_samples(bytes: &[u8]) -> WordreelResult<Vec<f32>> {
    if !bytes.len().is_multiple_of(4) {
        return Err(WordreelError::input(
            "decoded audio byte length is not aligned to f32 samples",
        ));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/media.rs"]
mod tests;
