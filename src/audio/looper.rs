use crate::{
    audio::buffer::AudioBuffer,
    foundation::error::{WordreelError, WordreelResult},
};

/// Concatenate `input` with itself `count` times.
pub fn loop_audio(input: &AudioBuffer, count: u32) -> WordreelResult<AudioBuffer> {
    if count == 0 {
        return Err(WordreelError::validation("loop count must be >= 1"));
    }
    let src = input.samples();
    let mut out = Vec::<f32>::with_capacity(src.len() * count as usize);
    for _ in 0..count {
        out.extend_from_slice(src);
    }
    Ok(input.with_samples(out))
}

#[cfg(test)]
#[path = "../../tests/unit/audio/looper.rs"]
mod tests;
