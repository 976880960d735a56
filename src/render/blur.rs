//! Separable gaussian blur over 8-bit coverage masks, used for soft shadows.

use crate::foundation::error::{WordreelError, WordreelResult};

/// Blur a single-channel mask of `width * height` bytes.
pub fn blur_mask(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> WordreelResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| WordreelError::compositing("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(WordreelError::compositing(
            "blur_mask expects src matching width*height",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    let (w, h) = (width as usize, height as usize);
    // Horizontal then vertical; edges clamp.
    convolve(src, &mut tmp, &kernel, w, h, 1, w);
    convolve(&tmp, &mut out, &kernel, w, h, w, h);
    Ok(out)
}

/// One 1-D pass. `stride` is the distance between taps, `extent` the length along the pass.
fn convolve(src: &[u8], dst: &mut [u8], k: &[u32], w: usize, h: usize, stride: usize, extent: usize) {
    let radius = (k.len() / 2) as isize;
    let last = extent as isize - 1;
    for y in 0..h {
        for x in 0..w {
            let along = if stride == 1 { x } else { y } as isize;
            let base = y * w + x - (along as usize) * stride;
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let pos = (along + ki as isize - radius).clamp(0, last) as usize;
                acc += u64::from(kw) * u64::from(src[base + pos * stride]);
            }
            dst[y * w + x] = q16_to_u8(acc);
        }
    }
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> WordreelResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(WordreelError::validation("blur sigma must be finite and > 0"));
    }

    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| (-f64::from(i * i) / denom).exp())
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(WordreelError::compositing("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    // Push rounding drift into the center tap so the kernel sums to exactly 1.0 in Q16.
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let mid = weights.len() / 2;
    weights[mid] = (i64::from(weights[mid]) + 65536 - acc).clamp(0, 65536) as u32;

    Ok(weights)
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
