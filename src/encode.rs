//! Muxing the frame sequence and processed audio into the output video.

/// External `ffmpeg` process driver.
pub mod ffmpeg;
