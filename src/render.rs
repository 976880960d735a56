//! CPU frame rendering: per-frame composition and the frame sequence written for the encoder.

pub mod blur;
/// Layered drawing of one frame.
pub mod compositor;
pub(crate) mod paint;
/// Frame loop, stamp scheduling and PNG output.
pub mod sequence;
pub mod surface;
