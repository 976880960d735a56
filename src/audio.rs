//! Audio value type and the trim/loop transforms applied to pronunciation clips.

/// Interleaved PCM buffer.
pub mod buffer;
/// Repeat a clip end to end.
pub mod looper;
/// Threshold-based silence removal.
pub mod trim;
