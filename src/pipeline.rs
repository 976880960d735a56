//! Per-word job orchestration: audio processing, frame production, encoding and cleanup.

/// Multi-word runs from a manifest.
pub mod batch;
pub mod job;
/// The [`VideoPipeline`](runner::VideoPipeline) facade.
pub mod runner;
/// Scratch files owned by one running job.
pub mod scratch;
