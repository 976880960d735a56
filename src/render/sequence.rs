use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};

use rayon::prelude::*;

use crate::{
    foundation::core::{Fps, FrameIndex, FrameSpec},
    foundation::error::{WordreelError, WordreelResult},
    layout::placement::{
        PlacementRecord, PlacementRequest, PlacementTracker, is_placement_frame,
        placement_interval,
    },
    render::compositor::{BACKGROUND, FrameCompositor},
};

/// `ffmpeg` input pattern matching [`frame_file_name`].
pub const FRAME_PATTERN: &str = "frame_%06d.png";

pub fn frame_file_name(index: FrameIndex) -> String {
    format!("frame_{:06}.png", index.0)
}

/// Frames needed to cover `sample_frames` of audio: `ceil(duration * fps)`.
pub fn total_frames(sample_frames: u64, sample_rate: u32, fps: Fps) -> u64 {
    fps.frames_for_samples(sample_frames, sample_rate)
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderThreading {
    pub parallel: bool,
    /// Frames handed to the pool at once; cancellation is checked between chunks.
    pub chunk_size: usize,
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Stamp cadence and collision limits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StampSchedule {
    pub per_second: u32,
    pub min_distance: f64,
    pub max_attempts: u32,
}

/// Frame images written for one job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSequence {
    pub dir: PathBuf,
    pub total_frames: u64,
    pub stamps_committed: usize,
}

/// Run placement for every frame in order.
///
/// Returns, per frame, how many records of `tracker` are visible on it. Records are append-only,
/// so frame `i` shows `tracker.records()[..counts[i]]`.
pub fn plan_stamps(
    tracker: &mut PlacementTracker,
    total_frames: u64,
    fps: Fps,
    schedule: &StampSchedule,
    request: &PlacementRequest,
) -> Vec<usize> {
    let interval = placement_interval(fps.frames_per_second(), schedule.per_second);
    (0..total_frames)
        .map(|f| {
            let frame = FrameIndex(f);
            if is_placement_frame(frame, interval) {
                let _ = tracker.try_place_next(frame, request);
            }
            tracker.len()
        })
        .collect()
}

pub struct FrameSequenceProducer<'a> {
    compositor: &'a FrameCompositor,
    fps: Fps,
    schedule: StampSchedule,
    threading: RenderThreading,
}

impl<'a> FrameSequenceProducer<'a> {
    pub fn new(
        compositor: &'a FrameCompositor,
        fps: Fps,
        schedule: StampSchedule,
        threading: RenderThreading,
    ) -> Self {
        Self {
            compositor,
            fps,
            schedule,
            threading,
        }
    }

    /// Placement request for this job's word at the configured limits.
    pub fn placement_request(&self) -> PlacementRequest {
        let assets = self.compositor.assets();
        let (text_width, text_height) = assets.word_extent();
        PlacementRequest {
            canvas_width: assets.canvas().width_f64(),
            canvas_height: assets.canvas().height_f64(),
            text_width,
            text_height,
            min_distance: self.schedule.min_distance,
            max_attempts: self.schedule.max_attempts,
        }
    }

    /// Write `total_frames` PNGs into `dir`.
    #[tracing::instrument(skip(self, tracker, cancel), fields(dir = %dir.display()))]
    pub fn produce(
        &self,
        total_frames: u64,
        tracker: &mut PlacementTracker,
        dir: &Path,
        cancel: Option<&AtomicBool>,
    ) -> WordreelResult<FrameSequence> {
        if total_frames == 0 {
            return Err(WordreelError::input("audio is too short to produce any frame"));
        }
        std::fs::create_dir_all(dir).map_err(|e| {
            WordreelError::compositing(format!("create frame dir '{}': {e}", dir.display()))
        })?;

        let request = self.placement_request();
        let counts = plan_stamps(tracker, total_frames, self.fps, &self.schedule, &request);
        let records = tracker.records();

        if self.threading.parallel {
            self.produce_parallel(&counts, records, dir, cancel)?;
        } else {
            let per_second = self.fps.frames_per_second();
            for (f, &count) in counts.iter().enumerate() {
                check_cancelled(cancel)?;
                self.write_frame(FrameIndex(f as u64), total_frames, &records[..count], dir)?;
                if (f as u64 + 1) % per_second == 0 {
                    tracing::debug!(frame = f + 1, total = total_frames, "frames written");
                }
            }
        }

        Ok(FrameSequence {
            dir: dir.to_path_buf(),
            total_frames,
            stamps_committed: records.len(),
        })
    }

    fn produce_parallel(
        &self,
        counts: &[usize],
        records: &[PlacementRecord],
        dir: &Path,
        cancel: Option<&AtomicBool>,
    ) -> WordreelResult<()> {
        let pool = build_thread_pool(self.threading.threads)?;
        let chunk_size = self.threading.chunk_size.max(1);
        let total = counts.len();

        let mut start = 0usize;
        while start < total {
            check_cancelled(cancel)?;
            let end = (start + chunk_size).min(total);
            pool.install(|| {
                (start..end).into_par_iter().try_for_each(|f| {
                    self.write_frame(FrameIndex(f as u64), total as u64, &records[..counts[f]], dir)
                })
            })?;
            tracing::debug!(frame = end, total, "frames written");
            start = end;
        }
        Ok(())
    }

    fn write_frame(
        &self,
        index: FrameIndex,
        total_frames: u64,
        stamps: &[PlacementRecord],
        dir: &Path,
    ) -> WordreelResult<()> {
        let spec = FrameSpec::new(index, total_frames);
        let surface = self.compositor.compose(&spec, stamps)?;
        let path = dir.join(frame_file_name(index));
        surface.save_png(&path, BACKGROUND).map_err(|e| match e {
            WordreelError::Compositing(_) => e,
            other => WordreelError::compositing(format!("frame {}: {other}", index.0)),
        })
    }
}

fn check_cancelled(cancel: Option<&AtomicBool>) -> WordreelResult<()> {
    match cancel {
        Some(flag) if flag.load(Ordering::Relaxed) => Err(WordreelError::Cancelled),
        _ => Ok(()),
    }
}

fn build_thread_pool(threads: Option<usize>) -> WordreelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(WordreelError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| WordreelError::compositing(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/sequence.rs"]
mod tests;
