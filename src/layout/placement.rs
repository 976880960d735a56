use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::foundation::core::{FrameIndex, Point};

/// Largest absolute stamp rotation, in degrees.
pub const MAX_ROTATION_DEG: f64 = 15.0;

/// Top of the stamp area as a fraction of canvas height; stamps stay in the lower part.
pub const STAMP_AREA_TOP: f64 = 0.4;

/// One committed word stamp.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PlacementRecord {
    /// Anchor of the stamp: horizontal center, text baseline.
    pub position: Point,
    /// Rotation about `position`, in degrees.
    pub rotation_deg: f64,
    /// Frame that committed the stamp.
    pub frame: FrameIndex,
}

/// Geometry and limits for one placement attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementRequest {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub text_width: f64,
    pub text_height: f64,
    pub min_distance: f64,
    pub max_attempts: u32,
}

/// Append-only stamp history for one word job.
///
/// Candidates are drawn uniformly from the stamp area and rejected when closer than
/// `min_distance` to any earlier stamp; a crowded canvas simply stops receiving stamps.
#[derive(Debug)]
pub struct PlacementTracker {
    rng: StdRng,
    records: Vec<PlacementRecord>,
}

impl PlacementTracker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            records: Vec::new(),
        }
    }

    /// Try to commit one more stamp; `None` when the area is empty or every attempt collided.
    pub fn try_place_next(
        &mut self,
        frame: FrameIndex,
        req: &PlacementRequest,
    ) -> Option<PlacementRecord> {
        let x_lo = req.text_width;
        let x_hi = req.canvas_width - req.text_width;
        let y_lo = req.text_height + req.canvas_height * STAMP_AREA_TOP;
        let y_hi = req.canvas_height - req.text_height;
        if !(x_lo < x_hi && y_lo < y_hi) {
            return None;
        }

        for _ in 0..req.max_attempts {
            let candidate = Point::new(
                self.rng.gen_range(x_lo..x_hi),
                self.rng.gen_range(y_lo..y_hi),
            );
            if self.is_clear(candidate, req.min_distance) {
                let record = PlacementRecord {
                    position: candidate,
                    rotation_deg: self.rng.gen_range(-MAX_ROTATION_DEG..=MAX_ROTATION_DEG),
                    frame,
                };
                self.records.push(record);
                return Some(record);
            }
        }
        None
    }

    fn is_clear(&self, candidate: Point, min_distance: f64) -> bool {
        self.records
            .iter()
            .all(|r| r.position.distance(candidate) >= min_distance)
    }

    pub fn records(&self) -> &[PlacementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Frames between placement attempts: `fps / per_second`, at least 1.
pub fn placement_interval(frames_per_second: u64, per_second: u32) -> u64 {
    (frames_per_second / u64::from(per_second.max(1))).max(1)
}

pub fn is_placement_frame(frame: FrameIndex, interval: u64) -> bool {
    frame.0 % interval.max(1) == 0
}

#[cfg(test)]
#[path = "../../tests/unit/layout/placement.rs"]
mod tests;
