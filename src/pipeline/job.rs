use std::path::{Path, PathBuf};

use crate::foundation::error::{JobError, JobStage, WordreelError, WordreelResult};

/// One word to turn into a video.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordJob {
    word: String,
    audio: PathBuf,
    image: PathBuf,
    translations: Vec<String>,
    output: PathBuf,
    seed: Option<u64>,
}

impl WordJob {
    /// Build a job; `word` must be ASCII letters only and is lowercased.
    pub fn new(
        word: &str,
        audio: impl Into<PathBuf>,
        image: impl Into<PathBuf>,
        translations: Vec<String>,
        output: impl Into<PathBuf>,
    ) -> WordreelResult<Self> {
        Ok(Self {
            word: normalize_word(word)?,
            audio: audio.into(),
            image: image.into(),
            translations,
            output: output.into(),
            seed: None,
        })
    }

    /// Fix the placement seed for this job, overriding the pipeline default.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn audio(&self) -> &Path {
        &self.audio
    }

    pub fn image(&self) -> &Path {
        &self.image
    }

    pub fn translations(&self) -> &[String] {
        &self.translations
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// Trimmed, lowercased word; rejects anything but ASCII letters.
pub fn normalize_word(word: &str) -> WordreelResult<String> {
    let w = word.trim();
    if w.is_empty() {
        return Err(WordreelError::input("word must be non-empty"));
    }
    if !w.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(WordreelError::input(format!(
            "word '{w}' must contain ASCII letters only"
        )));
    }
    Ok(w.to_ascii_lowercase())
}

/// Outcome of a successful job.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct JobReport {
    pub word: String,
    pub output: PathBuf,
    pub total_frames: u64,
    pub stamps: usize,
    /// Length of the looped audio track.
    pub audio_secs: f64,
    pub final_stage: JobStage,
}

/// Stage bookkeeping for one running job.
#[derive(Debug)]
pub(crate) struct JobRun {
    word: String,
    stage: JobStage,
}

impl JobRun {
    pub(crate) fn start(word: &str) -> Self {
        tracing::info!(word, "job started");
        Self {
            word: word.to_owned(),
            stage: JobStage::Idle,
        }
    }

    pub(crate) fn stage(&self) -> JobStage {
        self.stage
    }

    /// Move to the next stage in order; out-of-order moves are ignored.
    pub(crate) fn advance(&mut self, to: JobStage) {
        if next_stage(self.stage) != Some(to) {
            tracing::warn!(word = %self.word, from = %self.stage, to = %to, "ignored stage change");
            return;
        }
        tracing::info!(word = %self.word, from = %self.stage, to = %to, "job stage");
        self.stage = to;
    }

    /// Enter [`JobStage::Failed`]; the returned error names the last completed stage.
    pub(crate) fn fail(&mut self, err: WordreelError) -> JobError {
        let reached = self.stage;
        tracing::error!(word = %self.word, stage = %reached, error = %err, "job failed");
        self.stage = JobStage::Failed;
        JobError::new(self.word.clone(), reached, err)
    }
}

/// Successor of `stage` on the success path; `None` for terminal stages.
pub fn next_stage(stage: JobStage) -> Option<JobStage> {
    match stage {
        JobStage::Idle => Some(JobStage::AudioProcessed),
        JobStage::AudioProcessed => Some(JobStage::FramesProduced),
        JobStage::FramesProduced => Some(JobStage::Encoded),
        JobStage::Encoded => Some(JobStage::CleanedUp),
        JobStage::CleanedUp | JobStage::Failed => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/job.rs"]
mod tests;
