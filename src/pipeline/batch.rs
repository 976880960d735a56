use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use anyhow::Context;
use regex::Regex;

use crate::{
    foundation::error::{JobError, JobStage, WordreelError, WordreelResult},
    pipeline::{
        job::{JobReport, WordJob, normalize_word},
        runner::VideoPipeline,
    },
};

/// What to do when `<out-dir>/<word>.mp4` already exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverwritePolicy {
    #[default]
    Skip,
    Overwrite,
}

/// One manifest line: a word and its source assets.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ManifestEntry {
    pub word: String,
    pub audio: PathBuf,
    pub image: PathBuf,
    #[serde(default)]
    pub translations: Vec<String>,
}

/// Read a JSON array of [`ManifestEntry`].
pub fn load_manifest(path: &Path) -> WordreelResult<Vec<ManifestEntry>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read manifest '{}'", path.display()))?;
    let entries: Vec<ManifestEntry> = serde_json::from_str(&text)
        .with_context(|| format!("parse manifest '{}'", path.display()))?;
    Ok(entries)
}

pub fn output_path_for(out_dir: &Path, word: &str) -> PathBuf {
    out_dir.join(format!("{word}.mp4"))
}

#[derive(Debug)]
pub enum BatchOutcome {
    Rendered(JobReport),
    Skipped { word: String, output: PathBuf },
    Failed(JobError),
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchSummary {
    pub fn rendered(&self) -> usize {
        self.count(|o| matches!(o, BatchOutcome::Rendered(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, BatchOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, BatchOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&BatchOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// What a batch does with one manifest entry.
#[derive(Debug)]
pub enum EntryPlan {
    Render(WordJob),
    /// The normalized word's output already exists.
    Skip { word: String, output: PathBuf },
}

/// Decide whether `entry` should run, and build its job.
pub fn plan_entry(
    entry: &ManifestEntry,
    out_dir: &Path,
    policy: OverwritePolicy,
) -> Result<EntryPlan, JobError> {
    let word = normalize_word(&entry.word)
        .map_err(|e| JobError::new(entry.word.clone(), JobStage::Idle, e))?;
    let output = output_path_for(out_dir, &word);
    if policy == OverwritePolicy::Skip && output.exists() {
        return Ok(EntryPlan::Skip { word, output });
    }
    WordJob::new(
        &word,
        &entry.audio,
        &entry.image,
        entry.translations.clone(),
        output,
    )
    .map(EntryPlan::Render)
    .map_err(|e| JobError::new(word, JobStage::Idle, e))
}

/// Render every entry in order. A failed word does not stop the batch; cancellation does.
#[tracing::instrument(skip(pipeline, entries), fields(entries = entries.len(), out_dir = %out_dir.display()))]
pub fn run_batch(
    pipeline: &mut VideoPipeline,
    entries: &[ManifestEntry],
    out_dir: &Path,
    policy: OverwritePolicy,
) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for entry in entries {
        let job = match plan_entry(entry, out_dir, policy) {
            Ok(EntryPlan::Render(job)) => job,
            Ok(EntryPlan::Skip { word, output }) => {
                tracing::info!(word, output = %output.display(), "output exists, skipping");
                summary.outcomes.push(BatchOutcome::Skipped { word, output });
                continue;
            }
            Err(e) => {
                tracing::warn!(error = %e, "invalid manifest entry");
                summary.outcomes.push(BatchOutcome::Failed(e));
                continue;
            }
        };

        if policy == OverwritePolicy::Overwrite && job.output().exists() {
            tracing::info!(output = %job.output().display(), "overwriting existing output");
        }

        match pipeline.process(job) {
            Ok(report) => summary.outcomes.push(BatchOutcome::Rendered(report)),
            Err(e) => {
                let cancelled = matches!(e.source, WordreelError::Cancelled);
                summary.outcomes.push(BatchOutcome::Failed(e));
                if cancelled {
                    break;
                }
            }
        }
    }

    tracing::info!(
        rendered = summary.rendered(),
        skipped = summary.skipped(),
        failed = summary.failed(),
        "batch finished"
    );
    summary
}

/// Standalone ASCII letter runs; `\b` is Unicode-aware, so runs touching CJK letters, digits or `_`
/// do not match.
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z]+\b").expect("word pattern is valid"));

/// English words in free text, lowercased, in order of appearance.
pub fn extract_words(text: &str) -> Vec<String> {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/batch.rs"]
mod tests;
