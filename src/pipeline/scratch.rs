use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context;

use crate::foundation::error::WordreelResult;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Job-owned frame directory and processed audio file.
///
/// Both are removed when the guard drops, so every exit path of a job cleans up, including
/// unwinding. [`ScratchArea::cleanup`] does the same eagerly and reports failures.
#[derive(Debug)]
pub struct ScratchArea {
    frames_dir: PathBuf,
    audio_path: PathBuf,
    removed: bool,
}

impl ScratchArea {
    /// Reserve unique paths under `root` and create the frame directory.
    pub fn create(root: &Path, word: &str) -> WordreelResult<Self> {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let seq = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let stem = format!("wordreel_{word}_{}_{nanos}_{seq}", std::process::id());

        let frames_dir = root.join(format!("{stem}_frames"));
        let audio_path = root.join(format!("{stem}.f32le"));
        std::fs::create_dir_all(&frames_dir)
            .with_context(|| format!("create scratch dir '{}'", frames_dir.display()))?;

        tracing::debug!(dir = %frames_dir.display(), "scratch area created");
        Ok(Self {
            frames_dir,
            audio_path,
            removed: false,
        })
    }

    pub fn frames_dir(&self) -> &Path {
        &self.frames_dir
    }

    pub fn audio_path(&self) -> &Path {
        &self.audio_path
    }

    /// Remove both artifacts now. Both removals are attempted; the first failure is returned.
    pub fn cleanup(mut self) -> WordreelResult<()> {
        let frames = remove_dir_if_exists(&self.frames_dir);
        let audio = remove_file_if_exists(&self.audio_path);
        self.removed = true;
        frames.and(audio)
    }
}

impl Drop for ScratchArea {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(e) = remove_dir_if_exists(&self.frames_dir) {
            tracing::warn!(error = %e, "failed to remove scratch frames");
        }
        if let Err(e) = remove_file_if_exists(&self.audio_path) {
            tracing::warn!(error = %e, "failed to remove scratch audio");
        }
    }
}

fn remove_dir_if_exists(path: &Path) -> WordreelResult<()> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("remove '{}'", path.display()))
            .into()),
    }
}

fn remove_file_if_exists(path: &Path) -> WordreelResult<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("remove '{}'", path.display()))
            .into()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/scratch.rs"]
mod tests;
