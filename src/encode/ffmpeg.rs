use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::{
    foundation::core::{Canvas, Fps},
    foundation::error::{WordreelError, WordreelResult},
    render::sequence::FRAME_PATTERN,
};

/// How the external encoder is invoked.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EncoderSettings {
    /// `ffmpeg` binary; a bare name is looked up on `PATH`.
    pub ffmpeg: PathBuf,
    pub video_codec: String,
    pub audio_codec: String,
    pub crf: u8,
    pub audio_bitrate_kbps: u32,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            video_codec: "libx264".to_owned(),
            audio_codec: "aac".to_owned(),
            crf: 23,
            audio_bitrate_kbps: 192,
        }
    }
}

impl EncoderSettings {
    pub fn validate(&self) -> WordreelResult<()> {
        if self.ffmpeg.as_os_str().is_empty() {
            return Err(WordreelError::validation("encoder ffmpeg path must be non-empty"));
        }
        if self.video_codec.trim().is_empty() || self.audio_codec.trim().is_empty() {
            return Err(WordreelError::validation("encoder codecs must be non-empty"));
        }
        if self.crf > 51 {
            return Err(WordreelError::validation("encoder crf must be in 0..=51"));
        }
        if self.audio_bitrate_kbps == 0 {
            return Err(WordreelError::validation(
                "encoder audio bitrate must be non-zero",
            ));
        }
        Ok(())
    }
}

/// Inputs and output of one encode.
#[derive(Clone, Debug)]
pub struct EncodeRequest {
    /// Directory holding `frame_000000.png`, `frame_000001.png`, ...
    pub frames_dir: PathBuf,
    /// Raw interleaved `f32le` samples.
    pub audio_path: PathBuf,
    pub sample_rate: u32,
    pub channels: u16,
    pub fps: Fps,
    pub canvas: Canvas,
    pub out_path: PathBuf,
}

impl EncodeRequest {
    pub fn validate(&self) -> WordreelResult<()> {
        if !self.canvas.width.is_multiple_of(2) || !self.canvas.height.is_multiple_of(2) {
            return Err(WordreelError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(WordreelError::validation("encode fps must be non-zero"));
        }
        if self.sample_rate == 0 || self.channels == 0 {
            return Err(WordreelError::validation(
                "encode audio sample rate/channels must be non-zero",
            ));
        }
        Ok(())
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    probe(Path::new("ffmpeg")).is_ok()
}

fn probe(ffmpeg: &Path) -> Result<(), String> {
    match Command::new(ffmpeg)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(s) if s.success() => Ok(()),
        Ok(s) => Err(format!("'{} -version' exited with {s}", ffmpeg.display())),
        Err(e) => Err(format!("failed to run '{}': {e}", ffmpeg.display())),
    }
}

pub fn ensure_parent_dir(path: &Path) -> WordreelResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Runs the encoder once per job, after all frames exist.
#[derive(Clone, Debug)]
pub struct EncodeOrchestrator {
    settings: EncoderSettings,
}

impl EncodeOrchestrator {
    /// Validate `settings` and check that the encoder binary runs.
    pub fn new(settings: EncoderSettings) -> WordreelResult<Self> {
        settings.validate()?;
        probe(&settings.ffmpeg).map_err(WordreelError::encoder_unavailable)?;
        tracing::debug!(ffmpeg = %settings.ffmpeg.display(), "encoder available");
        Ok(Self { settings })
    }

    /// Full argument list passed to `ffmpeg` for `req`.
    pub fn build_args(&self, req: &EncodeRequest) -> Vec<OsString> {
        let s = &self.settings;
        let framerate = if req.fps.den == 1 {
            req.fps.num.to_string()
        } else {
            format!("{}/{}", req.fps.num, req.fps.den)
        };

        let mut args: Vec<OsString> = Vec::with_capacity(40);
        let mut push = |a: &str| args.push(OsString::from(a));
        push("-y");
        push("-loglevel");
        push("error");
        push("-framerate");
        push(&framerate);
        push("-i");
        args.push(req.frames_dir.join(FRAME_PATTERN).into_os_string());

        for a in [
            "-f".to_owned(),
            "f32le".to_owned(),
            "-ar".to_owned(),
            req.sample_rate.to_string(),
            "-ac".to_owned(),
            req.channels.to_string(),
            "-i".to_owned(),
        ] {
            args.push(a.into());
        }
        args.push(req.audio_path.clone().into_os_string());

        for a in [
            "-c:v".to_owned(),
            s.video_codec.clone(),
            "-crf".to_owned(),
            s.crf.to_string(),
            "-c:a".to_owned(),
            s.audio_codec.clone(),
            "-b:a".to_owned(),
            format!("{}k", s.audio_bitrate_kbps),
            "-vf".to_owned(),
            format!("scale={}:{}", req.canvas.width, req.canvas.height),
            "-pix_fmt".to_owned(),
            "yuv420p".to_owned(),
            "-movflags".to_owned(),
            "+faststart".to_owned(),
            "-shortest".to_owned(),
        ] {
            args.push(a.into());
        }
        args.push(req.out_path.clone().into_os_string());
        args
    }

    /// Mux frames and audio into `req.out_path`.
    #[tracing::instrument(skip(self, req), fields(out = %req.out_path.display()))]
    pub fn encode(&self, req: &EncodeRequest) -> WordreelResult<()> {
        req.validate()?;
        ensure_parent_dir(&req.out_path)?;

        let output = Command::new(&self.settings.ffmpeg)
            .args(self.build_args(req))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| WordreelError::encode(format!("failed to spawn ffmpeg: {e}")))?;

        if !output.status.success() {
            if let Err(e) = std::fs::remove_file(&req.out_path)
                && e.kind() != std::io::ErrorKind::NotFound
            {
                tracing::warn!(error = %e, "failed to remove partial output");
            }
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(WordreelError::encode(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        tracing::info!("video encoded");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
