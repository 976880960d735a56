use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{
    assets::{decode::load_subject_image, media},
    audio::{looper::loop_audio, trim::trim_silence},
    config::PipelineConfig,
    encode::ffmpeg::{EncodeOrchestrator, EncodeRequest},
    foundation::core::{Canvas, Fps, FrameIndex, FrameSpec},
    foundation::error::{JobError, JobStage, WordreelError, WordreelResult},
    foundation::math::seed_for_word,
    layout::placement::PlacementTracker,
    pipeline::{
        job::{JobReport, JobRun, WordJob},
        scratch::ScratchArea,
    },
    render::{
        compositor::{FrameAssets, FrameCompositor, FrameInputs},
        sequence::{FrameSequenceProducer, StampSchedule, plan_stamps, total_frames},
        surface::RenderSurface,
    },
    text::{
        font::{CAPTION_FONT_CANDIDATES, FontFace, WORD_FONT_CANDIDATES},
        layout::TextLayoutEngine,
    },
};

/// Frame rendering for word jobs, without the encoder.
pub struct JobRenderer {
    config: PipelineConfig,
    canvas: Canvas,
    fps: Fps,
    word_font: FontFace,
    caption_font: FontFace,
    text: TextLayoutEngine,
}

impl JobRenderer {
    /// Validate `config` and load both fonts.
    pub fn new(config: PipelineConfig) -> WordreelResult<Self> {
        config.validate()?;
        let canvas = config.canvas()?;
        let fps = config.fps()?;
        let word_font =
            FontFace::resolve(config.fonts.word_font.as_deref(), WORD_FONT_CANDIDATES)?;
        let caption_font =
            FontFace::resolve(config.fonts.caption_font.as_deref(), CAPTION_FONT_CANDIDATES)?;
        Ok(Self {
            config,
            canvas,
            fps,
            word_font,
            caption_font,
            text: TextLayoutEngine::new(),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Placement seed for `job`: the job's own, then the configured one, then one derived from the word.
    pub fn seed_for(&self, job: &WordJob) -> u64 {
        job.seed()
            .or(self.config.seed)
            .unwrap_or_else(|| seed_for_word(job.word()))
    }

    fn schedule(&self) -> StampSchedule {
        StampSchedule {
            per_second: self.config.stamps.per_second,
            min_distance: self.config.stamps.min_distance,
            max_attempts: self.config.stamps.max_attempts,
        }
    }

    fn compositor(&mut self, job: &WordJob) -> WordreelResult<FrameCompositor> {
        let image = load_subject_image(job.image())?;
        let inputs = FrameInputs {
            word: job.word(),
            translations: job.translations(),
            image: &image,
            word_font: &self.word_font,
            caption_font: &self.caption_font,
            word_size: self.config.stamps.font_size,
            status: &self.config.status,
        };
        let assets = FrameAssets::prepare(self.canvas, self.fps, &inputs, &mut self.text)?;
        Ok(FrameCompositor::new(assets))
    }

    /// Compose frame `frame` of a `total`-frame video for `job`, with stamps placed as a full render
    /// would place them.
    #[tracing::instrument(skip(self, job), fields(word = %job.word()))]
    pub fn render_preview(
        &mut self,
        job: &WordJob,
        frame: u64,
        total: u64,
    ) -> WordreelResult<RenderSurface> {
        if total == 0 || frame >= total {
            return Err(WordreelError::validation(format!(
                "preview frame {frame} is outside 0..{total}"
            )));
        }
        let compositor = self.compositor(job)?;
        let producer = FrameSequenceProducer::new(
            &compositor,
            self.fps,
            self.schedule(),
            self.config.threading.clone(),
        );

        let mut tracker = PlacementTracker::new(self.seed_for(job));
        let counts = plan_stamps(
            &mut tracker,
            frame + 1,
            self.fps,
            &self.schedule(),
            &producer.placement_request(),
        );
        let visible = counts.last().copied().unwrap_or(0);
        compositor.compose(
            &FrameSpec::new(FrameIndex(frame), total),
            &tracker.records()[..visible],
        )
    }
}

/// Turns [`WordJob`]s into pronunciation videos, one at a time.
pub struct VideoPipeline {
    renderer: JobRenderer,
    encoder: EncodeOrchestrator,
    cancel: Arc<AtomicBool>,
}

impl VideoPipeline {
    /// Validate config, load fonts and probe the encoder.
    pub fn new(config: PipelineConfig) -> WordreelResult<Self> {
        config.validate()?;
        let encoder = EncodeOrchestrator::new(config.encoder.clone())?;
        let renderer = JobRenderer::new(config)?;
        Ok(Self {
            renderer,
            encoder,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        self.renderer.config()
    }

    /// Flag that stops frame production of the running and all later jobs once set.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn reset_cancel(&self) {
        self.cancel.store(false, Ordering::Relaxed);
    }

    pub fn render_preview(
        &mut self,
        job: &WordJob,
        frame: u64,
        total: u64,
    ) -> WordreelResult<RenderSurface> {
        self.renderer.render_preview(job, frame, total)
    }

    /// Run `job` to completion. Scratch files are gone when this returns, whatever the outcome.
    #[tracing::instrument(skip(self, job), fields(word = %job.word()))]
    pub fn process(&mut self, job: WordJob) -> Result<JobReport, JobError> {
        let mut run = JobRun::start(job.word());
        let scratch = match ScratchArea::create(&self.config().scratch_root(), job.word()) {
            Ok(s) => s,
            Err(e) => return Err(run.fail(e)),
        };

        let mut report = match self.run_stages(&job, &mut run, &scratch) {
            Ok(report) => report,
            Err(e) => {
                drop(scratch);
                return Err(run.fail(e));
            }
        };

        match scratch.cleanup() {
            Ok(()) => run.advance(JobStage::CleanedUp),
            Err(e) => tracing::warn!(error = %e, "scratch cleanup failed"),
        }
        report.final_stage = run.stage();
        tracing::info!(
            output = %report.output.display(),
            frames = report.total_frames,
            stamps = report.stamps,
            "job finished"
        );
        Ok(report)
    }

    fn run_stages(
        &mut self,
        job: &WordJob,
        run: &mut JobRun,
        scratch: &ScratchArea,
    ) -> WordreelResult<JobReport> {
        let cfg = self.renderer.config().clone();

        let raw = media::decode_audio_f32(
            &cfg.encoder.ffmpeg,
            job.audio(),
            cfg.sample_rate,
            cfg.channels,
        )?;
        let trimmed = trim_silence(&raw, &cfg.silence);
        if trimmed.is_empty() {
            return Err(WordreelError::input(format!(
                "audio '{}' is silent below {} dB",
                job.audio().display(),
                cfg.silence.threshold_db
            )));
        }
        let looped = loop_audio(&trimmed, cfg.repeat_count)?;
        media::write_f32le_file(&looped, scratch.audio_path())?;
        tracing::debug!(
            raw_secs = raw.duration_secs(),
            trimmed_secs = trimmed.duration_secs(),
            looped_secs = looped.duration_secs(),
            "audio processed"
        );
        run.advance(JobStage::AudioProcessed);

        let fps = self.renderer.fps;
        let frames = total_frames(looped.frames() as u64, looped.sample_rate(), fps);
        let compositor = self.renderer.compositor(job)?;
        let producer = FrameSequenceProducer::new(
            &compositor,
            fps,
            self.renderer.schedule(),
            cfg.threading.clone(),
        );
        let mut tracker = PlacementTracker::new(self.renderer.seed_for(job));
        let sequence = producer.produce(
            frames,
            &mut tracker,
            scratch.frames_dir(),
            Some(self.cancel.as_ref()),
        )?;
        run.advance(JobStage::FramesProduced);

        self.encoder.encode(&EncodeRequest {
            frames_dir: sequence.dir.clone(),
            audio_path: scratch.audio_path().to_path_buf(),
            sample_rate: looped.sample_rate(),
            channels: looped.channels(),
            fps,
            canvas: self.renderer.canvas,
            out_path: job.output().to_path_buf(),
        })?;
        run.advance(JobStage::Encoded);

        Ok(JobReport {
            word: job.word().to_owned(),
            output: job.output().to_path_buf(),
            total_frames: sequence.total_frames,
            stamps: sequence.stamps_committed,
            audio_secs: looped.duration_secs(),
            final_stage: run.stage(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/runner.rs"]
mod tests;
