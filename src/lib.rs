//! wordreel renders vocabulary pronunciation videos.
//!
//! For each English word it takes a pronunciation clip, an illustration and a list of
//! translations, and produces an MP4 in which the clip repeats while the word is stamped
//! across the frame and a progress bar fills up.
//!
//! # Pipeline overview
//!
//! 1. **Audio**: decode with `ffmpeg`, trim silence, loop the clip `repeat_count` times
//! 2. **Frames**: place stamps in frame order, then composite every frame on the CPU
//!    (`vello_cpu`) and write it as a PNG into a job-owned scratch directory
//! 3. **Encode**: mux frames and processed audio into the output with the system `ffmpeg`
//! 4. **Cleanup**: scratch files are removed on every exit path
//!
//! [`VideoPipeline`] runs these stages for one [`WordJob`] at a time; [`run_batch`] drives a list
//! of jobs with a skip-if-exists policy.
#![forbid(unsafe_code)]

mod assets;
mod audio;
mod config;
mod encode;
mod foundation;
mod layout;
mod pipeline;
mod render;
mod text;

pub use assets::PreparedImage;
pub use assets::decode::{
    WATERMARK_BORDER_FRACTION, crop_watermark, decode_cropped_image, load_subject_image,
};
pub use assets::media::{decode_audio_f32, write_f32le_file};
pub use audio::buffer::AudioBuffer;
pub use audio::looper::loop_audio;
pub use audio::trim::{SilenceOpts, trim_silence};
pub use config::{FontConfig, PipelineConfig, StampConfig};
pub use encode::ffmpeg::{
    EncodeOrchestrator, EncodeRequest, EncoderSettings, ensure_parent_dir, is_ffmpeg_on_path,
};
pub use foundation::core::{Affine, Canvas, Fps, FrameIndex, FrameSpec, Point, Rect};
pub use foundation::error::{JobError, JobStage, WordreelError, WordreelResult};
pub use layout::placement::{
    MAX_ROTATION_DEG, PlacementRecord, PlacementRequest, PlacementTracker, STAMP_AREA_TOP,
    is_placement_frame, placement_interval,
};
pub use pipeline::batch::{
    BatchOutcome, BatchSummary, EntryPlan, ManifestEntry, OverwritePolicy, extract_words,
    load_manifest, output_path_for, plan_entry, run_batch,
};
pub use pipeline::job::{JobReport, WordJob, normalize_word};
pub use pipeline::runner::{JobRenderer, VideoPipeline};
pub use pipeline::scratch::ScratchArea;
pub use render::blur::blur_mask;
pub use render::compositor::{
    BACKGROUND, FrameAssets, FrameCompositor, FrameInputs, ProgressBarGeometry, StatusTexts,
};
pub use render::sequence::{
    FRAME_PATTERN, FrameSequence, FrameSequenceProducer, RenderThreading, StampSchedule,
    frame_file_name, plan_stamps, total_frames,
};
pub use render::surface::RenderSurface;
pub use text::font::{
    CAPTION_FONT_CANDIDATES, FontFace, WORD_FONT_CANDIDATES, find_font,
};
pub use text::layout::{PreparedText, TextBrushRgba8, TextLayoutEngine, truncate_chars};
