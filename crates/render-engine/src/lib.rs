//! Streamcut Render Engine
//!
//! The deterministic half of the pipeline:
//! - **Compositor:** crop two regions per frame, stack them vertically,
//!   force the target aspect
//! - **Media backend:** the decode/encode/remux collaborators behind a
//!   trait seam, implemented on ffmpeg subprocesses
//! - **Pipeline:** the orchestrator that drives selection once and the
//!   frame loop for the whole stream

pub mod compositor;
pub mod ffmpeg;
pub mod media;
pub mod pipeline;

pub use compositor::{composite, crop_region};
pub use ffmpeg::FfmpegBackend;
pub use media::{FrameSink, FrameSource, MediaBackend, VideoMetadata};
pub use pipeline::{run_cut, CutJob};
