//! Trait seams for the external media collaborators.
//!
//! Decode, encode, and remux are opaque services to the pipeline: any
//! backend that can hand over frames and merge tracks will do. The ffmpeg
//! implementation lives in [`crate::ffmpeg`]; tests substitute in-memory
//! backends.

use std::path::Path;

use streamcut_clip_model::{Frame, TargetAspect};
use streamcut_common::StreamcutResult;

/// Probed properties of a video stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    /// Playback rate in frames per second.
    pub fps: f64,
    /// Container-reported frame count, when the container knows it.
    /// Informational only; the frame loop runs to EOF regardless.
    pub frame_count: Option<u64>,
}

/// A sequential reader of decoded frames.
pub trait FrameSource {
    fn metadata(&self) -> VideoMetadata;

    /// The next decoded frame, or `None` at clean end of stream.
    fn next_frame(&mut self) -> StreamcutResult<Option<Frame>>;
}

/// A sequential writer of composited frames into a video-only stream.
pub trait FrameSink {
    fn write_frame(&mut self, frame: &Frame) -> StreamcutResult<()>;

    /// Flush and shut down the encoder. Must be called before the stream
    /// is consumed elsewhere.
    fn finish(&mut self) -> StreamcutResult<()>;
}

/// The full set of media collaborators the pipeline needs.
pub trait MediaBackend {
    /// Probe a source's dimensions, frame rate, and frame count.
    fn probe(&self, path: &Path) -> StreamcutResult<VideoMetadata>;

    /// Open a source for sequential frame decoding.
    fn open_source(&self, path: &Path) -> StreamcutResult<Box<dyn FrameSource>>;

    /// Create a video-only sink at the given dimensions and frame rate.
    fn create_sink(
        &self,
        path: &Path,
        aspect: TargetAspect,
        fps: f64,
    ) -> StreamcutResult<Box<dyn FrameSink>>;

    /// Merge the visual track of `visual` with the audio track of
    /// `audio_source` into `output`.
    fn remux(&self, visual: &Path, audio_source: &Path, output: &Path) -> StreamcutResult<()>;

    /// Whether this backend's tooling is present on the system.
    fn is_available(&self) -> bool;

    /// Backend name for logs.
    fn name(&self) -> &str;
}
