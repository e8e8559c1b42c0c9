//! The cut pipeline: select two regions once, composite every frame.
//!
//! Strictly sequential: each selection blocks until the operator answers,
//! then the frame loop runs to EOF. The intermediate visual-only stream
//! lives at a scoped temp path that is removed on every exit path, so a
//! failed run leaves nothing on disk.

use std::path::{Path, PathBuf};
use std::time::Instant;

use streamcut_clip_model::{Region, TargetAspect};
use streamcut_common::{StreamcutError, StreamcutResult};
use streamcut_selection_core::{select_region, SelectionSurface};

use crate::compositor::{composite, crop_region};
use crate::media::{MediaBackend, VideoMetadata};

/// One cut run: a source video in, a composited clip out.
#[derive(Debug, Clone)]
pub struct CutJob {
    /// The source video.
    pub input: PathBuf,

    /// The output video path.
    pub output: PathBuf,

    /// Exact output dimensions.
    pub aspect: TargetAspect,
}

/// A temp-file path that is deleted when the guard drops.
struct TempArtifact {
    path: PathBuf,
}

impl TempArtifact {
    fn new(prefix: &str, extension: &str) -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(0);
        let path = std::env::temp_dir().join(format!(
            "{prefix}-{}-{nanos}.{extension}",
            std::process::id()
        ));
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        if self.path.exists() {
            if let Err(err) = std::fs::remove_file(&self.path) {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Failed to remove intermediate stream"
                );
            }
        }
    }
}

/// Run the full cut pipeline.
///
/// Fatal on every taxonomy error: the run either writes a complete output
/// file or leaves no file behind.
pub async fn run_cut(
    job: CutJob,
    backend: &dyn MediaBackend,
    surface: &mut dyn SelectionSurface,
) -> StreamcutResult<()> {
    let started = Instant::now();

    if !job.input.exists() {
        return Err(StreamcutError::FileNotFound {
            path: job.input.clone(),
        });
    }
    if !backend.is_available() {
        return Err(StreamcutError::unsupported(format!(
            "Media backend '{}' is not available on this system",
            backend.name()
        )));
    }

    tracing::info!(
        backend = backend.name(),
        input = %job.input.display(),
        output = %job.output.display(),
        aspect = %job.aspect,
        "Starting cut"
    );

    let metadata = backend.probe(&job.input)?;
    tracing::info!(
        width = metadata.width,
        height = metadata.height,
        fps = metadata.fps,
        frames = ?metadata.frame_count,
        "Source probed"
    );

    let mut source = backend.open_source(&job.input)?;
    let reference = source
        .next_frame()?
        .ok_or_else(|| StreamcutError::EmptySource {
            path: job.input.clone(),
        })?;

    // Both selections run against the same reference frame. Order matters:
    // the webcam region is always stacked above the gamefeed region.
    let webcam = select_region(surface, &reference, "webcam")?;
    let gamefeed = select_region(surface, &reference, "gamefeed")?;
    tracing::info!(?webcam, ?gamefeed, "Regions locked for the frame loop");

    if let Some(parent) = job.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let intermediate = TempArtifact::new("streamcut-visual", "mp4");
    let mut sink = backend.create_sink(intermediate.path(), job.aspect, metadata.fps)?;

    let mut frames_read = 0u64;
    let mut frames_written = 0u64;
    let mut frame = Some(reference);
    while let Some(current) = frame {
        frames_read += 1;
        let webcam_crop = crop_region(&current, &webcam)?;
        let gamefeed_crop = crop_region(&current, &gamefeed)?;
        let composed = composite(&[webcam_crop, gamefeed_crop], job.aspect)?;
        sink.write_frame(&composed)?;
        frames_written += 1;
        frame = source.next_frame()?;
    }
    sink.finish()?;
    tracing::info!(frames_read, frames_written, "Intermediate stream complete");

    if let Err(err) = backend.remux(intermediate.path(), &job.input, &job.output) {
        // No partial output may survive a failed merge.
        if job.output.exists() {
            if let Err(rm_err) = std::fs::remove_file(&job.output) {
                tracing::warn!(
                    path = %job.output.display(),
                    error = %rm_err,
                    "Failed to remove partial output"
                );
            }
        }
        return Err(err);
    }

    write_debug_report(
        &job,
        &metadata,
        &webcam,
        &gamefeed,
        frames_read,
        frames_written,
        started.elapsed().as_secs_f64(),
    );

    tracing::info!(
        elapsed_secs = started.elapsed().as_secs_f64(),
        output = %job.output.display(),
        "Cut finished"
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn write_debug_report(
    job: &CutJob,
    metadata: &VideoMetadata,
    webcam: &Region,
    gamefeed: &Region,
    frames_read: u64,
    frames_written: u64,
    elapsed_secs: f64,
) {
    let report = format!(
        "written_at={}\ninput={}\noutput={}\naspect={}\nsource={}x{}@{:.3}fps\n\
         container_frames={:?}\nwebcam_region={:?}\ngamefeed_region={:?}\n\
         frames_read={}\nframes_written={}\nelapsed_secs={:.3}\n",
        chrono::Utc::now().to_rfc3339(),
        job.input.display(),
        job.output.display(),
        job.aspect,
        metadata.width,
        metadata.height,
        metadata.fps,
        metadata.frame_count,
        webcam,
        gamefeed,
        frames_read,
        frames_written,
        elapsed_secs,
    );

    let report_path = job.output.with_extension("debug.txt");
    if let Err(err) = std::fs::write(&report_path, &report) {
        tracing::warn!(error = %err, path = %report_path.display(), "Failed to write debug report");
    } else {
        tracing::debug!(path = %report_path.display(), "Wrote debug report");
    }
}
