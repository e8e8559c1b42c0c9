//! ffmpeg-subprocess implementation of the media backend.
//!
//! Decoding streams raw rgb24 frames out of an ffmpeg pipe; encoding
//! streams raw frames into one. Stderr is drained on a helper thread so a
//! chatty ffmpeg can never deadlock on a full pipe.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::thread::JoinHandle;

use streamcut_clip_model::{Frame, TargetAspect};
use streamcut_common::{StreamcutError, StreamcutResult};

use crate::media::{FrameSink, FrameSource, MediaBackend, VideoMetadata};

/// Media backend built on the system `ffmpeg`/`ffprobe` binaries.
#[derive(Debug, Clone)]
pub struct FfmpegBackend {
    video_bitrate_kbps: u32,
}

impl FfmpegBackend {
    pub fn new() -> Self {
        Self {
            video_bitrate_kbps: 8000,
        }
    }

    pub fn with_bitrate(video_bitrate_kbps: u32) -> Self {
        Self {
            video_bitrate_kbps: video_bitrate_kbps.max(1000),
        }
    }
}

impl Default for FfmpegBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaBackend for FfmpegBackend {
    fn probe(&self, path: &Path) -> StreamcutResult<VideoMetadata> {
        let output = Command::new("ffprobe")
            .args([
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=width,height,r_frame_rate,nb_frames",
                "-of",
                "csv=p=0",
            ])
            .arg(path)
            .output()
            .map_err(|e| StreamcutError::probe(format!("Failed to start ffprobe: {e}")))?;

        if !output.status.success() {
            return Err(StreamcutError::probe(format!(
                "ffprobe failed for {}: {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let raw = String::from_utf8_lossy(&output.stdout);
        parse_probe_line(raw.lines().next().unwrap_or("")).ok_or_else(|| {
            StreamcutError::probe(format!(
                "Unparseable ffprobe output for {}: {}",
                path.display(),
                raw.trim()
            ))
        })
    }

    fn open_source(&self, path: &Path) -> StreamcutResult<Box<dyn FrameSource>> {
        let metadata = self.probe(path)?;

        let mut child = Command::new("ffmpeg")
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-i")
            .arg(path)
            .arg("-f")
            .arg("rawvideo")
            .arg("-pix_fmt")
            .arg("rgb24")
            .arg("-")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| StreamcutError::decode(format!("Failed to start ffmpeg: {e}")))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| StreamcutError::decode("Failed to capture ffmpeg stdout"))?;
        let stderr_task = drain_stderr(&mut child)?;

        tracing::debug!(
            pid = child.id(),
            input = %path.display(),
            "ffmpeg decoder started"
        );

        Ok(Box::new(FfmpegFrameSource {
            metadata,
            stdout,
            child: Some(child),
            stderr_task: Some(stderr_task),
        }))
    }

    fn create_sink(
        &self,
        path: &Path,
        aspect: TargetAspect,
        fps: f64,
    ) -> StreamcutResult<Box<dyn FrameSink>> {
        let mut child = Command::new("ffmpeg")
            .arg("-y")
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-f")
            .arg("rawvideo")
            .arg("-pix_fmt")
            .arg("rgb24")
            .arg("-s")
            .arg(format!("{}x{}", aspect.width, aspect.height))
            .arg("-r")
            .arg(format!("{fps:.6}"))
            .arg("-i")
            .arg("-")
            .arg("-an")
            .arg("-c:v")
            .arg("libx264")
            .arg("-preset")
            .arg("medium")
            .arg("-pix_fmt")
            .arg("yuv420p")
            .arg("-b:v")
            .arg(format!("{}k", self.video_bitrate_kbps))
            .arg(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| StreamcutError::encode(format!("Failed to start ffmpeg: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| StreamcutError::encode("Failed to capture ffmpeg stdin"))?;
        let stderr_task = drain_stderr(&mut child)?;

        tracing::debug!(
            pid = child.id(),
            output = %path.display(),
            width = aspect.width,
            height = aspect.height,
            fps,
            "ffmpeg encoder started"
        );

        Ok(Box::new(FfmpegFrameSink {
            aspect,
            stdin: Some(stdin),
            child: Some(child),
            stderr_task: Some(stderr_task),
        }))
    }

    fn remux(&self, visual: &Path, audio_source: &Path, output: &Path) -> StreamcutResult<()> {
        // Stream-copy both tracks; the intermediate is already h264 and the
        // original audio passes through untouched. -shortest bounds the
        // duration by the shorter of the two tracks.
        let result = Command::new("ffmpeg")
            .arg("-y")
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-i")
            .arg(audio_source)
            .arg("-i")
            .arg(visual)
            .arg("-map")
            .arg("1:v:0")
            .arg("-map")
            .arg("0:a:0?")
            .arg("-c")
            .arg("copy")
            .arg("-shortest")
            .arg(output)
            .output()
            .map_err(|e| StreamcutError::remux(format!("Failed to start ffmpeg: {e}")))?;

        if !result.status.success() {
            return Err(StreamcutError::remux(format!(
                "ffmpeg remux failed (status {}): {}",
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }

        Ok(())
    }

    fn is_available(&self) -> bool {
        command_exists("ffmpeg") && command_exists("ffprobe")
    }

    fn name(&self) -> &str {
        "ffmpeg"
    }
}

struct FfmpegFrameSource {
    metadata: VideoMetadata,
    stdout: ChildStdout,
    child: Option<Child>,
    stderr_task: Option<JoinHandle<String>>,
}

impl FrameSource for FfmpegFrameSource {
    fn metadata(&self) -> VideoMetadata {
        self.metadata
    }

    fn next_frame(&mut self) -> StreamcutResult<Option<Frame>> {
        let frame_len = self.metadata.width as usize * self.metadata.height as usize * 3;
        let mut buffer = vec![0u8; frame_len];
        let mut filled = 0usize;

        while filled < frame_len {
            match self.stdout.read(&mut buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(StreamcutError::decode(format!(
                        "Failed reading decoded frames: {e}"
                    )))
                }
            }
        }

        if filled == 0 {
            self.shutdown()?;
            return Ok(None);
        }
        if filled < frame_len {
            return Err(StreamcutError::decode(format!(
                "Truncated frame: got {filled} of {frame_len} bytes"
            )));
        }

        Frame::from_raw(self.metadata.width, self.metadata.height, buffer)
            .map(Some)
            .ok_or_else(|| StreamcutError::decode("Frame buffer size mismatch"))
    }
}

impl FfmpegFrameSource {
    /// Reap the decoder after clean EOF and surface any late errors.
    fn shutdown(&mut self) -> StreamcutResult<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let status = child
            .wait()
            .map_err(|e| StreamcutError::decode(format!("Failed to wait on ffmpeg: {e}")))?;
        let stderr_output = join_stderr(self.stderr_task.take());

        if !status.success() {
            return Err(StreamcutError::decode(format!(
                "ffmpeg decode failed (status {status}): {}",
                stderr_output.trim()
            )));
        }
        Ok(())
    }
}

impl Drop for FfmpegFrameSource {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

struct FfmpegFrameSink {
    aspect: TargetAspect,
    stdin: Option<ChildStdin>,
    child: Option<Child>,
    stderr_task: Option<JoinHandle<String>>,
}

impl FrameSink for FfmpegFrameSink {
    fn write_frame(&mut self, frame: &Frame) -> StreamcutResult<()> {
        if frame.width() != self.aspect.width || frame.height() != self.aspect.height {
            return Err(StreamcutError::encode(format!(
                "Frame is {}x{} but the sink expects {}",
                frame.width(),
                frame.height(),
                self.aspect
            )));
        }

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| StreamcutError::encode("Sink already finished"))?;
        stdin
            .write_all(frame.as_raw())
            .map_err(|e| StreamcutError::encode(format!("Failed writing frame: {e}")))
    }

    fn finish(&mut self) -> StreamcutResult<()> {
        // Closing stdin signals EOF so the encoder can flush.
        drop(self.stdin.take());

        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let status = child
            .wait()
            .map_err(|e| StreamcutError::encode(format!("Failed to wait on ffmpeg: {e}")))?;
        let stderr_output = join_stderr(self.stderr_task.take());

        if !status.success() {
            return Err(StreamcutError::encode(format!(
                "ffmpeg encode failed (status {status}): {}",
                stderr_output.trim()
            )));
        }
        Ok(())
    }
}

impl Drop for FfmpegFrameSink {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Drain stderr concurrently to avoid ffmpeg blocking on a full pipe.
fn drain_stderr(child: &mut Child) -> StreamcutResult<JoinHandle<String>> {
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| StreamcutError::decode("Failed to capture ffmpeg stderr"))?;
    Ok(std::thread::spawn(move || {
        let mut output = String::new();
        let mut reader = std::io::BufReader::new(stderr);
        match reader.read_to_string(&mut output) {
            Ok(_) => output,
            Err(err) => format!("<failed to read ffmpeg stderr: {err}>"),
        }
    }))
}

fn join_stderr(task: Option<JoinHandle<String>>) -> String {
    task.and_then(|t| t.join().ok())
        .unwrap_or_else(|| "<failed to join stderr reader>".to_string())
}

fn parse_probe_line(line: &str) -> Option<VideoMetadata> {
    let mut fields = line.trim().split(',');
    let width = fields.next()?.parse::<u32>().ok()?;
    let height = fields.next()?.parse::<u32>().ok()?;
    let fps = parse_frame_rate(fields.next()?)?;
    let frame_count = fields.next().and_then(|f| f.parse::<u64>().ok());

    Some(VideoMetadata {
        width,
        height,
        fps,
        frame_count,
    })
}

/// Parse an ffprobe rational frame rate such as `30000/1001` or `30/1`.
fn parse_frame_rate(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let fps = match raw.split_once('/') {
        Some((num, den)) => {
            let num = num.parse::<f64>().ok()?;
            let den = den.parse::<f64>().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => raw.parse::<f64>().ok()?,
    };
    (fps.is_finite() && fps > 0.0).then_some(fps)
}

fn command_exists(binary: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {binary} >/dev/null 2>&1"))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
