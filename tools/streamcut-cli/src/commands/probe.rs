//! Show source video information.

use std::path::PathBuf;

use streamcut_render_engine::{FfmpegBackend, MediaBackend};

pub fn run(input: PathBuf) -> anyhow::Result<()> {
    let backend = FfmpegBackend::new();
    let metadata = backend
        .probe(&input)
        .map_err(|e| anyhow::anyhow!("Failed to probe {}: {e}", input.display()))?;

    println!("Source: {}", input.display());
    println!("  Resolution: {}x{}", metadata.width, metadata.height);
    println!("  Frame rate: {:.3} fps", metadata.fps);
    match metadata.frame_count {
        Some(count) => println!("  Frames: {count}"),
        None => println!("  Frames: unknown"),
    }

    Ok(())
}
