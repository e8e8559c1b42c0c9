//! Run the cut pipeline, interactively or from a scripted event file.

use std::path::PathBuf;

use streamcut_clip_model::{parse_events, TargetAspect};
use streamcut_common::AppConfig;
use streamcut_render_engine::{run_cut, CutJob, FfmpegBackend};
use streamcut_selection_core::ScriptedSurface;

use crate::window;

pub fn run(
    input: PathBuf,
    output: PathBuf,
    aspect: Option<TargetAspect>,
    events: Option<PathBuf>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let aspect = match aspect {
        Some(aspect) => aspect,
        None => TargetAspect::new(config.output.width, config.output.height)
            .map_err(|e| anyhow::anyhow!("Bad configured output size: {e}"))?,
    };

    let backend = FfmpegBackend::with_bitrate(config.output.video_bitrate_kbps);
    let job = CutJob {
        input,
        output: output.clone(),
        aspect,
    };

    match events {
        Some(script) => {
            let jsonl = std::fs::read_to_string(&script)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", script.display()))?;
            let events = parse_events(&jsonl)
                .map_err(|e| anyhow::anyhow!("Bad event script {}: {e}", script.display()))?;
            let mut surface = ScriptedSurface::new(events);

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_cut(job, &backend, &mut surface))?;
        }
        None => window::run_windowed(job, backend)?,
    }

    println!("Wrote {}", output.display());
    Ok(())
}
