//! Check system capabilities.

use std::process::{Command, Stdio};

use streamcut_render_engine::{FfmpegBackend, MediaBackend};

pub fn run() -> anyhow::Result<()> {
    println!("Streamcut System Check");
    println!("{}", "=".repeat(50));

    let ffmpeg = binary_available("ffmpeg");
    let ffprobe = binary_available("ffprobe");

    println!(
        "[{}] ffmpeg: {}",
        if ffmpeg { "OK" } else { "MISSING" },
        if ffmpeg {
            "found on PATH"
        } else {
            "not found (install ffmpeg)"
        }
    );
    println!(
        "[{}] ffprobe: {}",
        if ffprobe { "OK" } else { "MISSING" },
        if ffprobe {
            "found on PATH"
        } else {
            "not found (ships with ffmpeg)"
        }
    );

    let backend = FfmpegBackend::new();
    println!();
    if backend.is_available() {
        println!(
            "Media backend '{}' is ready. Streamcut can cut clips.",
            backend.name()
        );
    } else {
        println!("The media backend is unavailable. See above for fixes.");
    }

    Ok(())
}

fn binary_available(binary: &str) -> bool {
    Command::new(binary)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
