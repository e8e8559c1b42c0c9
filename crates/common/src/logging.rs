//! Logging and tracing initialization.

use std::sync::Arc;

use crate::config::LoggingConfig;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level is scoped to
/// the streamcut crates with dependencies capped at `warn`. A configured
/// log file receives the same stream instead of stderr.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(&config.level)));
    let builder = fmt::Subscriber::builder().with_env_filter(env_filter);

    let file = config.file.as_ref().and_then(|path| {
        match std::fs::OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(file),
            Err(err) => {
                eprintln!("failed to open log file {}: {err}", path.display());
                None
            }
        }
    });

    let result = match (config.json, file) {
        (true, Some(file)) => tracing::subscriber::set_global_default(
            builder.json().with_writer(Arc::new(file)).finish(),
        ),
        (true, None) => tracing::subscriber::set_global_default(builder.json().finish()),
        (false, Some(file)) => tracing::subscriber::set_global_default(
            builder.with_ansi(false).with_writer(Arc::new(file)).finish(),
        ),
        (false, None) => {
            tracing::subscriber::set_global_default(builder.with_target(true).finish())
        }
    };
    result.ok();
}

/// Expand a bare level like `debug` into streamcut-scoped directives.
/// A value that already carries directives (`,` or `=`) passes through.
fn filter_directives(level: &str) -> String {
    if level.contains(['=', ',']) {
        return level.to_string();
    }
    [
        "streamcut",
        "streamcut_common",
        "streamcut_clip_model",
        "streamcut_selection_core",
        "streamcut_render_engine",
    ]
    .iter()
    .fold("warn".to_string(), |acc, target| {
        format!("{acc},{target}={level}")
    })
}
