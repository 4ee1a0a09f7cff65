// src/log.rs
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "edh_scrape=info";

/// Install the global subscriber: human-readable lines on stderr and, when
/// `log_file` is given, the same events appended to that file.
///
/// `RUST_LOG` overrides the default filter. Timestamps are elapsed time since
/// start. Calling this twice keeps the first subscriber.
pub fn init(log_file: Option<&Path>) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_timer(fmt::time::uptime())
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_timer(fmt::time::uptime()).with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();
    Ok(())
}
