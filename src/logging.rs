use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

use crate::config;

/// Initialize tracing: JSON lines to the log file, warnings and errors to stderr.
///
/// `RUST_LOG` overrides the default filter. The returned guard flushes the
/// file writer when dropped and must be kept alive until exit.
pub fn init(verbose: bool) -> anyhow::Result<WorkerGuard> {
    let log_path = config::log_path();
    let directory = log_path
        .parent()
        .map(|dir| dir.to_path_buf())
        .unwrap_or_else(config::data_dir);
    std::fs::create_dir_all(&directory)?;

    let file_name = log_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("log path has no file name: {}", log_path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        &directory, file_name,
    ));

    let default_directive = if verbose {
        "version_it=debug"
    } else {
        "version_it=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let file_layer = fmt::layer()
        .json()
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(env_filter);
    let stderr_layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(if verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;
    Ok(guard)
}
