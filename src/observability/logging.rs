use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

use crate::config::Config;

/// Initializes the logging system: everything down to DEBUG goes to the log
/// file, INFO and above is echoed to stdout.
///
/// The returned guard flushes the file writer when dropped; hold it for the
/// life of the process.
pub fn init_logging(config: &Config) -> io::Result<WorkerGuard> {
    let file_appender = open_log_file(&config.log_file)?;
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(non_blocking_writer);

    let console_layer = config.console.then(|| {
        fmt::layer()
            .without_time()
            .with_target(false)
            .with_level(false)
            .with_writer(std::io::stdout)
            .with_filter(LevelFilter::INFO)
    });

    // Respect RUST_LOG if set; otherwise debug for our crate
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rate_converter=debug,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(guard)
}

/// Open (append) the log file, creating its directory as needed
fn open_log_file(path: &Path) -> io::Result<RollingFileAppender> {
    let (dir, file_name) = split_log_path(path);
    fs::create_dir_all(dir)?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy().into_owned())
        .build(dir)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

fn split_log_path(path: &Path) -> (&Path, &std::ffi::OsStr) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new(crate::constants::DEFAULT_LOG_FILE));
    (dir, file_name)
}
