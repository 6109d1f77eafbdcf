use tracing_appender::{
    non_blocking,
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber. The returned guard flushes the file
/// writer on drop and must be held for the lifetime of the process.
pub fn init_logger(component: &str, is_dev: bool) -> Option<WorkerGuard> {
    let enable_file_log = std::env::var("ENABLE_FILE_LOG")
        .map(|val| val == "true" || val == "1")
        .unwrap_or(false);

    let (file_layer, guard) = if enable_file_log {
        let log_dir = if is_dev { "./logs" } else { "/var/log/app" };

        let file_name = format!("rust_app_{component}.log");
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, file_name);
        let (file_writer, guard) = non_blocking(file_appender);

        let layer = fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .json()
            .with_filter(EnvFilter::new("info"));

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = if is_dev {
        fmt::layer()
            .pretty()
            .with_thread_names(true)
            .with_ansi(true)
            .with_filter(console_filter)
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .with_target(true)
            .with_filter(console_filter)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn non_blocking_writer_flushes_through_guard() {
        let dir = std::env::temp_dir().join(format!("logs-{}", uuid::Uuid::new_v4()));
        let appender = RollingFileAppender::new(Rotation::NEVER, &dir, "test.log");
        let (mut writer, guard) = non_blocking(appender);

        writer.write_all(b"hello\n").unwrap();
        drop(guard);

        let written = std::fs::read_to_string(dir.join("test.log")).unwrap();
        assert_eq!(written, "hello\n");
    }
}
