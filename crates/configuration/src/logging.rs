use crate::error::ConfigError;
use crate::settings::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Installs the global tracing subscriber for one run of a command.
///
/// Log lines are appended to `<directory>/<file_stem>.log` (never rotated) and,
/// when enabled, echoed to stderr. Console output goes through the indicatif
/// layer, which draws span progress bars and suspends them while a log line
/// is written.
///
/// The returned guard flushes the file writer on drop; keep it alive until the
/// process exits.
pub fn init_logging(settings: &LoggingSettings, file_stem: &str) -> Result<WorkerGuard, ConfigError> {
    std::fs::create_dir_all(&settings.directory).map_err(|e| {
        ConfigError::LoggingError(format!(
            "cannot create log directory {}: {e}",
            settings.directory.display()
        ))
    })?;

    let file_appender =
        tracing_appender::rolling::never(&settings.directory, format!("{file_stem}.log"));
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| ConfigError::LoggingError(e.to_string()))?;

    let file_layer = fmt::layer()
        .with_timer(LocalTime::rfc_3339())
        .with_ansi(false)
        .with_target(false)
        .with_writer(file_writer);

    let indicatif_layer = settings.console.then(|| IndicatifLayer::new());
    let console_layer = indicatif_layer.as_ref().map(|indicatif| {
        fmt::layer()
            .with_timer(LocalTime::rfc_3339())
            .with_target(false)
            .with_writer(indicatif.get_stderr_writer())
            .boxed()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .with(indicatif_layer)
        .try_init()
        .map_err(|e| ConfigError::LoggingError(e.to_string()))?;

    Ok(guard)
}
