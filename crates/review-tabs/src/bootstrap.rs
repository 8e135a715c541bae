use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tabs_core::paths::AppPaths;
use tabs_core::settings::Settings;
use tabs_core::time_utils::format_timestamp;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{prelude::*, EnvFilter};

// ── Path bootstrap ─────────────────────────────────────────────────────────────

/// Storage locations for this invocation, honouring `--data-dir` and
/// `--log-file`.
pub fn resolve_paths(settings: &Settings) -> AppPaths {
    AppPaths::resolve(settings.data_dir.as_deref()).with_log_file(settings.log_file.as_deref())
}

/// Ensure the data directory and the log file's directory exist.
pub fn ensure_directories(paths: &AppPaths) -> anyhow::Result<()> {
    std::fs::create_dir_all(&paths.data_dir)?;
    if let Some(log_dir) = paths.log_file.parent() {
        std::fs::create_dir_all(log_dir)?;
    }
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Line format shared by the console and the log file.
///
/// Every line starts with the run's start time so that all lines of one
/// invocation group together in the appended log file. Error events carry an
/// extra `[ERROR]` tag.
#[derive(Debug, Clone)]
pub struct RunStampFormat {
    stamp: String,
}

impl RunStampFormat {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            stamp: format_timestamp(&started_at),
        }
    }
}

impl<S, N> FormatEvent<S, N> for RunStampFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        write!(writer, "[{}] ", self.stamp)?;
        if *event.metadata().level() == Level::ERROR {
            write!(writer, "[ERROR] ")?;
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Target for subcommand output. It is always enabled at INFO, whatever
/// `--log-level` says, so `status` and `stats` never print nothing.
pub const REPORT_TARGET: &str = "report";

/// Map Python-style level names onto an [`EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
pub fn level_filter(log_level: &str) -> EnvFilter {
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" | "WARN" => "warn",
        "ERROR" => "error",
        other => other,
    };
    EnvFilter::try_new(format!("{normalised},{REPORT_TARGET}=info"))
        .unwrap_or_else(|_| EnvFilter::new(format!("info,{REPORT_TARGET}=info")))
}

/// Emit a subcommand's output lines to the console and the log file.
pub fn emit_report(lines: &[String]) {
    for line in lines {
        tracing::info!(target: REPORT_TARGET, "{}", line);
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Console output goes to stdout, with warnings and errors on stderr. Every
/// line is also appended to `log_file` without ANSI colours.
pub fn setup_logging(
    log_level: &str,
    log_file: &Path,
    started_at: DateTime<Utc>,
) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;
    let format = RunStampFormat::new(started_at);

    let console = fmt::layer()
        .event_format(format.clone())
        .with_writer(std::io::stderr.with_max_level(Level::WARN).or_else(std::io::stdout));

    let file_layer = fmt::layer()
        .event_format(format)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(level_filter(log_level))
        .with(console)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
