//! Logging setup for the command-line tool.
//!
//! The plain logger writes `[  0.012s  WARN dataset] message` to stderr, the
//! last field naming the workspace crate that emitted the record. Records
//! from other crates are dropped. With the `tracing` feature, [`init_tracing`]
//! installs a `tracing` subscriber with the same default filtering.

use log::{LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

/// Crate prefix shared by every target of this workspace.
const WORKSPACE_TARGET: &str = "shoulder_isb";

/// Short crate name of a workspace target, `None` for foreign targets.
///
/// `shoulder_isb_dataset::validator` gives `dataset`; the facade and the
/// binary keep their full name.
fn workspace_crate(target: &str) -> Option<&str> {
    let krate = target.split("::").next().unwrap_or(target);
    match krate.strip_prefix(WORKSPACE_TARGET)? {
        "" => Some(krate),
        rest => rest.strip_prefix('_'),
    }
}

struct WorkspaceLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for WorkspaceLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && workspace_crate(metadata.target()).is_some()
    }

    fn log(&self, record: &Record) {
        let Some(krate) = workspace_crate(record.target()) else {
            return;
        };
        if record.level() > self.level {
            return;
        }
        let _ = writeln!(
            std::io::stderr().lock(),
            "[{:7.3}s {:>5} {krate}] {}",
            self.started.elapsed().as_secs_f64(),
            record.level(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<WorkspaceLogger> = OnceLock::new();

/// Install the stderr logger at `level`.
///
/// Only the first call installs anything; later calls return `Ok(())`.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| WorkspaceLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// `RUST_LOG` when set, otherwise the workspace crates at `level`.
#[cfg(feature = "tracing")]
fn tracing_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{WORKSPACE_TARGET}={}",
            level.as_str().to_ascii_lowercase()
        ))
    })
}

/// Install a `tracing` subscriber on stderr, JSON lines when `json` is set.
///
/// Row spans are reported when they close.
#[cfg(feature = "tracing")]
pub fn init_tracing(level: LevelFilter, json: bool) {
    let builder = fmt()
        .with_env_filter(tracing_filter(level))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_targets_are_shortened() {
        assert_eq!(
            workspace_crate("shoulder_isb_dataset::validator::pipeline"),
            Some("dataset")
        );
        assert_eq!(workspace_crate("shoulder_isb_core"), Some("core"));
        assert_eq!(workspace_crate("shoulder_isb"), Some("shoulder_isb"));
        assert_eq!(workspace_crate("shoulder_isbx::a"), None);
        assert_eq!(workspace_crate("rayon_core::registry"), None);
    }

    fn meta(level: log::Level, target: &str) -> Metadata<'_> {
        Metadata::builder().level(level).target(target).build()
    }

    #[test]
    fn foreign_records_are_disabled() {
        let logger = WorkspaceLogger {
            level: LevelFilter::Info,
            started: Instant::now(),
        };
        assert!(logger.enabled(&meta(log::Level::Warn, "shoulder_isb_dataset::batch")));
        assert!(!logger.enabled(&meta(log::Level::Debug, "shoulder_isb_dataset::batch")));
        assert!(!logger.enabled(&meta(log::Level::Error, "serde_json::de")));
    }

    #[test]
    fn repeated_init_is_a_no_op() {
        assert!(init_with_level(LevelFilter::Warn).is_ok());
        assert!(init_with_level(LevelFilter::Debug).is_ok());
    }
}
