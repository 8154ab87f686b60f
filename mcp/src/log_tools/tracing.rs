use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering;

use tracing::Level;
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use super::lazy_file_writer::LazyFileWriter;

const TRACE_LOG_FILE_NAME: &str = "mcsm_mcp_trace.log";

static CURRENT_LEVEL: AtomicU8 = AtomicU8::new(1); // WARN until configured

/// Dynamic tracing filter driven by `CURRENT_LEVEL`
#[derive(Clone)]
pub struct DynamicFilter;

impl<S> Layer<S> for DynamicFilter
where
    S: Subscriber,
{
    fn enabled(
        &self,
        metadata: &tracing::Metadata<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) -> bool {
        if is_transport_noise(metadata.target()) {
            return false;
        }

        level_value(*metadata.level()) <= CURRENT_LEVEL.load(Ordering::Relaxed)
    }
}

/// HTTP stack internals that drown out the console traffic we care about
fn is_transport_noise(target: &str) -> bool {
    ["reqwest::", "hyper", "h2::", "rustls::", "want::"]
        .iter()
        .any(|prefix| target.starts_with(prefix))
}

const fn level_value(level: Level) -> u8 {
    match level {
        Level::ERROR => 0,
        Level::WARN => 1,
        Level::INFO => 2,
        Level::DEBUG => 3,
        Level::TRACE => 4,
    }
}

/// Represents tracing levels selectable at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl FromStr for TracingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(format!(
                "Invalid tracing level '{s}'. Valid levels are: error, warn, info, debug, trace"
            )),
        }
    }
}

impl TracingLevel {
    const fn as_u8(self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Warn => 1,
            Self::Info => 2,
            Self::Debug => 3,
            Self::Trace => 4,
        }
    }

    /// Initialize file-based tracing at the given level.
    /// The log file is only created on first write.
    pub fn init_file_tracing(level: Self) {
        CURRENT_LEVEL.store(level.as_u8(), Ordering::Relaxed);

        let lazy_writer = LazyFileWriter::new(Self::get_trace_log_path());

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(lazy_writer)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        // stdout belongs to the MCP transport, so nothing is ever written there
        let _ = Registry::default()
            .with(DynamicFilter)
            .with(file_layer)
            .try_init();
    }

    pub fn get_current_tracing_level() -> Self {
        match CURRENT_LEVEL.load(Ordering::Relaxed) {
            0 => Self::Error,
            2 => Self::Info,
            3 => Self::Debug,
            4 => Self::Trace,
            _ => Self::Warn,
        }
    }

    /// Get the path to the trace log file
    pub fn get_trace_log_path() -> PathBuf {
        std::env::temp_dir().join(TRACE_LOG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_levels_case_insensitively() {
        assert_eq!("DEBUG".parse::<TracingLevel>(), Ok(TracingLevel::Debug));
        assert_eq!("warn".parse::<TracingLevel>(), Ok(TracingLevel::Warn));
        assert!("verbose".parse::<TracingLevel>().is_err());
    }

    #[test]
    fn http_internals_are_filtered() {
        assert!(is_transport_noise("hyper_util::client::legacy"));
        assert!(is_transport_noise("reqwest::connect"));
        assert!(!is_transport_noise("mcsm_mcp::mcsm::players"));
    }

    #[test]
    fn level_ordering_matches_verbosity() {
        assert!(level_value(Level::ERROR) < level_value(Level::WARN));
        assert_eq!(level_value(Level::TRACE), TracingLevel::Trace.as_u8());
    }

    #[test]
    fn trace_log_lives_in_temp_dir() {
        let path = TracingLevel::get_trace_log_path();
        assert!(path.starts_with(std::env::temp_dir()));
        assert!(path.ends_with(TRACE_LOG_FILE_NAME));
    }
}
