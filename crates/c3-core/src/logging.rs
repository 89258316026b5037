#![forbid(unsafe_code)]

//! Process-wide logging setup.
//!
//! Library code only emits through the `tracing` macros. Binaries install
//! a subscriber once at startup with [`init`] (requires the `subscriber`
//! feature). Installation is guarded by a process-wide once-cell: the first
//! call wins and every later call is a no-op, so harnesses, tests, and
//! embedding hosts can all call it without coordinating.

use std::str::FromStr;

/// Output format for the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line records.
    #[default]
    Text,
    /// One JSON object per record.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" | "plain" => Ok(Self::Text),
            "json" | "jsonl" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Install the global subscriber writing to stderr.
///
/// `filter` uses `EnvFilter` directive syntax (`"info"`,
/// `"c3_menu=debug,warn"`). An unparsable filter falls back to `info`.
///
/// Returns `true` only for the call that actually installed a subscriber.
#[cfg(feature = "subscriber")]
pub fn init(filter: &str, format: LogFormat) -> bool {
    use std::sync::OnceLock;
    use tracing_subscriber::EnvFilter;

    static INSTALLED: OnceLock<bool> = OnceLock::new();

    let mut first = false;
    let installed = *INSTALLED.get_or_init(|| {
        first = true;
        let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);
        let installed = match format {
            LogFormat::Text => builder.try_init().is_ok(),
            LogFormat::Json => builder.json().try_init().is_ok(),
        };
        if installed {
            tracing::debug!(?format, "tracing subscriber installed");
        }
        installed
    });
    first && installed
}
