#![forbid(unsafe_code)]

//! Run a menu trace and print one JSON record per frame.
//!
//! Configuration comes from the environment:
//!
//! - `C3_TRACE_SCRIPT`: trace script (default opens, waits, closes)
//! - `C3_TRACE_FRAMES`: frames to run (default 180)
//! - `C3_TRACE_FRAME_MS`: frame length in ms (default 16)
//! - `C3_TRACE_HEIGHT`: container height (default 800)
//! - `C3_MENU_CONFIG`: path to a `.toml` or `.json` menu config
//! - `C3_LOG`: tracing filter for stderr (default `warn`)
//! - `C3_LOG_FORMAT`: `text` or `json`

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use c3_core::logging::{self, LogFormat};
use c3_harness::{TraceOptions, TraceScript, run_trace, trace_digest};
use c3_menu::{ConfigError, MenuConfig};
use tracing::{error, info};

const DEFAULT_SCRIPT: &str = "0:paint; 1:toggle; 90:activate:1";

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|value| value.trim().parse().ok())
}

fn load_config() -> Result<MenuConfig, ConfigError> {
    let Ok(path) = std::env::var("C3_MENU_CONFIG") else {
        return Ok(MenuConfig::default());
    };
    if path.ends_with(".json") {
        let text = std::fs::read_to_string(&path)?;
        MenuConfig::from_json_str(&text)
    } else {
        MenuConfig::from_toml_file(&path)
    }
}

fn main() -> ExitCode {
    let filter = std::env::var("C3_LOG").unwrap_or_else(|_| "warn".to_string());
    let format = env_parse::<LogFormat>("C3_LOG_FORMAT").unwrap_or_default();
    logging::init(&filter, format);

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "failed to load menu config");
            eprintln!("c3-harness: {err}");
            return ExitCode::from(2);
        }
    };

    let script_text =
        std::env::var("C3_TRACE_SCRIPT").unwrap_or_else(|_| DEFAULT_SCRIPT.to_string());
    let script = match TraceScript::parse(&script_text) {
        Ok(script) => script,
        Err(err) => {
            eprintln!("c3-harness: {err}");
            return ExitCode::from(2);
        }
    };

    let defaults = TraceOptions::default();
    let options = TraceOptions {
        frames: env_parse("C3_TRACE_FRAMES").unwrap_or(defaults.frames),
        frame: env_parse::<u64>("C3_TRACE_FRAME_MS")
            .map_or(defaults.frame, Duration::from_millis),
        height: env_parse("C3_TRACE_HEIGHT").unwrap_or(defaults.height),
        width: defaults.width,
    };
    info!(frames = options.frames, height = options.height, "running trace");

    let records = run_trace(config, &script, &options);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for record in &records {
        let line = match serde_json::to_string(record) {
            Ok(line) => line,
            Err(err) => {
                eprintln!("c3-harness: {err}");
                return ExitCode::FAILURE;
            }
        };
        if writeln!(out, "{line}").is_err() {
            return ExitCode::FAILURE;
        }
    }
    let settled = records.last().is_some_and(|r| r.settled);
    let digest = trace_digest(&records);
    let summary = serde_json::json!({
        "event": "complete",
        "frames": records.len(),
        "settled": settled,
        "trace_digest": digest,
    });
    if writeln!(out, "{summary}").is_err() {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
