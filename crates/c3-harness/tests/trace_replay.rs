//! Trace replay: determinism and end-to-end behavior through the runner.

use std::io::Write;

use c3_harness::{FrameRecord, TraceOptions, TraceScript, run_trace, trace_digest};
use c3_menu::MenuConfig;
use proptest::prelude::*;
use tracing::{Level, info};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::INFO)
        .try_init();
}

fn run(script: &str, frames: u32) -> Vec<FrameRecord> {
    init_tracing();
    let script = TraceScript::parse(script).expect("valid script");
    let options = TraceOptions {
        frames,
        ..TraceOptions::default()
    };
    run_trace(MenuConfig::default(), &script, &options)
}

fn started(records: &[FrameRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| r.events.iter())
        .filter(|e| e.kind == "started")
        .filter_map(|e| e.channel.clone())
        .collect()
}

#[test]
fn identical_scripts_produce_identical_traces() {
    let script = "0:paint; 1:toggle; 20:hover:1; 30:toggle; 35:toggle; 200:activate:4";
    let a = run(script, 400);
    let b = run(script, 400);
    assert_eq!(a, b);
    assert_eq!(trace_digest(&a), trace_digest(&b));
    assert!(trace_digest(&a).starts_with("blake3:"));
    info!(digest = %trace_digest(&a), "trace digest");
}

#[test]
fn different_scripts_differ() {
    let a = run("0:paint; 1:toggle", 60);
    let b = run("0:paint; 2:toggle", 60);
    assert_ne!(trace_digest(&a), trace_digest(&b));
}

#[test]
fn open_close_ordering_in_trace() {
    let records = run("0:paint; 1:toggle; 200:toggle", 400);
    let opened = started(&records[..200]);
    let items: Vec<_> = opened.iter().filter(|c| c.starts_with("item:")).collect();
    assert_eq!(items, ["item:0", "item:1", "item:2", "item:3", "item:4"]);

    let closed = started(&records[200..]);
    let order: Vec<_> = closed
        .iter()
        .filter(|c| c.starts_with("item:") || *c == "background")
        .map(String::as_str)
        .collect();
    assert_eq!(
        order,
        ["item:4", "item:3", "item:2", "item:1", "item:0", "background"]
    );

    let last = records.last().expect("records");
    assert_eq!(last.phase, "closed");
    assert!(last.settled);
    assert_eq!(last.clip_path, "circle(30px at 40px 40px)");
}

#[test]
fn activation_navigates_and_closes() {
    let records = run("0:paint; 1:toggle; 100:activate:2; 101:activate-new:0", 300);
    assert_eq!(records[100].navigate.as_deref(), Some("/about"));
    assert_eq!(records[100].phase, "closed");
    // Hidden entries ignore the second click.
    assert_eq!(records[101].navigate, None);
    assert!(records.last().expect("records").settled);
}

#[test]
fn clip_follows_resize_while_open() {
    let records = run("0:paint; 1:toggle; 300:resize:320x400", 600);
    assert_eq!(records[299].clip_path, "circle(1800px at 40px 40px)");
    assert_eq!(
        records.last().expect("records").clip_path,
        "circle(1000px at 40px 40px)"
    );
}

#[test]
fn debounced_resize_reaches_the_clip() {
    init_tracing();
    let mut config = MenuConfig::default();
    config.probe.resize_debounce_ms = 50;
    let script = TraceScript::parse("0:paint; 1:toggle; 300:resize:320x400").expect("valid script");
    let options = TraceOptions {
        frames: 700,
        ..TraceOptions::default()
    };
    let records = run_trace(config.clone(), &script, &options);

    // Held back for the quiet window, then measured on the fourth frame.
    assert_eq!(records[300].clip_path, "circle(1800px at 40px 40px)");
    assert_eq!(
        records.last().expect("records").clip_path,
        "circle(1000px at 40px 40px)"
    );

    let again = run_trace(config, &script, &options);
    assert_eq!(trace_digest(&records), trace_digest(&again));
}

#[test]
fn records_serialize_as_jsonl() {
    let records = run("0:paint; 1:toggle", 5);
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    for record in &records {
        let line = serde_json::to_string(record).expect("serialize");
        writeln!(file, "{line}").expect("write");
    }
    let text = std::fs::read_to_string(file.path()).expect("read back");
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).expect("json line"))
        .collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1]["phase"], "open");
    assert_eq!(lines[1]["items"].as_array().map(Vec::len), Some(5));
    assert!(lines[0].get("navigate").is_none());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn final_phase_matches_toggle_parity(
        frames in prop::collection::btree_set(0u32..120, 0..12),
    ) {
        let script: Vec<String> = frames.iter().map(|f| format!("{f}:toggle")).collect();
        let records = run(&script.join(";"), 120);
        let expected = if frames.len() % 2 == 0 { "closed" } else { "open" };
        prop_assert_eq!(records.last().map(|r| r.phase.as_str()), Some(expected));
    }
}
