#![forbid(unsafe_code)]

//! Headless trace runner for the slide-out menu.
//!
//! A trace is a script of input steps pinned to frame numbers. The runner
//! mounts a [`Layout`] over a simulated container, plays the script one
//! fixed-length frame at a time, and records the menu's visible state
//! after every frame. Identical scripts always produce identical records,
//! which makes traces usable as golden files.
//!
//! # Script syntax
//!
//! Steps are `frame:action`, separated by `;` or newlines:
//!
//! ```text
//! 0:paint; 1:toggle; 40:hover:2; 45:activate:2; 60:resize:320x600
//! ```
//!
//! | Action              | Effect                                   |
//! |---------------------|------------------------------------------|
//! | `paint`             | report a painted frame                   |
//! | `toggle`            | press the toggle control                 |
//! | `activate:<i>`      | primary click on entry `i`               |
//! | `activate-new:<i>`  | modifier click on entry `i`              |
//! | `hover:<i>`         | pointer enters entry `i`                 |
//! | `press:<i>`         | pointer pressed on entry `i`             |
//! | `leave:<i>`         | pointer leaves entry `i`                 |
//! | `resize:<w>x<h>`    | container and viewport change size       |
//!
//! Steps for the same frame run in script order, before that frame's tick.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use c3_core::geometry::Dimensions;
use c3_menu::{
    Channel, Interaction, Layout, LayoutCmd, LayoutMsg, LinkActivation, LinkDisposition,
    MenuConfig, MenuEvent, MenuItemDescriptor, SimulatedNode, content,
};
use serde::Serialize;
use tracing::{debug, info_span};

/// One scripted input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceAction {
    /// Report a painted frame.
    Paint,
    /// Press the toggle control.
    Toggle,
    /// Activate an entry.
    Activate {
        /// Entry index.
        index: usize,
        /// Click kind.
        activation: LinkActivation,
    },
    /// Change pointer interaction on an entry.
    Pointer {
        /// Entry index.
        index: usize,
        /// New interaction.
        interaction: Interaction,
    },
    /// Resize the container and viewport.
    Resize(Dimensions),
}

/// An action pinned to a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceStep {
    /// Frame the action runs before.
    pub frame: u32,
    /// The action.
    pub action: TraceAction,
}

/// Ordered trace steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceScript {
    steps: Vec<TraceStep>,
}

/// Script parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    /// The offending step text.
    pub step: String,
    /// What was wrong with it.
    pub reason: &'static str,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid trace step {:?}: {}", self.step, self.reason)
    }
}

impl std::error::Error for ScriptError {}

impl TraceScript {
    /// Build a script from steps. Steps are ordered by frame, keeping
    /// script order within a frame.
    #[must_use]
    pub fn new(mut steps: Vec<TraceStep>) -> Self {
        steps.sort_by_key(|s| s.frame);
        Self { steps }
    }

    /// Parse the textual form.
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let steps = text
            .split([';', '\n'])
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.starts_with('#'))
            .map(parse_step)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(steps))
    }

    /// All steps in run order.
    #[must_use]
    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    /// Steps that run before `frame`.
    pub fn at(&self, frame: u32) -> impl Iterator<Item = &TraceStep> {
        self.steps.iter().filter(move |s| s.frame == frame)
    }

    /// Last frame any step targets.
    #[must_use]
    pub fn last_frame(&self) -> Option<u32> {
        self.steps.last().map(|s| s.frame)
    }
}

fn parse_step(text: &str) -> Result<TraceStep, ScriptError> {
    let err = |reason| ScriptError {
        step: text.to_string(),
        reason,
    };
    let (frame, rest) = text.split_once(':').ok_or_else(|| err("expected frame:action"))?;
    let frame = frame
        .trim()
        .parse::<u32>()
        .map_err(|_| err("frame must be a non-negative integer"))?;
    let (name, arg) = match rest.split_once(':') {
        Some((name, arg)) => (name.trim(), Some(arg.trim())),
        None => (rest.trim(), None),
    };
    let index = || -> Result<usize, ScriptError> {
        arg.ok_or_else(|| err("missing entry index"))?
            .parse::<usize>()
            .map_err(|_| err("entry index must be a non-negative integer"))
    };
    let action = match name {
        "paint" => TraceAction::Paint,
        "toggle" => TraceAction::Toggle,
        "activate" => TraceAction::Activate {
            index: index()?,
            activation: LinkActivation::Primary,
        },
        "activate-new" => TraceAction::Activate {
            index: index()?,
            activation: LinkActivation::Modified,
        },
        "hover" => TraceAction::Pointer {
            index: index()?,
            interaction: Interaction::Hovered,
        },
        "press" => TraceAction::Pointer {
            index: index()?,
            interaction: Interaction::Pressed,
        },
        "leave" => TraceAction::Pointer {
            index: index()?,
            interaction: Interaction::Idle,
        },
        "resize" => {
            let size = arg.ok_or_else(|| err("missing size"))?;
            let (w, h) = size.split_once('x').ok_or_else(|| err("size must be <w>x<h>"))?;
            let w = w.trim().parse::<f64>().map_err(|_| err("bad width"))?;
            let h = h.trim().parse::<f64>().map_err(|_| err("bad height"))?;
            TraceAction::Resize(Dimensions::new(w, h))
        }
        _ => return Err(err("unknown action")),
    };
    Ok(TraceStep { frame, action })
}

/// Run parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceOptions {
    /// Frames to run.
    pub frames: u32,
    /// Length of one frame.
    pub frame: Duration,
    /// Initial container height.
    pub height: f64,
    /// Container width.
    pub width: f64,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            frames: 180,
            frame: Duration::from_millis(16),
            height: 800.0,
            width: 320.0,
        }
    }
}

/// Per-entry state in a [`FrameRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRecord {
    /// Entry index.
    pub index: usize,
    /// Vertical offset.
    pub y: f64,
    /// Opacity.
    pub opacity: f64,
    /// Scale.
    pub scale: f64,
}

/// One recorded lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    /// `phase`, `scheduled`, `started` or `settled`.
    pub kind: &'static str,
    /// `background`, `toggle` or `item:<i>`; absent for phase changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Phase for phase changes and schedules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    /// Start delay for schedules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
}

impl From<&MenuEvent> for EventRecord {
    fn from(event: &MenuEvent) -> Self {
        let channel = event.channel().map(|c| match c {
            Channel::Background => "background".to_string(),
            Channel::Toggle => "toggle".to_string(),
            Channel::Item(i) => format!("item:{i}"),
        });
        match *event {
            MenuEvent::PhaseChanged { phase } => Self {
                kind: "phase",
                channel,
                phase: Some(phase.to_string()),
                delay_ms: None,
            },
            MenuEvent::Scheduled { phase, delay, .. } => Self {
                kind: "scheduled",
                channel,
                phase: Some(phase.to_string()),
                delay_ms: Some(delay.as_millis() as u64),
            },
            MenuEvent::Started { .. } => Self {
                kind: "started",
                channel,
                phase: None,
                delay_ms: None,
            },
            MenuEvent::Settled { .. } => Self {
                kind: "settled",
                channel,
                phase: None,
                delay_ms: None,
            },
        }
    }
}

/// Menu state after one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    /// Frame number.
    pub frame: u32,
    /// Elapsed time at the end of the frame.
    pub t_ms: u64,
    /// Menu flag.
    pub phase: String,
    /// Background `clip-path`.
    pub clip_path: String,
    /// Toggle morph, 0 (hamburger) to 1 (cross).
    pub toggle_morph: f64,
    /// Entry styles.
    pub items: Vec<ItemRecord>,
    /// Events recorded during the frame.
    pub events: Vec<EventRecord>,
    /// Navigation requested during the frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate: Option<String>,
    /// Whether every animation is at rest.
    pub settled: bool,
}

/// Play `script` against a fresh layout over the site's destinations.
pub fn run_trace(config: MenuConfig, script: &TraceScript, options: &TraceOptions) -> Vec<FrameRecord> {
    run_trace_with(config, content::default_destinations(), script, options)
}

/// Play `script` against a fresh layout over `destinations`.
pub fn run_trace_with(
    config: MenuConfig,
    destinations: Vec<MenuItemDescriptor>,
    script: &TraceScript,
    options: &TraceOptions,
) -> Vec<FrameRecord> {
    let _span = info_span!("trace", frames = options.frames, steps = script.steps().len()).entered();

    let mut layout = Layout::new(config, destinations);
    let initial = Dimensions::new(options.width, options.height);
    let node = Rc::new(SimulatedNode::new(initial));
    layout.mount(node.clone());
    layout.resize(initial);

    let mut records = Vec::with_capacity(options.frames as usize);
    let mut elapsed = Duration::ZERO;
    for frame in 0..options.frames {
        let mut navigate = None;
        for step in script.at(frame) {
            debug!(frame, action = ?step.action, "trace step");
            let msg = match step.action {
                TraceAction::Paint => LayoutMsg::Paint,
                TraceAction::Toggle => LayoutMsg::ToggleMenu,
                TraceAction::Activate { index, activation } => {
                    LayoutMsg::ActivateItem { index, activation }
                }
                TraceAction::Pointer { index, interaction } => {
                    LayoutMsg::HoverItem { index, interaction }
                }
                TraceAction::Resize(size) => {
                    node.set_size(size);
                    LayoutMsg::Resize(size)
                }
            };
            if let LayoutCmd::Navigate(nav) = layout.update(msg) {
                let target = match nav.disposition {
                    LinkDisposition::SameTab => nav.href,
                    LinkDisposition::NewTab => format!("new-tab:{}", nav.href),
                };
                navigate = Some(target);
            }
        }

        layout.update(LayoutMsg::Tick(options.frame));
        elapsed += options.frame;
        records.push(snapshot(&mut layout, frame, elapsed, navigate));
    }
    layout.unmount();
    records
}

fn snapshot(layout: &mut Layout, frame: u32, elapsed: Duration, navigate: Option<String>) -> FrameRecord {
    let events = layout
        .shell_mut()
        .drain_events()
        .iter()
        .map(EventRecord::from)
        .collect();
    let shell = layout.shell();
    let items = (0..shell.navigation().len())
        .filter_map(|index| {
            shell.item_style(index).map(|style| ItemRecord {
                index,
                y: round3(style.y),
                opacity: round3(style.opacity),
                scale: round3(style.scale),
            })
        })
        .collect();
    FrameRecord {
        frame,
        t_ms: elapsed.as_millis() as u64,
        phase: layout.phase().to_string(),
        clip_path: shell.clip_path(),
        toggle_morph: round3(shell.toggle_bars().top_rotation / 45.0),
        items,
        events,
        navigate,
        settled: shell.is_settled(),
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Content digest of a trace, for comparing runs.
#[must_use]
pub fn trace_digest(records: &[FrameRecord]) -> String {
    let mut hasher = blake3::Hasher::new();
    for record in records {
        if let Ok(line) = serde_json::to_string(record) {
            hasher.update(line.as_bytes());
            hasher.update(b"\n");
        }
    }
    format!("blake3:{}", hasher.finalize().to_hex())
}
