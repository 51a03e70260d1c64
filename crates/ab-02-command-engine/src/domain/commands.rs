//! Device command grammar.
//!
//! The body is trimmed and lowercased, then matched exactly. `volume` and
//! its percent may be separated by any run of whitespace; the keyword
//! forms require the single space shown.

use super::value_objects::{AudioChannel, ExecutionResult, Percent};
use serde::Serialize;
use std::fmt;

/// A recognized device command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "command", content = "percent", rename_all = "snake_case")]
pub enum Command {
    /// `volume max`
    VolumeMax,
    /// `volume min`
    VolumeMin,
    /// `volume <n>` with `n` in `0..=100`
    VolumePercent(Percent),
    /// `call me back`
    CallMeBack,
}

impl Command {
    /// Parse a message body. See [`parse_command`].
    pub fn parse(raw: &str) -> Option<Self> {
        parse_command(raw)
    }

    /// Target percentage for volume commands.
    pub fn volume_percent(&self) -> Option<Percent> {
        match self {
            Command::VolumeMax => Some(Percent::MAX),
            Command::VolumeMin => Some(Percent::MIN),
            Command::VolumePercent(p) => Some(*p),
            Command::CallMeBack => None,
        }
    }

    /// Label used in logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Command::VolumeMax => "volume_max",
            Command::VolumeMin => "volume_min",
            Command::VolumePercent(_) => "volume_percent",
            Command::CallMeBack => "call_me_back",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::VolumeMax => f.write_str("volume max"),
            Command::VolumeMin => f.write_str("volume min"),
            Command::VolumePercent(p) => write!(f, "volume {}", p.value()),
            Command::CallMeBack => f.write_str("call me back"),
        }
    }
}

/// Detailed outcome of one `execute` call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionReport {
    /// Parsed command, `None` when the body was rejected.
    pub command: Option<Command>,
    /// Overall result.
    pub result: ExecutionResult,
    /// Channels written, with the level applied.
    pub channels_set: Vec<(AudioChannel, u32)>,
    /// Channels the platform refused or failed.
    pub channels_skipped: Vec<AudioChannel>,
    /// Speakerphone attempts scheduled after a call.
    pub speaker_attempts: usize,
}

impl ExecutionReport {
    pub(crate) fn ignored(command: Option<Command>) -> Self {
        Self {
            command,
            ..Self::default()
        }
    }
}

/// Parse a message body into a device command.
///
/// Returns `None` for anything outside the grammar, including percents
/// above 100 and numbers longer than three digits.
pub fn parse_command(raw: &str) -> Option<Command> {
    let body = raw.trim().to_lowercase();
    match body.as_str() {
        "volume max" => return Some(Command::VolumeMax),
        "volume min" => return Some(Command::VolumeMin),
        "call me back" => return Some(Command::CallMeBack),
        _ => {}
    }

    let rest = body.strip_prefix("volume")?;
    let digits = rest.trim_start();
    // at least one separator char, and nothing but digits after it
    if digits.len() == rest.len() || digits.is_empty() || digits.len() > 3 {
        return None;
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = digits.parse().ok()?;
    Percent::new(value).map(Command::VolumePercent)
}
