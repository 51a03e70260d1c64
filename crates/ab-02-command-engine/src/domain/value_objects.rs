//! Value objects shared by the parser, the engine and its adapters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A volume percentage. Always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Percent(u8);

impl Percent {
    /// Silence.
    pub const MIN: Percent = Percent(0);
    /// Full scale.
    pub const MAX: Percent = Percent(100);

    /// Returns `None` above 100.
    pub fn new(value: u32) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= 100)
            .map(Percent)
    }

    /// Raw value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Audio channels the engine controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioChannel {
    /// In-call voice stream.
    VoiceCall,
    /// Ringer.
    Ring,
    /// Music and media playback.
    Media,
}

impl AudioChannel {
    /// All channels, in the default control order.
    pub const ALL: [AudioChannel; 3] = [
        AudioChannel::VoiceCall,
        AudioChannel::Ring,
        AudioChannel::Media,
    ];

    /// Stable lowercase name, used in logs and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            AudioChannel::VoiceCall => "voice_call",
            AudioChannel::Ring => "ring",
            AudioChannel::Media => "media",
        }
    }

    /// Inverse of [`AudioChannel::as_str`], case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for AudioChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of executing a command body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionResult {
    /// The command was recognized and carried out.
    Executed,
    /// The body was not a command, or the action could not be carried out.
    #[default]
    Ignored,
}

impl ExecutionResult {
    /// `"EXECUTED"` or `"IGNORED"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ExecutionResult::Executed => "EXECUTED",
            ExecutionResult::Ignored => "IGNORED",
        }
    }

    /// True for `Executed`.
    pub fn is_executed(self) -> bool {
        matches!(self, ExecutionResult::Executed)
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
