//! In-process capability implementations that record every call.
//!
//! Used by tests across the workspace.

use crate::domain::{AudioChannel, CapabilityError, DialNumber};
use crate::ports::{AudioControl, CallPermission, CallPlacer};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

/// One recorded [`AudioControl`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCall {
    /// `max_level(channel)`
    MaxLevel(AudioChannel),
    /// `current_level(channel)`
    CurrentLevel(AudioChannel),
    /// `set_level(channel, level)`
    SetLevel(AudioChannel, u32),
    /// `enable_speakerphone()`
    EnableSpeakerphone,
}

/// Audio control backed by a map of levels.
pub struct MockAudioControl {
    max_levels: HashMap<AudioChannel, u32>,
    levels: Mutex<HashMap<AudioChannel, u32>>,
    denied: Mutex<HashSet<AudioChannel>>,
    speaker_denied: AtomicBool,
    speaker_on: AtomicBool,
    calls: Mutex<Vec<AudioCall>>,
}

impl Default for MockAudioControl {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAudioControl {
    /// Typical handset maxima: voice 5, ring 7, media 15. All levels start at 1.
    pub fn new() -> Self {
        Self::with_max_levels([
            (AudioChannel::VoiceCall, 5),
            (AudioChannel::Ring, 7),
            (AudioChannel::Media, 15),
        ])
    }

    /// Only the given channels exist.
    pub fn with_max_levels(max_levels: impl IntoIterator<Item = (AudioChannel, u32)>) -> Self {
        let max_levels: HashMap<_, _> = max_levels.into_iter().collect();
        let levels = max_levels.keys().map(|c| (*c, 1u32.min(max_levels[c]))).collect();
        Self {
            max_levels,
            levels: Mutex::new(levels),
            denied: Mutex::new(HashSet::new()),
            speaker_denied: AtomicBool::new(false),
            speaker_on: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Refuse writes to `channel` with `PermissionDenied`.
    pub fn deny_channel(&self, channel: AudioChannel) {
        self.denied.lock().insert(channel);
    }

    /// Refuse speakerphone requests with `PermissionDenied`.
    pub fn deny_speakerphone(&self) {
        self.speaker_denied.store(true, Ordering::SeqCst);
    }

    /// Current level of `channel`, `None` if the channel does not exist.
    pub fn level(&self, channel: AudioChannel) -> Option<u32> {
        self.levels.lock().get(&channel).copied()
    }

    /// Whether speakerphone was successfully enabled.
    pub fn speakerphone_on(&self) -> bool {
        self.speaker_on.load(Ordering::SeqCst)
    }

    /// All recorded calls.
    pub fn calls(&self) -> Vec<AudioCall> {
        self.calls.lock().clone()
    }

    /// Recorded `set_level` calls, in order.
    pub fn set_level_calls(&self) -> Vec<(AudioChannel, u32)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                AudioCall::SetLevel(channel, level) => Some((*channel, *level)),
                _ => None,
            })
            .collect()
    }

    /// Number of speakerphone requests, successful or not.
    pub fn speakerphone_attempts(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, AudioCall::EnableSpeakerphone))
            .count()
    }

    fn record(&self, call: AudioCall) {
        self.calls.lock().push(call);
    }

    fn max_of(&self, channel: AudioChannel) -> Result<u32, CapabilityError> {
        self.max_levels
            .get(&channel)
            .copied()
            .ok_or_else(|| CapabilityError::unavailable(format!("audio channel {channel}")))
    }
}

#[async_trait]
impl AudioControl for MockAudioControl {
    async fn max_level(&self, channel: AudioChannel) -> Result<u32, CapabilityError> {
        self.record(AudioCall::MaxLevel(channel));
        self.max_of(channel)
    }

    async fn current_level(&self, channel: AudioChannel) -> Result<u32, CapabilityError> {
        self.record(AudioCall::CurrentLevel(channel));
        self.max_of(channel)?;
        Ok(self.level(channel).unwrap_or_default())
    }

    async fn set_level(&self, channel: AudioChannel, level: u32) -> Result<(), CapabilityError> {
        self.record(AudioCall::SetLevel(channel, level));
        let max = self.max_of(channel)?;
        if self.denied.lock().contains(&channel) {
            return Err(CapabilityError::denied(format!("set_level({channel})")));
        }
        if level > max {
            return Err(CapabilityError::platform(format!(
                "level {level} above max {max} for {channel}"
            )));
        }
        self.levels.lock().insert(channel, level);
        Ok(())
    }

    async fn enable_speakerphone(&self) -> Result<(), CapabilityError> {
        self.record(AudioCall::EnableSpeakerphone);
        if self.speaker_denied.load(Ordering::SeqCst) {
            return Err(CapabilityError::denied("enable_speakerphone"));
        }
        self.speaker_on.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Call placer that succeeds or fails on demand.
pub struct MockCallPlacer {
    name: String,
    failure: Mutex<Option<CapabilityError>>,
    attempts: Mutex<Vec<DialNumber>>,
    placed: Mutex<Vec<DialNumber>>,
}

impl MockCallPlacer {
    /// A placer that always initiates the call.
    pub fn succeeding(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            failure: Mutex::new(None),
            attempts: Mutex::new(Vec::new()),
            placed: Mutex::new(Vec::new()),
        }
    }

    /// A placer that always fails with `error`.
    pub fn failing(name: impl Into<String>, error: CapabilityError) -> Self {
        let placer = Self::succeeding(name);
        *placer.failure.lock() = Some(error);
        placer
    }

    /// Every number dialed, including failed attempts.
    pub fn attempts(&self) -> Vec<DialNumber> {
        self.attempts.lock().clone()
    }

    /// Numbers whose call was initiated.
    pub fn placed(&self) -> Vec<DialNumber> {
        self.placed.lock().clone()
    }
}

#[async_trait]
impl CallPlacer for MockCallPlacer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn place_call(&self, number: &DialNumber) -> Result<(), CapabilityError> {
        self.attempts.lock().push(number.clone());
        if let Some(err) = self.failure.lock().clone() {
            return Err(err);
        }
        self.placed.lock().push(number.clone());
        Ok(())
    }
}

/// Call permission that can be toggled at runtime.
#[derive(Debug)]
pub struct MockCallPermission {
    granted: AtomicBool,
}

impl MockCallPermission {
    /// Start granted.
    pub fn granted() -> Self {
        Self {
            granted: AtomicBool::new(true),
        }
    }

    /// Start denied.
    pub fn denied() -> Self {
        Self {
            granted: AtomicBool::new(false),
        }
    }

    /// Grant or revoke.
    pub fn set_granted(&self, granted: bool) {
        self.granted.store(granted, Ordering::SeqCst);
    }
}

impl CallPermission for MockCallPermission {
    fn can_place_calls(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }
}
