//! Simulated device backend.
//!
//! Keeps levels in memory and logs every platform call, so `androbot run`
//! can be exercised on a host without audio or telephony services. Holds
//! only the latest level per channel.

use ab_02_command_engine::{AudioChannel, AudioControl, CallPlacer, CapabilityError, DialNumber};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Audio control that logs and remembers levels.
pub struct SimulatedAudio {
    max_levels: HashMap<AudioChannel, u32>,
    levels: Mutex<HashMap<AudioChannel, u32>>,
    speaker_on: AtomicBool,
}

impl Default for SimulatedAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedAudio {
    /// Handset-like maxima (voice 5, ring 7, media 15), every level at 1.
    pub fn new() -> Self {
        let max_levels: HashMap<_, _> = [
            (AudioChannel::VoiceCall, 5),
            (AudioChannel::Ring, 7),
            (AudioChannel::Media, 15),
        ]
        .into_iter()
        .collect();
        let levels = max_levels.keys().map(|c| (*c, 1)).collect();
        Self {
            max_levels,
            levels: Mutex::new(levels),
            speaker_on: AtomicBool::new(false),
        }
    }

    /// Current simulated level of `channel`.
    pub fn level(&self, channel: AudioChannel) -> Option<u32> {
        self.levels.lock().get(&channel).copied()
    }

    /// Whether the speaker route is on.
    pub fn speakerphone_on(&self) -> bool {
        self.speaker_on.load(Ordering::SeqCst)
    }

    fn max_of(&self, channel: AudioChannel) -> Result<u32, CapabilityError> {
        self.max_levels
            .get(&channel)
            .copied()
            .ok_or_else(|| CapabilityError::unavailable(format!("audio channel {channel}")))
    }
}

#[async_trait]
impl AudioControl for SimulatedAudio {
    async fn max_level(&self, channel: AudioChannel) -> Result<u32, CapabilityError> {
        self.max_of(channel)
    }

    async fn current_level(&self, channel: AudioChannel) -> Result<u32, CapabilityError> {
        self.max_of(channel)?;
        Ok(self.level(channel).unwrap_or_default())
    }

    async fn set_level(&self, channel: AudioChannel, level: u32) -> Result<(), CapabilityError> {
        let max = self.max_of(channel)?;
        if level > max {
            return Err(CapabilityError::platform(format!(
                "{channel} level {level} exceeds max {max}"
            )));
        }
        self.levels.lock().insert(channel, level);
        info!("[sim] {} volume set to {}", channel, level);
        Ok(())
    }

    async fn enable_speakerphone(&self) -> Result<(), CapabilityError> {
        self.speaker_on.store(true, Ordering::SeqCst);
        info!("[sim] Speakerphone on");
        Ok(())
    }
}

/// Call placer that only logs.
#[derive(Debug, Clone, Default)]
pub struct SimulatedDialer;

#[async_trait]
impl CallPlacer for SimulatedDialer {
    fn name(&self) -> &str {
        "simulated-dialer"
    }

    async fn place_call(&self, number: &DialNumber) -> Result<(), CapabilityError> {
        info!("[sim] Dialing {}", number.to_uri());
        Ok(())
    }
}
