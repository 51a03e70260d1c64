//! Engine configuration.

use super::errors::ConfigError;
use super::value_objects::AudioChannel;
use std::time::Duration;

/// Default speakerphone attempt delays after a call is initiated.
pub const DEFAULT_SPEAKER_DELAYS_MS: [u64; 3] = [0, 700, 1500];

/// Upper bound for any single speakerphone delay.
pub const MAX_SPEAKER_DELAY: Duration = Duration::from_secs(10);

/// Command Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Channels set by volume commands, in write order.
    pub channels: Vec<AudioChannel>,
    /// Delay of each speakerphone attempt, measured from call initiation.
    pub speaker_delays: Vec<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            channels: AudioChannel::ALL.to_vec(),
            speaker_delays: DEFAULT_SPEAKER_DELAYS_MS
                .iter()
                .map(|ms| Duration::from_millis(*ms))
                .collect(),
        }
    }
}

impl EngineConfig {
    /// Create with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the controlled channels.
    pub fn with_channels(mut self, channels: impl IntoIterator<Item = AudioChannel>) -> Self {
        self.channels = channels.into_iter().collect();
        self
    }

    /// Replace the speakerphone delays.
    pub fn with_speaker_delays(mut self, delays: impl IntoIterator<Item = Duration>) -> Self {
        self.speaker_delays = delays.into_iter().collect();
        self
    }

    /// Parse a comma-separated list of millisecond delays, e.g. `"0,700,1500"`.
    ///
    /// An empty string yields no attempts.
    pub fn parse_delays_ms(raw: &str) -> Result<Vec<Duration>, ConfigError> {
        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|_| ConfigError::InvalidValue {
                        field: "speaker_delays",
                        value: part.to_string(),
                    })
            })
            .collect()
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channels.is_empty() {
            return Err(ConfigError::NoChannels);
        }
        for (i, channel) in self.channels.iter().enumerate() {
            if self.channels[..i].contains(channel) {
                return Err(ConfigError::DuplicateChannel(*channel));
            }
        }
        if self.speaker_delays.windows(2).any(|w| w[1] < w[0]) {
            return Err(ConfigError::UnorderedDelays);
        }
        if let Some(delay) = self.speaker_delays.iter().find(|d| **d > MAX_SPEAKER_DELAY) {
            return Err(ConfigError::DelayTooLong {
                delay: *delay,
                max: MAX_SPEAKER_DELAY,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(
            config.channels,
            vec![AudioChannel::VoiceCall, AudioChannel::Ring, AudioChannel::Media]
        );
        assert_eq!(
            config.speaker_delays,
            vec![
                Duration::ZERO,
                Duration::from_millis(700),
                Duration::from_millis(1500)
            ]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_channels() {
        let config = EngineConfig::new().with_channels([]);
        assert_eq!(config.validate(), Err(ConfigError::NoChannels));
    }

    #[test]
    fn test_rejects_duplicate_channel() {
        let config = EngineConfig::new().with_channels([AudioChannel::Media, AudioChannel::Media]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateChannel(AudioChannel::Media))
        );
    }

    #[test]
    fn test_rejects_unordered_or_long_delays() {
        let config = EngineConfig::new()
            .with_speaker_delays([Duration::from_millis(700), Duration::from_millis(100)]);
        assert_eq!(config.validate(), Err(ConfigError::UnorderedDelays));

        let config = EngineConfig::new().with_speaker_delays([Duration::from_secs(11)]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DelayTooLong { .. })
        ));
    }

    #[test]
    fn test_no_speaker_attempts_is_valid() {
        let config = EngineConfig::new().with_speaker_delays([]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_delays() {
        assert_eq!(
            EngineConfig::parse_delays_ms(" 0, 250 ,1000").unwrap(),
            vec![
                Duration::ZERO,
                Duration::from_millis(250),
                Duration::from_millis(1000)
            ]
        );
        assert!(EngineConfig::parse_delays_ms("").unwrap().is_empty());
        assert!(matches!(
            EngineConfig::parse_delays_ms("0,abc"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
