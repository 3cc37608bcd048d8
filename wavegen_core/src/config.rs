use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;
use crate::waveform::WaveShape;

// ----------------------------------------------------------------------------
// Fixed by the transmit link:
// ----------------------------------------------------------------------------
pub const FREQ_SAMPLING: u32 = 96_000;
pub const FREQ_MIN: u16 = 20;
pub const FREQ_MAX: u16 = 24_000;

// ----------------------------------------------------------------------------
// Derived from the frequency range: 96000/24000 and 96000/20
// ----------------------------------------------------------------------------
pub const BUF_MIN: usize = 4;
pub const BUF_MAX: usize = 4_800;

// ----------------------------------------------------------------------------
// Sample scaling:
// ----------------------------------------------------------------------------
pub const SCALE_SIN: i16 = 16_383;
pub const SCALE_SAW: i16 = 32_767;

pub const AMPLITUDE_MIN: u8 = 0;
pub const AMPLITUDE_MAX: u8 = 100;

pub const CHANNEL_0: u8 = 0;
pub const CHANNEL_1: u8 = 1;
pub const CHANNEL_COUNT: usize = 2;

pub const INITIAL_FREQ: u16 = 1_000;

/// Startup settings for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub shape: WaveShape,
    /// Requested percent, clamped to [0, 100] when applied.
    pub amplitude_pct: i32,
}

impl ChannelConfig {
    pub fn new(shape: WaveShape, amplitude_pct: i32) -> Self {
        Self { shape, amplitude_pct }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::new(WaveShape::Sinusoid, AMPLITUDE_MAX as i32)
    }
}

/// Startup settings for the whole generator.
///
/// Values are kept raw: out-of-range numbers are clamped by the same path a
/// command takes, so a config file can never produce a state a command could not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub frequency_hz: i32,
    /// Fields missing from an entry keep that channel's power-on value.
    #[serde(deserialize_with = "channels_over_defaults")]
    pub channels: [ChannelConfig; CHANNEL_COUNT],
}

/// A channel entry as written in a config file, any field may be left out.
#[derive(Default, Deserialize)]
#[serde(default)]
struct PartialChannel {
    shape: Option<WaveShape>,
    amplitude_pct: Option<i32>,
}

fn channels_over_defaults<'de, D>(deserializer: D) -> Result<[ChannelConfig; CHANNEL_COUNT], D::Error>
where
    D: Deserializer<'de>,
{
    let entries = <[Option<PartialChannel>; CHANNEL_COUNT]>::deserialize(deserializer)?;
    let mut channels = GeneratorConfig::default().channels;
    for (slot, entry) in channels.iter_mut().zip(entries) {
        let Some(entry) = entry else { continue };
        if let Some(shape) = entry.shape {
            slot.shape = shape;
        }
        if let Some(amplitude_pct) = entry.amplitude_pct {
            slot.amplitude_pct = amplitude_pct;
        }
    }
    Ok(channels)
}

impl GeneratorConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_frequency(mut self, frequency_hz: i32) -> Self {
        self.frequency_hz = frequency_hz;
        self
    }

    pub fn with_channel(mut self, index: u8, channel: ChannelConfig) -> Self {
        if let Some(slot) = self.channels.get_mut(index as usize) {
            *slot = channel;
        }
        self
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            frequency_hz: INITIAL_FREQ as i32,
            channels: [
                ChannelConfig::new(WaveShape::Sinusoid, AMPLITUDE_MAX as i32),
                ChannelConfig::new(WaveShape::Sawtooth, AMPLITUDE_MAX as i32),
            ],
        }
    }
}
