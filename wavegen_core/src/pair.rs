use crate::channel::{Channel, ChannelSettings};
use crate::command::Command;
use crate::config::{CHANNEL_0, CHANNEL_1, GeneratorConfig};
use crate::error::{GeneratorError, GeneratorResult};
use crate::manager;
use crate::waveform::WaveShape;

/// Both channel descriptors of the stereo generator in one caller-owned value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPair {
    ch0: Channel,
    ch1: Channel,
}

impl ChannelPair {
    /// A pair in the power-on configuration.
    pub fn new() -> Self {
        Self::with_config(&GeneratorConfig::default())
    }

    pub fn with_config(config: &GeneratorConfig) -> Self {
        let mut pair = Self {
            ch0: Channel::new(CHANNEL_0),
            ch1: Channel::new(CHANNEL_1),
        };
        manager::configure(&mut pair.ch0, &mut pair.ch1, config);
        pair
    }

    pub fn channel(&self, index: u8) -> Option<&Channel> {
        match index {
            CHANNEL_0 => Some(&self.ch0),
            CHANNEL_1 => Some(&self.ch1),
            _ => None,
        }
    }

    fn channel_mut(&mut self, index: u8) -> GeneratorResult<&mut Channel> {
        match index {
            CHANNEL_0 => Ok(&mut self.ch0),
            CHANNEL_1 => Ok(&mut self.ch1),
            _ => Err(GeneratorError::UnknownChannel(index)),
        }
    }

    pub fn channels(&self) -> (&Channel, &Channel) {
        (&self.ch0, &self.ch1)
    }

    pub fn settings(&self) -> [ChannelSettings; 2] {
        [self.ch0.settings(), self.ch1.settings()]
    }

    pub fn frequency_hz(&self) -> u16 {
        self.ch0.frequency_hz()
    }

    pub fn table_len(&self) -> usize {
        self.ch0.table_len()
    }

    pub fn reset(&mut self, config: &GeneratorConfig) -> GeneratorResult<()> {
        manager::init_with(&mut self.ch0, &mut self.ch1, config)
    }

    pub fn set_frequency(&mut self, f_req: i32) -> GeneratorResult<()> {
        manager::set_freq(&mut self.ch0, &mut self.ch1, f_req)
    }

    pub fn set_amplitude(&mut self, index: u8, a_req: i32) -> GeneratorResult<()> {
        manager::set_amplitude(self.channel_mut(index)?, a_req)
    }

    pub fn set_wave(&mut self, index: u8, shape: WaveShape) -> GeneratorResult<()> {
        manager::set_wave(self.channel_mut(index)?, shape)
    }

    pub fn pack(&self, frames: &mut [i32]) -> GeneratorResult<usize> {
        manager::pack(&self.ch0, &self.ch1, frames)
    }

    /// Apply a reconfiguring command. [`Command::Publish`] is a no-op here;
    /// packing is the caller's publication step.
    pub fn apply(&mut self, command: Command) -> GeneratorResult<()> {
        match command {
            Command::Init => self.reset(&GeneratorConfig::default()),
            Command::SetFrequency { hz } => self.set_frequency(hz),
            Command::SetAmplitude { channel, percent } => self.set_amplitude(channel, percent),
            Command::SetWave { channel, shape } => self.set_wave(channel, shape),
            Command::Publish => Ok(()),
        }
    }
}

impl Default for ChannelPair {
    fn default() -> Self {
        Self::new()
    }
}
