use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{BUF_MAX, CHANNEL_0, CHANNEL_1};
use crate::waveform::{self, WaveShape};

/// One channel descriptor.
///
/// Storage is fixed at `BUF_MAX` samples; only `samples[..table_len]` is
/// meaningful. Descriptors are owned by the caller and borrowed by every
/// command, the generator keeps no reference to them between calls.
#[derive(Clone, PartialEq, Eq)]
pub struct Channel {
    pub(crate) index: u8,
    pub(crate) shape: WaveShape,
    pub(crate) amplitude_pct: u8,
    pub(crate) frequency_hz: u16,
    pub(crate) table_len: usize,
    pub(crate) samples: [i16; BUF_MAX],
}

/// Scalar state of a descriptor, without its sample table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChannelSettings {
    pub index: u8,
    pub shape: WaveShape,
    pub amplitude_pct: u8,
    pub frequency_hz: u16,
    pub table_len: usize,
}

impl Channel {
    /// Zeroed descriptor storage carrying `index`. Not usable until `init`.
    pub fn new(index: u8) -> Self {
        Self {
            index,
            shape: WaveShape::default(),
            amplitude_pct: 0,
            frequency_hz: 0,
            table_len: 0,
            samples: [0; BUF_MAX],
        }
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn shape(&self) -> WaveShape {
        self.shape
    }

    pub fn amplitude_pct(&self) -> u8 {
        self.amplitude_pct
    }

    pub fn frequency_hz(&self) -> u16 {
        self.frequency_hz
    }

    pub fn table_len(&self) -> usize {
        self.table_len
    }

    /// The valid part of the sample table.
    pub fn samples(&self) -> &[i16] {
        &self.samples[..self.table_len]
    }

    pub fn has_known_index(&self) -> bool {
        matches!(self.index, CHANNEL_0 | CHANNEL_1)
    }

    pub fn settings(&self) -> ChannelSettings {
        ChannelSettings {
            index: self.index,
            shape: self.shape,
            amplitude_pct: self.amplitude_pct,
            frequency_hz: self.frequency_hz,
            table_len: self.table_len,
        }
    }

    /// Regenerate `samples[..table_len]` from the current shape and amplitude.
    pub(crate) fn resynthesize(&mut self) {
        let len = self.table_len.min(BUF_MAX);
        waveform::synthesize(&mut self.samples[..len], self.shape, self.amplitude_pct);
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self::new(CHANNEL_0)
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("index", &self.index)
            .field("shape", &self.shape)
            .field("amplitude_pct", &self.amplitude_pct)
            .field("frequency_hz", &self.frequency_hz)
            .field("table_len", &self.table_len)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ChannelSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ch{}: {:?} {}% @ {}Hz ({} samples)",
            self.index, self.shape, self.amplitude_pct, self.frequency_hz, self.table_len
        )
    }
}
