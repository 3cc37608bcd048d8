use serde::{Deserialize, Serialize};

use crate::waveform::WaveShape;

/// Commands a front-end (CLI, buttons, display menu) sends to the generator.
///
/// Numeric arguments are raw requests; they are clamped when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Back to the power-on configuration.
    Init,
    SetFrequency { hz: i32 },
    SetAmplitude { channel: u8, percent: i32 },
    SetWave { channel: u8, shape: WaveShape },
    /// Repack the current tables without changing them.
    Publish,
}

impl Command {
    /// Whether applying this command can change the sample tables.
    pub fn reconfigures(&self) -> bool {
        !matches!(self, Command::Publish)
    }
}
