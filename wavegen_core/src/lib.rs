//! Two-channel waveform generator core.
//!
//! Builds one period of a sinusoid or sawtooth per channel at a commanded
//! frequency and packs both tables into 32-bit stereo frames for a serial
//! audio link running at [`config::FREQ_SAMPLING`]. Every operation works
//! through caller-owned descriptors; nothing here allocates or keeps state.

pub mod channel;
pub mod command;
pub mod config;
pub mod error;
pub mod manager;
pub mod packer;
pub mod pair;
pub mod sizer;
pub mod status;
pub mod waveform;

pub use channel::{Channel, ChannelSettings};
pub use command::Command;
pub use config::{ChannelConfig, GeneratorConfig};
pub use error::{ConfigError, FailureKind, GeneratorError, GeneratorResult};
pub use manager::{init, init_with, pack, set_amplitude, set_freq, set_wave};
pub use packer::{FrameBuffer, new_frame_buffer, pack_frame, unpack_frame};
pub use pair::ChannelPair;
pub use waveform::WaveShape;
