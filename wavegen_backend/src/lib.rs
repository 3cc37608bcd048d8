//! Runtime side of the two-channel waveform generator: the command loop,
//! double-buffered frame publication to the transmitter, and pack telemetry.

pub mod rt_processing;

pub use rt_processing::controller::{CommandSender, GeneratorController, StatusBoard};
pub use rt_processing::performance::{PerformanceMonitor, PerformanceSnapshot};
pub use rt_processing::transmit::TransmitSlot;
