//! Channel state manager.
//!
//! Every command borrows the caller's descriptors, validates before touching
//! them, and leaves both tables consistent with `(shape, amplitude, table_len)`
//! on success. A rejected command changes nothing.

use log::{debug, warn};

use crate::channel::Channel;
use crate::config::{AMPLITUDE_MAX, AMPLITUDE_MIN, CHANNEL_0, CHANNEL_1, GeneratorConfig};
use crate::error::{GeneratorError, GeneratorResult};
use crate::packer;
use crate::sizer;
use crate::waveform::WaveShape;

#[inline]
pub fn clamp_amplitude(a_req: i32) -> u8 {
    a_req.clamp(AMPLITUDE_MIN as i32, AMPLITUDE_MAX as i32) as u8
}

/// Power-on configuration: channel 0 sinusoid, channel 1 sawtooth, 100%, 1 kHz.
pub fn init(ch0: &mut Channel, ch1: &mut Channel) -> GeneratorResult<()> {
    init_with(ch0, ch1, &GeneratorConfig::default())
}

pub fn init_with(
    ch0: &mut Channel,
    ch1: &mut Channel,
    config: &GeneratorConfig,
) -> GeneratorResult<()> {
    configure(ch0, ch1, config);
    Ok(())
}

pub(crate) fn configure(ch0: &mut Channel, ch1: &mut Channel, config: &GeneratorConfig) {
    for (channel, (index, settings)) in [ch0, ch1]
        .into_iter()
        .zip([CHANNEL_0, CHANNEL_1].into_iter().zip(config.channels.iter()))
    {
        channel.index = index;
        channel.shape = settings.shape;
        channel.amplitude_pct = clamp_amplitude(settings.amplitude_pct);
        sizer::resize(channel, config.frequency_hz);
        channel.resynthesize();
        debug!("initialized {}", channel.settings());
    }
}

/// Retune both channels. Out-of-range requests are clamped, never rejected.
pub fn set_freq(ch0: &mut Channel, ch1: &mut Channel, f_req: i32) -> GeneratorResult<()> {
    let size = sizer::resize(ch0, f_req);
    sizer::resize(ch1, f_req);
    ch0.resynthesize();
    ch1.resynthesize();
    debug!(
        "frequency {} Hz (requested {}), {} samples per period",
        size.frequency_hz, f_req, size.table_len
    );
    Ok(())
}

pub fn set_amplitude(channel: &mut Channel, a_req: i32) -> GeneratorResult<()> {
    check_index(channel).inspect_err(|err| warn!("amplitude change rejected: {err}"))?;

    channel.amplitude_pct = clamp_amplitude(a_req);
    channel.resynthesize();
    debug!("ch{} amplitude {}%", channel.index, channel.amplitude_pct);
    Ok(())
}

pub fn set_wave(channel: &mut Channel, shape: WaveShape) -> GeneratorResult<()> {
    check_index(channel).inspect_err(|err| warn!("waveform change rejected: {err}"))?;

    channel.shape = shape;
    channel.resynthesize();
    debug!("ch{} waveform {:?}", channel.index, shape);
    Ok(())
}

/// Publish both tables into `frames`. Returns the number of frames written.
pub fn pack(ch0: &Channel, ch1: &Channel, frames: &mut [i32]) -> GeneratorResult<usize> {
    packer::pack(ch0, ch1, frames).inspect_err(|err| warn!("pack rejected: {err}"))
}

fn check_index(channel: &Channel) -> GeneratorResult<()> {
    if channel.has_known_index() {
        Ok(())
    } else {
        Err(GeneratorError::UnknownChannel(channel.index))
    }
}
