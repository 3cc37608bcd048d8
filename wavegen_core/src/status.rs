//! Integer-status command surface for an embedded command loop.
//!
//! Mirrors the typed operations in [`crate::manager`], but accepts optional
//! references so a missing descriptor or buffer is reportable, and returns
//! `0` on success and `-1` on any failure.

use crate::channel::Channel;
use crate::error::{GeneratorError, GeneratorResult, status_of};
use crate::manager;
use crate::waveform::WaveShape;

fn require<T>(reference: Option<T>, what: &'static str) -> GeneratorResult<T> {
    reference.ok_or(GeneratorError::MissingReference(what))
}

pub fn init(ch0: Option<&mut Channel>, ch1: Option<&mut Channel>) -> i32 {
    status_of((|| -> GeneratorResult<()> {
        let ch0 = require(ch0, "channel 0")?;
        let ch1 = require(ch1, "channel 1")?;
        manager::init(ch0, ch1)
    })())
}

pub fn set_freq(ch0: Option<&mut Channel>, ch1: Option<&mut Channel>, f_req: i32) -> i32 {
    status_of((|| -> GeneratorResult<()> {
        let ch0 = require(ch0, "channel 0")?;
        let ch1 = require(ch1, "channel 1")?;
        manager::set_freq(ch0, ch1, f_req)
    })())
}

pub fn set_amplitude(channel: Option<&mut Channel>, a_req: i32) -> i32 {
    status_of(require(channel, "channel").and_then(|ch| manager::set_amplitude(ch, a_req)))
}

pub fn set_wave(channel: Option<&mut Channel>, shape: WaveShape) -> i32 {
    status_of(require(channel, "channel").and_then(|ch| manager::set_wave(ch, shape)))
}

pub fn pack(ch0: Option<&Channel>, ch1: Option<&Channel>, frames: Option<&mut [i32]>) -> i32 {
    status_of((|| -> GeneratorResult<usize> {
        let ch0 = require(ch0, "channel 0")?;
        let ch1 = require(ch1, "channel 1")?;
        let frames = require(frames, "frame buffer")?;
        manager::pack(ch0, ch1, frames)
    })())
}
