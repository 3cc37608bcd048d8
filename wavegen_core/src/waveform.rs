use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::config::{AMPLITUDE_MAX, SCALE_SAW, SCALE_SIN};

/// Waveform shape carried by a channel descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveShape {
    #[default]
    Sinusoid,
    Sawtooth,
}

impl WaveShape {
    /// Sample `i` of a table holding one period in `len` samples.
    ///
    /// `gain` is the amplitude as a fraction in [0.0, 1.0]. The product is
    /// truncated toward zero (and saturated) on conversion to `i16`.
    #[inline]
    pub fn sample(self, i: usize, len: usize, gain: f64) -> i16 {
        match self {
            WaveShape::Sinusoid => {
                let phase = TAU * i as f64 / len as f64;
                (gain * SCALE_SIN as f64 * phase.sin()) as i16
            }
            WaveShape::Sawtooth => {
                let step = SCALE_SAW as f64 / len as f64;
                (gain * i as f64 * step) as i16
            }
        }
    }

    /// Peak magnitude a full-amplitude table of this shape can reach.
    pub fn full_scale(self) -> i16 {
        match self {
            WaveShape::Sinusoid => SCALE_SIN,
            WaveShape::Sawtooth => SCALE_SAW,
        }
    }
}

/// Amplitude percent as a gain fraction. Real division, not integer.
#[inline]
pub fn gain_from_percent(amplitude_pct: u8) -> f64 {
    amplitude_pct as f64 / AMPLITUDE_MAX as f64
}

/// Fill `table` with exactly one period of `shape`.
///
/// The whole slice is the period, so callers pass `&mut samples[..table_len]`.
/// An empty table is left alone.
pub fn synthesize(table: &mut [i16], shape: WaveShape, amplitude_pct: u8) {
    let len = table.len();
    if len == 0 {
        return;
    }

    let gain = gain_from_percent(amplitude_pct);
    for (i, sample) in table.iter_mut().enumerate() {
        *sample = shape.sample(i, len, gain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_quarter_points() {
        let mut table = [0i16; 96];
        synthesize(&mut table, WaveShape::Sinusoid, 100);

        assert_eq!(table[0], 0);
        assert_eq!(table[24], SCALE_SIN);
        assert!(table[48].abs() <= 1);
        assert_eq!(table[72], -SCALE_SIN);
    }

    #[test]
    fn test_sine_is_one_period() {
        let mut table = [0i16; 480];
        synthesize(&mut table, WaveShape::Sinusoid, 100);

        // positive half then negative half, nothing beyond
        assert!(table[1..240].iter().all(|&s| s >= 0));
        assert!(table[241..].iter().all(|&s| s <= 0));
    }

    #[test]
    fn test_sawtooth_ramp() {
        let mut table = [0i16; 96];
        synthesize(&mut table, WaveShape::Sawtooth, 100);

        assert_eq!(table[0], 0);
        assert!(table.windows(2).all(|w| w[1] > w[0]));

        // last sample is one step short of full scale
        let expected = (95.0 * (SCALE_SAW as f64 / 96.0)) as i16;
        assert_eq!(table[95], expected);
        assert!(table[95] < SCALE_SAW);
    }

    #[test]
    fn test_half_amplitude() {
        let mut table = [0i16; 4];
        synthesize(&mut table, WaveShape::Sinusoid, 50);
        assert_eq!(table[1], (0.5 * SCALE_SIN as f64) as i16);
        assert_eq!(table[3], -((0.5 * SCALE_SIN as f64) as i16));
    }

    #[test]
    fn test_zero_amplitude_is_silent() {
        for shape in [WaveShape::Sinusoid, WaveShape::Sawtooth] {
            let mut table = [123i16; 4800];
            synthesize(&mut table, shape, 0);
            assert!(table.iter().all(|&s| s == 0), "{shape:?} not silent");
        }
    }

    #[test]
    fn test_empty_table_is_noop() {
        let mut table: [i16; 0] = [];
        synthesize(&mut table, WaveShape::Sawtooth, 100);
    }

    #[test]
    fn test_peak_never_exceeds_scale() {
        for shape in [WaveShape::Sinusoid, WaveShape::Sawtooth] {
            for len in [4usize, 5, 96, 97, 4800] {
                let mut table = vec![0i16; len];
                synthesize(&mut table, shape, 100);
                let peak = table.iter().map(|s| s.unsigned_abs()).max().unwrap();
                assert!(peak <= shape.full_scale() as u16);
            }
        }
    }

    #[test]
    fn test_gain_from_percent() {
        assert_eq!(gain_from_percent(0), 0.0);
        assert_eq!(gain_from_percent(100), 1.0);
        assert!((gain_from_percent(33) - 0.33).abs() < 1e-12);
    }
}
