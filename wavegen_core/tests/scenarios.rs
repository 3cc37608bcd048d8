use wavegen_core::config::{BUF_MAX, BUF_MIN, FREQ_MAX, FREQ_MIN, FREQ_SAMPLING};
use wavegen_core::{
    Channel, GeneratorError, WaveShape, init, new_frame_buffer, pack, pack_frame, set_amplitude,
    set_freq, set_wave, status, unpack_frame,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn initialized() -> (Channel, Channel) {
    init_logger();
    let mut c0 = Channel::new(0);
    let mut c1 = Channel::new(1);
    init(&mut c0, &mut c1).unwrap();
    (c0, c1)
}

#[test]
fn init_defaults() {
    let (c0, c1) = initialized();
    let s0 = c0.settings();
    let s1 = c1.settings();

    assert_eq!(
        (s0.index, s0.shape, s0.amplitude_pct, s0.frequency_hz, s0.table_len),
        (0, WaveShape::Sinusoid, 100, 1000, 96)
    );
    assert_eq!(
        (s1.index, s1.shape, s1.amplitude_pct, s1.frequency_hz, s1.table_len),
        (1, WaveShape::Sawtooth, 100, 1000, 96)
    );
}

#[test]
fn frequency_clamp_high() {
    let (mut c0, mut c1) = initialized();
    set_freq(&mut c0, &mut c1, 25_000).unwrap();
    for c in [&c0, &c1] {
        assert_eq!(c.frequency_hz(), 24_000);
        assert_eq!(c.table_len(), 4);
    }
}

#[test]
fn frequency_clamp_low() {
    let (mut c0, mut c1) = initialized();
    set_freq(&mut c0, &mut c1, 12).unwrap();
    for c in [&c0, &c1] {
        assert_eq!(c.frequency_hz(), 20);
        assert_eq!(c.table_len(), 4_800);
    }
}

#[test]
fn amplitude_clamp() {
    let (mut c0, _) = initialized();
    set_amplitude(&mut c0, 105).unwrap();
    assert_eq!(c0.amplitude_pct(), 100);
    set_amplitude(&mut c0, -1).unwrap();
    assert_eq!(c0.amplitude_pct(), 0);
}

#[test]
fn reject_unknown_channel_index() {
    init_logger();
    let mut stray = Channel::new(7);
    let before = stray.clone();

    assert_eq!(set_amplitude(&mut stray, 33), Err(GeneratorError::UnknownChannel(7)));
    assert_eq!(status::set_amplitude(Some(&mut stray), 33), -1);
    assert_eq!(status::set_wave(Some(&mut stray), WaveShape::Sawtooth), -1);
    assert_eq!(stray, before);
}

#[test]
fn pack_layout_and_sign_extension() {
    assert_eq!(pack_frame(0x0001, 0x00FF), 0x0001_00FF);
    assert_eq!(pack_frame(0x0002, 0x00FE), 0x0002_00FE);
    assert_eq!(pack_frame(1, -1), 0x0000_FFFF);
    assert_eq!(unpack_frame(0x0000_FFFF), (1, -1));
}

#[test]
fn frequency_sweep_keeps_invariants() {
    let (mut c0, mut c1) = initialized();
    let requests = (-50..=50).chain((0..=30_000).step_by(7)).chain([i32::MIN, i32::MAX]);
    for f_req in requests {
        set_freq(&mut c0, &mut c1, f_req).unwrap();
        for c in [&c0, &c1] {
            let f = c.frequency_hz();
            assert!((FREQ_MIN..=FREQ_MAX).contains(&f));
            let expected = (FREQ_SAMPLING / f as u32) as usize;
            assert_eq!(c.table_len(), expected.clamp(BUF_MIN, BUF_MAX));
        }
    }
}

#[test]
fn amplitude_sweep_keeps_invariants() {
    let (mut c0, _) = initialized();
    for a_req in -300..=300 {
        set_amplitude(&mut c0, a_req).unwrap();
        assert!(c0.amplitude_pct() <= 100);
    }
}

#[test]
fn sinusoid_is_never_trivially_zero() {
    let (mut c0, mut c1) = initialized();
    for f in [20, 440, 1000, 12_000, 24_000] {
        set_freq(&mut c0, &mut c1, f).unwrap();
        for a in 1..=100 {
            set_amplitude(&mut c0, a).unwrap();
            assert!(
                c0.samples().iter().any(|&s| s != 0),
                "silent table at {f} Hz, {a}%"
            );
        }
    }
}

#[test]
fn zero_amplitude_is_silent_for_both_shapes() {
    let (mut c0, mut c1) = initialized();
    set_freq(&mut c0, &mut c1, 20).unwrap();
    for shape in [WaveShape::Sinusoid, WaveShape::Sawtooth] {
        set_wave(&mut c0, shape).unwrap();
        set_amplitude(&mut c0, 0).unwrap();
        assert!(c0.samples().iter().all(|&s| s == 0));
    }
}

#[test]
fn pack_reflects_descriptors() {
    let (mut c0, mut c1) = initialized();
    set_freq(&mut c0, &mut c1, 440).unwrap();
    set_amplitude(&mut c1, 73).unwrap();

    let mut frames = new_frame_buffer();
    let written = pack(&c0, &c1, &mut frames).unwrap();
    assert_eq!(written, c0.table_len());

    for (i, &frame) in frames[..written].iter().enumerate() {
        assert_eq!(unpack_frame(frame), (c0.samples()[i], c1.samples()[i]));
        assert_eq!(frame as i16, c1.samples()[i]);
    }
}

#[test]
fn reconfiguration_then_pack_tracks_table_length() {
    let (mut c0, mut c1) = initialized();
    let mut frames = new_frame_buffer();

    set_freq(&mut c0, &mut c1, 24_000).unwrap();
    assert_eq!(pack(&c0, &c1, &mut frames), Ok(4));

    set_freq(&mut c0, &mut c1, 20).unwrap();
    assert_eq!(pack(&c0, &c1, &mut frames), Ok(BUF_MAX));
}
