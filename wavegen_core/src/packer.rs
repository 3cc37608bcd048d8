//! Interleaving of the two channel tables into 32-bit transmit frames.
//!
//! Bits 31..16 carry channel 0, bits 15..0 carry channel 1. Both samples are
//! sign-extended and combined with a wrapping add, so a negative channel 1
//! sample borrows from the upper half-word. Use [`unpack_frame`] rather than
//! a plain shift to recover the pair.

use crate::channel::Channel;
use crate::error::{GeneratorError, GeneratorResult};

/// Frame storage sized for the longest table.
pub type FrameBuffer = [i32; crate::config::BUF_MAX];

pub fn new_frame_buffer() -> FrameBuffer {
    [0; crate::config::BUF_MAX]
}

#[inline(always)]
pub fn pack_frame(ch0: i16, ch1: i16) -> i32 {
    (i32::from(ch0) << 16).wrapping_add(i32::from(ch1))
}

/// Exact inverse of [`pack_frame`].
#[inline(always)]
pub fn unpack_frame(frame: i32) -> (i16, i16) {
    let ch1 = frame as i16;
    let ch0 = (frame.wrapping_sub(i32::from(ch1)) >> 16) as i16;
    (ch0, ch1)
}

/// Write `table_len` frames into `frames` and return how many were written.
///
/// Frames past `table_len` are left untouched.
pub fn pack(ch0: &Channel, ch1: &Channel, frames: &mut [i32]) -> GeneratorResult<usize> {
    if ch0.table_len() != ch1.table_len() {
        return Err(GeneratorError::LengthMismatch {
            ch0: ch0.table_len(),
            ch1: ch1.table_len(),
        });
    }

    let len = ch0.table_len();
    if frames.len() < len {
        return Err(GeneratorError::FrameBufferTooSmall {
            needed: len,
            capacity: frames.len(),
        });
    }

    for ((out, &left), &right) in frames[..len]
        .iter_mut()
        .zip(ch0.samples())
        .zip(ch1.samples())
    {
        *out = pack_frame(left, right);
    }

    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BUF_MAX;

    fn channel_with(index: u8, samples: &[i16]) -> Channel {
        let mut channel = Channel::new(index);
        channel.samples[..samples.len()].copy_from_slice(samples);
        channel.table_len = samples.len();
        channel
    }

    #[test]
    fn test_layout() {
        let ch0 = channel_with(0, &[0x0001, 0x0002, 0x0003, 0x0004]);
        let ch1 = channel_with(1, &[0x00FF, 0x00FE, 0x00FD, 0x00FC]);
        let mut frames = new_frame_buffer();

        assert_eq!(pack(&ch0, &ch1, &mut frames), Ok(4));
        assert_eq!(&frames[..4], &[0x0001_00FF, 0x0002_00FE, 0x0003_00FD, 0x0004_00FC]);
    }

    #[test]
    fn test_negative_channel_1_borrows() {
        assert_eq!(pack_frame(1, -1), 0x0000_FFFF);
        assert_eq!(pack_frame(0, -1), -1);
        assert_eq!(pack_frame(-1, 0), 0xFFFF_0000u32 as i32);
        assert_eq!(pack_frame(i16::MIN, i16::MIN), 0x7FFF_8000);
    }

    #[test]
    fn test_unpack_inverts_pack() {
        let values = [i16::MIN, -16383, -1, 0, 1, 341, 16383, i16::MAX];
        for &a in &values {
            for &b in &values {
                assert_eq!(unpack_frame(pack_frame(a, b)), (a, b));
            }
        }
    }

    #[test]
    fn test_tail_untouched() {
        let ch0 = channel_with(0, &[1, 2, 3, 4]);
        let ch1 = channel_with(1, &[5, 6, 7, 8]);
        let mut frames = [42i32; 8];
        pack(&ch0, &ch1, &mut frames).unwrap();
        assert_eq!(&frames[4..], &[42, 42, 42, 42]);
    }

    #[test]
    fn test_mismatched_lengths() {
        let ch0 = channel_with(0, &[1, 2, 3, 4, 5]);
        let ch1 = channel_with(1, &[1, 2, 3, 4]);
        let mut frames = new_frame_buffer();
        assert_eq!(
            pack(&ch0, &ch1, &mut frames),
            Err(GeneratorError::LengthMismatch { ch0: 5, ch1: 4 })
        );
        assert!(frames.iter().all(|&f| f == 0));
    }

    #[test]
    fn test_short_frame_buffer() {
        let ch0 = channel_with(0, &[1; 96]);
        let ch1 = channel_with(1, &[1; 96]);
        let mut frames = [0i32; 32];
        assert_eq!(
            pack(&ch0, &ch1, &mut frames),
            Err(GeneratorError::FrameBufferTooSmall { needed: 96, capacity: 32 })
        );
    }

    #[test]
    fn test_full_capacity() {
        let ch0 = channel_with(0, &[-2; BUF_MAX]);
        let ch1 = channel_with(1, &[3; BUF_MAX]);
        let mut frames = new_frame_buffer();
        assert_eq!(pack(&ch0, &ch1, &mut frames), Ok(BUF_MAX));
        assert!(frames.iter().all(|&f| unpack_frame(f) == (-2, 3)));
    }
}
