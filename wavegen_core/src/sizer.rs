use crate::channel::Channel;
use crate::config::{BUF_MAX, BUF_MIN, FREQ_MAX, FREQ_MIN, FREQ_SAMPLING};

/// Frequency and table length committed together to a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSize {
    pub frequency_hz: u16,
    pub table_len: usize,
}

#[inline]
pub fn clamp_frequency(f_req: i32) -> u16 {
    f_req.clamp(FREQ_MIN as i32, FREQ_MAX as i32) as u16
}

/// Samples per fundamental period at `FREQ_SAMPLING`, truncated and clamped
/// to the table capacity.
#[inline]
pub fn table_len_for(frequency_hz: u16) -> usize {
    let len = FREQ_SAMPLING / u32::from(frequency_hz.max(1));
    (len as usize).clamp(BUF_MIN, BUF_MAX)
}

pub fn size_for(f_req: i32) -> TableSize {
    let frequency_hz = clamp_frequency(f_req);
    TableSize {
        frequency_hz,
        table_len: table_len_for(frequency_hz),
    }
}

/// Commit the sizing for `f_req` to `channel`. Does not resynthesize.
pub fn resize(channel: &mut Channel, f_req: i32) -> TableSize {
    let size = size_for(f_req);
    channel.frequency_hz = size.frequency_hz;
    channel.table_len = size.table_len;
    size
}
