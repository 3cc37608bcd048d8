//! Double-buffered frame publication between the command loop and the
//! transmitter.
//!
//! Design goals:
//! - The transmit side never blocks and never allocates.
//! - A reconfiguration packs into the idle bank, so the transmitter never sees
//!   a half-written table.
//! - If the active bank is unavailable or empty, transmit silence.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crossbeam::atomic::AtomicCell;
use spin::Mutex; // spinning lock, safe to try from the transmit path
use wavegen_core::config::{BUF_MAX, FREQ_SAMPLING};
use wavegen_core::{ChannelPair, GeneratorResult};

use crate::rt_processing::performance::PerformanceMonitor;

/// One packed frame table.
struct FrameBank {
    frames: Box<[i32]>,
    /// Valid frames, 0 until the first publish.
    len: usize,
}

impl FrameBank {
    fn new() -> Self {
        Self {
            frames: vec![0; BUF_MAX].into_boxed_slice(),
            len: 0,
        }
    }
}

/// Pack a read position and its bank into one word, bank in the low bit.
fn tag(bank: usize, pos: usize) -> usize {
    (pos << 1) | bank
}

fn untag(cursor: usize) -> (usize, usize) {
    (cursor & 1, cursor >> 1)
}

/// Holds two frame banks; one is read by the transmitter while the other is
/// rewritten by `publish`.
pub struct TransmitSlot {
    banks: [Mutex<FrameBank>; 2],
    /// Bank the transmitter reads from.
    active: AtomicCell<usize>,
    /// Read position tagged with the bank it belongs to, see [`tag`].
    /// `publish` resets it; the transmitter only advances a matching tag.
    cursor: AtomicUsize,
    /// Frames handed out so far, silence included.
    frame_clock: AtomicU64,
    monitor: Option<Arc<PerformanceMonitor>>,
}

impl TransmitSlot {
    pub fn new() -> Self {
        Self {
            banks: [Mutex::new(FrameBank::new()), Mutex::new(FrameBank::new())],
            active: AtomicCell::new(0),
            cursor: AtomicUsize::new(0),
            frame_clock: AtomicU64::new(0),
            monitor: None,
        }
    }

    pub fn with_monitor(mut self, monitor: Arc<PerformanceMonitor>) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// Pack `pair` into the idle bank and make it the active one.
    ///
    /// Call from the command loop only. Spins if the transmitter still holds
    /// the idle bank from before the previous swap. The read cursor restarts
    /// at the top of the new table.
    pub fn publish(&self, pair: &ChannelPair) -> GeneratorResult<usize> {
        let _guard = self.monitor.as_deref().map(PerformanceMonitor::scoped_publish);

        let idle = 1 - self.active.load();
        let written = {
            let mut bank = self.banks[idle].lock();
            let written = pair.pack(&mut bank.frames)?;
            bank.len = written;
            written
        };

        self.cursor.store(tag(idle, 0), Ordering::SeqCst);
        self.active.store(idle);
        Ok(written)
    }

    /// Fill `output` from the active table, wrapping at its end like a
    /// circular DMA transfer.
    ///
    /// Returns `false` and writes silence if nothing has been published yet or
    /// the bank is momentarily held by `publish`.
    ///
    /// **Important**: performs no heap allocation and never blocks.
    pub fn transmit(&self, output: &mut [i32]) -> bool {
        if output.is_empty() {
            return false;
        }
        self.frame_clock.fetch_add(output.len() as u64, Ordering::Relaxed);
        if let Some(monitor) = &self.monitor {
            monitor.add_frames_transmitted(output.len() as u64);
        }

        let active = self.active.load();
        let Some(bank) = self.banks[active].try_lock() else {
            return self.underrun(output);
        };
        if bank.len == 0 {
            return self.underrun(output);
        }

        let table = &bank.frames[..bank.len];
        let cursor = self.cursor.load(Ordering::SeqCst);
        let (cursor_bank, cursor_pos) = untag(cursor);
        // A mismatched tag means a publish swapped banks after `active` was read.
        let current = cursor_bank == active;
        let mut pos = if current { cursor_pos % table.len() } else { 0 };
        let mut filled = 0;
        while filled < output.len() {
            let n = (table.len() - pos).min(output.len() - filled);
            output[filled..filled + n].copy_from_slice(&table[pos..pos + n]);
            filled += n;
            pos = (pos + n) % table.len();
        }
        if current {
            // fails if a publish reset the cursor meanwhile; its rewind wins
            let _ = self.cursor.compare_exchange(
                cursor,
                tag(active, pos),
                Ordering::SeqCst,
                Ordering::SeqCst,
            );
        }
        true
    }

    fn underrun(&self, output: &mut [i32]) -> bool {
        output.fill(0);
        if let Some(monitor) = &self.monitor {
            monitor.increment_underrun_count();
        }
        false
    }

    /// Length of the table currently transmitted, 0 before the first publish.
    pub fn active_len(&self) -> usize {
        self.banks[self.active.load()].lock().len
    }

    /// Copy of the active table. Not for the transmit path.
    pub fn active_frames(&self) -> Vec<i32> {
        let bank = self.banks[self.active.load()].lock();
        bank.frames[..bank.len].to_vec()
    }

    /// Frames handed to the transmitter so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_clock.load(Ordering::Relaxed)
    }

    /// Seconds of output at the link sample rate.
    pub fn playback_time(&self) -> f64 {
        self.frame_count() as f64 / FREQ_SAMPLING as f64
    }
}

impl Default for TransmitSlot {
    fn default() -> Self {
        Self::new()
    }
}
