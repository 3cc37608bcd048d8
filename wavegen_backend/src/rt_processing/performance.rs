use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use quanta::{Clock, Instant as QuantaInstant};
use wavegen_core::config::FREQ_SAMPLING;

/// Snapshot of generator metrics for logging or a status display (non-RT).
#[derive(Debug, Clone)]
pub struct PerformanceSnapshot {
    /// Frame tables published by the command loop.
    pub publish_count: u64,
    /// Frames handed to the transmitter, silence included.
    pub frames_transmitted: u64,
    /// Transmit requests answered with silence.
    pub underrun_count: u64,
    /// Fastest pack observed (ns).
    pub min_pack_nanos: Option<u64>,
    /// Slowest pack observed (ns).
    pub max_pack_nanos: Option<u64>,
    /// EMA of pack duration in nanoseconds.
    pub ema_pack_nanos: f64,
    /// Seconds of output at the link sample rate.
    pub transmitted_seconds: f64,
    pub timestamp: Instant,
}

/// Lock-free counters shared by the command loop and the transmit side.
///
/// `add_*`/`increment_*` and the `scoped_publish` guard only touch atomics and
/// may be called from the transmit path. `snapshot` and `reset_all` are not.
pub struct PerformanceMonitor {
    clock: Clock,

    publish_count: AtomicU64,
    frames_transmitted: AtomicU64,
    underrun_count: AtomicU64,

    min_pack_nanos: AtomicU64,
    max_pack_nanos: AtomicU64,
    /// EMA stored as f64 bits
    ema_pack_bits: AtomicU64,

    ema_alpha: f64,
}

impl PerformanceMonitor {
    /// `ema_alpha` in (0, 1]; values around 0.05..0.2 smooth well.
    pub fn new(ema_alpha: f64) -> Self {
        assert!(ema_alpha > 0.0 && ema_alpha <= 1.0);
        Self {
            clock: Clock::new(),
            publish_count: AtomicU64::new(0),
            frames_transmitted: AtomicU64::new(0),
            underrun_count: AtomicU64::new(0),
            min_pack_nanos: AtomicU64::new(u64::MAX),
            max_pack_nanos: AtomicU64::new(0),
            ema_pack_bits: AtomicU64::new(0),
            ema_alpha,
        }
    }

    #[inline(always)]
    pub fn add_frames_transmitted(&self, n: u64) {
        self.frames_transmitted.fetch_add(n, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn increment_underrun_count(&self) {
        self.underrun_count.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn increment_publish_count(&self) {
        self.publish_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one pack duration. Updates min, max and EMA.
    #[inline(always)]
    pub fn record_pack_duration_nanos(&self, nanos: u64) {
        self.min_pack_nanos.fetch_min(nanos, Ordering::Relaxed);
        self.max_pack_nanos.fetch_max(nanos, Ordering::Relaxed);

        // EMA_new = alpha * x + (1 - alpha) * EMA_old
        let alpha = self.ema_alpha;
        let _ = self
            .ema_pack_bits
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |old_bits| {
                let old = f64::from_bits(old_bits);
                Some((alpha * nanos as f64 + (1.0 - alpha) * old).to_bits())
            });
    }

    #[inline(always)]
    pub fn record_pack_duration(&self, d: Duration) {
        self.record_pack_duration_nanos(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX));
    }

    /// Counts a publish now and records its duration when the guard drops.
    #[inline(always)]
    pub fn scoped_publish(&self) -> PublishGuard<'_> {
        self.increment_publish_count();
        PublishGuard {
            monitor: self,
            start: self.clock.now(),
        }
    }

    /// If `reset_peaks` is set, min/max/EMA start over after reading.
    pub fn snapshot(&self, reset_peaks: bool) -> PerformanceSnapshot {
        let frames_transmitted = self.frames_transmitted.load(Ordering::Relaxed);
        let min_raw = self.min_pack_nanos.load(Ordering::Relaxed);
        let max_raw = self.max_pack_nanos.load(Ordering::Relaxed);

        if reset_peaks {
            self.reset_peaks();
        }

        PerformanceSnapshot {
            publish_count: self.publish_count.load(Ordering::Relaxed),
            frames_transmitted,
            underrun_count: self.underrun_count.load(Ordering::Relaxed),
            min_pack_nanos: (min_raw != u64::MAX).then_some(min_raw),
            max_pack_nanos: (max_raw != 0).then_some(max_raw),
            ema_pack_nanos: f64::from_bits(self.ema_pack_bits.load(Ordering::Relaxed)),
            transmitted_seconds: frames_transmitted as f64 / FREQ_SAMPLING as f64,
            timestamp: Instant::now(),
        }
    }

    fn reset_peaks(&self) {
        self.min_pack_nanos.store(u64::MAX, Ordering::Relaxed);
        self.max_pack_nanos.store(0, Ordering::Relaxed);
        self.ema_pack_bits.store(0, Ordering::Relaxed);
    }

    pub fn reset_all(&self) {
        self.publish_count.store(0, Ordering::Relaxed);
        self.frames_transmitted.store(0, Ordering::Relaxed);
        self.underrun_count.store(0, Ordering::Relaxed);
        self.reset_peaks();
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new(0.1)
    }
}

/// Records the time between construction and drop as one pack duration.
pub struct PublishGuard<'a> {
    monitor: &'a PerformanceMonitor,
    start: QuantaInstant,
}

impl Drop for PublishGuard<'_> {
    fn drop(&mut self) {
        let elapsed = self.monitor.clock.now().saturating_duration_since(self.start);
        self.monitor.record_pack_duration(elapsed);
    }
}
