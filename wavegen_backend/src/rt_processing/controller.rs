use std::sync::Arc;

use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use log::{error, info, warn};
use parking_lot::RwLock;
use wavegen_core::{ChannelPair, ChannelSettings, Command, GeneratorConfig, GeneratorResult};

use crate::rt_processing::performance::PerformanceMonitor;
use crate::rt_processing::transmit::TransmitSlot;

/// Handle a front-end uses to queue commands for the generator.
pub type CommandSender = Sender<Command>;

/// Last applied channel settings, readable by a display task at any time.
#[derive(Clone, Default)]
pub struct StatusBoard {
    settings: Arc<RwLock<[ChannelSettings; 2]>>,
}

impl StatusBoard {
    pub fn read(&self) -> [ChannelSettings; 2] {
        *self.settings.read()
    }

    pub fn channel(&self, index: u8) -> Option<ChannelSettings> {
        self.settings.read().get(index as usize).copied()
    }

    fn update(&self, pair: &ChannelPair) {
        *self.settings.write() = pair.settings();
    }
}

/// Foreground command loop: applies commands to the channel pair and
/// republishes the frame table the transmitter reads.
pub struct GeneratorController {
    pair: ChannelPair,
    slot: Arc<TransmitSlot>,
    monitor: Arc<PerformanceMonitor>,
    status: StatusBoard,
    commands: Receiver<Command>,
    /// Queued commands that failed, already logged by `handle`.
    rejected: u64,
}

impl GeneratorController {
    /// Build a controller in the state described by `config` and publish its
    /// first frame table.
    pub fn new(config: &GeneratorConfig) -> GeneratorResult<(Self, CommandSender)> {
        let (tx, rx) = channel::unbounded();
        let monitor = Arc::new(PerformanceMonitor::default());
        let slot = Arc::new(TransmitSlot::new().with_monitor(Arc::clone(&monitor)));

        let controller = Self {
            pair: ChannelPair::with_config(config),
            slot,
            monitor,
            status: StatusBoard::default(),
            commands: rx,
            rejected: 0,
        };
        controller.publish()?;
        Ok((controller, tx))
    }

    /// Apply one command. On success the new table is published; a rejected
    /// command leaves both the channels and the published table as they were.
    ///
    /// Failures are logged here, so queue-driven callers may drop the result.
    pub fn handle(&mut self, command: Command) -> GeneratorResult<usize> {
        if let Err(err) = self.pair.apply(command) {
            warn!("{command:?} rejected: {err}");
            return Err(err);
        }
        self.publish()
            .inspect_err(|err| error!("publishing after {command:?} failed: {err}"))
    }

    /// Process everything queued without blocking. Returns the number of
    /// commands taken off the queue, rejected ones included.
    pub fn drain(&mut self) -> usize {
        let mut handled = 0;
        loop {
            match self.commands.try_recv() {
                Ok(command) => {
                    if self.handle(command).is_err() {
                        self.rejected += 1;
                    }
                    handled += 1;
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return handled,
            }
        }
    }

    /// Block on the queue until every sender is dropped.
    pub fn run(&mut self) {
        while let Ok(command) = self.commands.recv() {
            if self.handle(command).is_err() {
                self.rejected += 1;
            }
        }
        info!(
            "command queue closed, generator loop exiting ({} commands failed)",
            self.rejected
        );
    }

    fn publish(&self) -> GeneratorResult<usize> {
        let written = self.slot.publish(&self.pair)?;
        self.status.update(&self.pair);
        info!(
            "published {} frames at {} Hz",
            written,
            self.pair.frequency_hz()
        );
        Ok(written)
    }

    /// Queued commands that `drain` or `run` could not apply.
    pub fn rejected_count(&self) -> u64 {
        self.rejected
    }

    pub fn pair(&self) -> &ChannelPair {
        &self.pair
    }

    /// Transmit side, for the DMA/ISR integration.
    pub fn slot(&self) -> Arc<TransmitSlot> {
        Arc::clone(&self.slot)
    }

    pub fn monitor(&self) -> Arc<PerformanceMonitor> {
        Arc::clone(&self.monitor)
    }

    pub fn status(&self) -> StatusBoard {
        self.status.clone()
    }
}
