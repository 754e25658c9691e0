//! Audio feature producer thread and the latest-value hand-off cell.
//!
//! The producer runs on its own thread at the capture cadence, decoupled
//! from rendering. It publishes immutable feature snapshots into a
//! single-slot overwrite cell: the render loop reads opportunistically and
//! treats "nothing new" as a normal state. No backpressure is applied;
//! unread snapshots are simply overwritten.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use arc_swap::ArcSwapOption;
use thiserror::Error;
use tracing::{debug, warn};

use crate::features::{AudioFeatureSample, FeatureTracker};

/// Capture collaborator: yields successive fixed-duration sample blocks.
pub trait AudioSource: Send {
    fn sample_rate(&self) -> u32;
    fn next_block(&mut self) -> Result<Vec<f32>, AudioError>;
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio device unavailable: {0}")]
    DeviceUnavailable(String),
    #[error("audio capture failed: {0}")]
    CaptureFailed(String),
}

/// Single-producer single-consumer overwrite cell, newest-wins.
///
/// `publish` replaces any pending value; `take` removes and returns the
/// pending value, if any. At most one value is ever pending.
#[derive(Debug)]
pub struct LatestCell<T> {
    slot: ArcSwapOption<T>,
}

impl<T> Default for LatestCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LatestCell<T> {
    pub fn new() -> Self {
        Self {
            slot: ArcSwapOption::const_empty(),
        }
    }

    pub fn publish(&self, value: T) {
        self.slot.store(Some(Arc::new(value)));
    }

    /// Non-blocking read; `None` means no new value since the last take.
    pub fn take(&self) -> Option<Arc<T>> {
        self.slot.swap(None)
    }
}

/// Owns the capture thread and the shared hand-off cell.
///
/// The thread ends on its own when the source reports an error; the render
/// loop keeps running on "no data". Dropping the producer without calling
/// [`stop`](Self::stop) abandons the thread, which is fine - it holds no
/// state that needs flushing.
pub struct AudioFeatureProducer {
    cell: Arc<LatestCell<AudioFeatureSample>>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl AudioFeatureProducer {
    /// Start the capture loop on a dedicated thread.
    pub fn spawn(mut source: Box<dyn AudioSource>) -> Self {
        let cell = Arc::new(LatestCell::new());
        let running = Arc::new(AtomicBool::new(true));

        let thread_cell = Arc::clone(&cell);
        let thread_running = Arc::clone(&running);
        let handle = thread::spawn(move || {
            let mut tracker = FeatureTracker::new(source.sample_rate());
            while thread_running.load(Ordering::Relaxed) {
                match source.next_block() {
                    Ok(block) => {
                        let sample = tracker.process_block(&block);
                        if sample.kick_detected {
                            debug!(bass = sample.bass_density, "kick detected");
                        }
                        thread_cell.publish(sample);
                    }
                    Err(err) => {
                        warn!(%err, "audio capture stopped; rendering continues without audio");
                        break;
                    }
                }
            }
            debug!("audio feature producer exited");
        });

        Self {
            cell,
            running,
            handle: Some(handle),
        }
    }

    /// Shared handle to the hand-off cell for the render loop.
    pub fn cell(&self) -> Arc<LatestCell<AudioFeatureSample>> {
        Arc::clone(&self.cell)
    }

    /// Ask the thread to finish after its current block and join it.
    pub fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
