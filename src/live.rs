//! Background polling of a board's temperature history.
//!
//! A worker thread fetches on a fixed interval and hands results back over a
//! channel, mirroring how file loads are delivered. Failures are logged and
//! retried on the next tick; the previously delivered data stays on screen.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::api::{ApiClient, ApiError};
use crate::parsers::TemperatureSample;

/// Which board to follow
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardTarget {
    pub rig_id: String,
    pub board_id: String,
}

impl BoardTarget {
    pub fn new(rig_id: impl Into<String>, board_id: impl Into<String>) -> Self {
        Self {
            rig_id: rig_id.into(),
            board_id: board_id.into(),
        }
    }

    pub fn label(&self) -> String {
        format!("{} / {}", self.rig_id, self.board_id)
    }
}

/// Outcome of one poll
pub enum PollResult {
    Samples(Vec<TemperatureSample>),
    Failed(String),
}

/// Anything that can produce a board's samples; lets tests run without a server
pub trait SampleSource: Send + 'static {
    fn fetch(&self, target: &BoardTarget) -> Result<Vec<TemperatureSample>, ApiError>;
}

impl SampleSource for ApiClient {
    fn fetch(&self, target: &BoardTarget) -> Result<Vec<TemperatureSample>, ApiError> {
        self.fetch_board_history(&target.rig_id, &target.board_id)
    }
}

/// Periodic fetcher running on its own thread
pub struct BoardPoller {
    target: BoardTarget,
    receiver: Receiver<PollResult>,
    stop: Arc<AtomicBool>,
    wake: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl BoardPoller {
    /// Start polling immediately and then every `interval`
    pub fn start<S: SampleSource>(source: S, target: BoardTarget, interval: Duration) -> Self {
        let (sender, receiver) = channel();
        let (wake, wake_rx) = channel::<()>();
        let stop = Arc::new(AtomicBool::new(false));

        let worker_stop = Arc::clone(&stop);
        let worker_target = target.clone();
        let handle = thread::spawn(move || {
            loop {
                if worker_stop.load(Ordering::Relaxed) {
                    break;
                }

                let result = match source.fetch(&worker_target) {
                    Ok(samples) => PollResult::Samples(samples),
                    Err(e) => {
                        tracing::warn!("Failed to fetch {}: {}", worker_target.label(), e);
                        PollResult::Failed(e.to_string())
                    }
                };

                // Stopped while the request was in flight
                if worker_stop.load(Ordering::Relaxed) || sender.send(result).is_err() {
                    break;
                }

                // Sleep until the next tick, or until stop() wakes us
                match wake_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        tracing::info!("Polling {} every {:?}", target.label(), interval);

        Self {
            target,
            receiver,
            stop,
            wake,
            handle: Some(handle),
        }
    }

    pub fn target(&self) -> &BoardTarget {
        &self.target
    }

    /// Newest result delivered since the last call, if any.
    ///
    /// A failure never hides samples that arrived in the same batch.
    pub fn try_latest(&self) -> Option<PollResult> {
        self.receiver.try_iter().reduce(|kept, next| match (&kept, &next) {
            (PollResult::Samples(_), PollResult::Failed(_)) => kept,
            _ => next,
        })
    }

    /// Block until the next result arrives (used by tests and the CLI)
    pub fn recv_timeout(&self, timeout: Duration) -> Option<PollResult> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Signal the worker to exit without waiting for it.
    ///
    /// A request already in flight finishes (bounded by the client timeout)
    /// and its result is discarded.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        let _ = self.wake.send(());
        // Detach
        self.handle.take();
    }

    pub fn is_stopped(&self) -> bool {
        self.handle.is_none()
    }
}

impl Drop for BoardPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
