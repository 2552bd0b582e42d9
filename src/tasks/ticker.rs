//! Cancellable periodic tick scheduling

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tokio::{runtime::Handle, time::MissedTickBehavior};
use tracing::debug;

/// Whether a tick callback wants to keep receiving ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFlow {
    Continue,
    Halt,
}

pub type TickCallback = Box<dyn FnMut() -> TickFlow + Send + 'static>;

/// Something that can call back periodically until cancelled
pub trait TickScheduler: Send + Sync {
    /// Call `on_tick` every `period`, starting one period from now
    fn schedule(&self, period: Duration, on_tick: TickCallback) -> TickHandle;
}

/// Handle to a scheduled tick; cancelling or dropping it stops future ticks
pub struct TickHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TickHandle {
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        self.cancel_inner();
    }

    fn cancel_inner(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel_inner();
    }
}

impl std::fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Ticks driven by a tokio interval on a background task
#[derive(Debug, Clone)]
pub struct TokioTickScheduler {
    handle: Handle,
}

impl TokioTickScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Use the runtime the caller is running on
    pub fn from_current() -> Result<Self, String> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| format!("No tokio runtime available for ticking: {}", e))
    }
}

impl TickScheduler for TokioTickScheduler {
    fn schedule(&self, period: Duration, mut on_tick: TickCallback) -> TickHandle {
        let task = self.handle.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;
                if on_tick() == TickFlow::Halt {
                    debug!("Tick callback halted");
                    break;
                }
            }
        });

        let abort = task.abort_handle();
        TickHandle::new(move || abort.abort())
    }
}

struct ManualSlot {
    cancelled: Arc<AtomicBool>,
    callback: TickCallback,
}

/// Ticks fired explicitly by the owner, for tests and external clocks
#[derive(Clone, Default)]
pub struct ManualTickScheduler {
    slots: Arc<Mutex<Vec<ManualSlot>>>,
}

impl ManualTickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of schedules that are neither cancelled nor halted
    pub fn active(&self) -> usize {
        self.slots
            .lock()
            .map(|slots| {
                slots
                    .iter()
                    .filter(|slot| !slot.cancelled.load(Ordering::SeqCst))
                    .count()
            })
            .unwrap_or(0)
    }

    /// Deliver one tick to every active schedule, returning how many ran
    pub fn fire(&self) -> usize {
        // Callbacks run outside the lock so they may cancel their own handle.
        let mut pending = match self.slots.lock() {
            Ok(mut slots) => std::mem::take(&mut *slots),
            Err(_) => return 0,
        };

        let mut fired = 0;
        pending.retain_mut(|slot| {
            if slot.cancelled.load(Ordering::SeqCst) {
                return false;
            }
            fired += 1;
            (slot.callback)() == TickFlow::Continue && !slot.cancelled.load(Ordering::SeqCst)
        });

        if let Ok(mut slots) = self.slots.lock() {
            pending.append(&mut slots);
            *slots = pending;
        }
        fired
    }
}

impl TickScheduler for ManualTickScheduler {
    fn schedule(&self, _period: Duration, on_tick: TickCallback) -> TickHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        if let Ok(mut slots) = self.slots.lock() {
            slots.push(ManualSlot {
                cancelled: Arc::clone(&cancelled),
                callback: on_tick,
            });
        }
        TickHandle::new(move || cancelled.store(true, Ordering::SeqCst))
    }
}
