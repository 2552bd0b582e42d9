//! Shared countdown session
//!
//! Wraps the engine in a mutex, owns the active tick, and publishes views
//! and lifecycle events to watchers.

use std::{
    sync::{Arc, Mutex, MutexGuard, Weak},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::{
    countdown::{Countdown, CountdownEvent, CountdownView, TickOutcome},
    fields::Field,
    time::TICK_INTERVAL,
};
use crate::tasks::ticker::{TickFlow, TickHandle, TickScheduler};

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to lock {0}: lock poisoned")]
    Poisoned(&'static str),
}

/// Outcome of forwarding an intent to the engine
#[derive(Debug, Clone)]
pub struct IntentResult {
    pub applied: bool,
    pub view: CountdownView,
}

struct Session {
    countdown: Countdown,
    ticker: Option<TickHandle>,
    /// Bumped whenever ticking starts or stops; older callbacks are stale
    generation: u64,
}

impl Session {
    fn cancel_ticker(&mut self) {
        self.generation += 1;
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}

/// Parts reachable from tick callbacks
struct Shared {
    session: Mutex<Session>,
    view_tx: watch::Sender<CountdownView>,
    event_tx: broadcast::Sender<CountdownEvent>,
}

impl Shared {
    fn lock(&self) -> Result<MutexGuard<'_, Session>, StateError> {
        self.session.lock().map_err(|_| StateError::Poisoned("countdown session"))
    }

    fn publish(&self, view: CountdownView, event: Option<CountdownEvent>) {
        // send_replace never fails, even without receivers
        self.view_tx.send_replace(view);

        if let Some(event) = event {
            if let Err(e) = self.event_tx.send(event) {
                debug!("No listeners for countdown event {:?}: {}", event, e);
            }
        }
    }

    fn on_tick(&self, generation: u64) -> TickFlow {
        let mut session = match self.lock() {
            Ok(session) => session,
            Err(e) => {
                warn!("Dropping tick: {}", e);
                return TickFlow::Halt;
            }
        };

        if session.generation != generation {
            debug!("Ignoring stale tick from generation {}", generation);
            return TickFlow::Halt;
        }

        match session.countdown.tick() {
            TickOutcome::Ignored => TickFlow::Halt,
            TickOutcome::Counting { .. } => {
                self.publish(session.countdown.view(), None);
                TickFlow::Continue
            }
            TickOutcome::Finished => {
                info!("Countdown finished");
                session.cancel_ticker();
                self.publish(session.countdown.view(), Some(CountdownEvent::Finished));
                TickFlow::Halt
            }
        }
    }
}

/// Main application state holding the countdown session
pub struct AppState {
    shared: Arc<Shared>,
    scheduler: Arc<dyn TickScheduler>,
    tick_interval: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    pub fn new(port: u16, host: String, scheduler: Arc<dyn TickScheduler>) -> Self {
        let countdown = Countdown::new();
        let (view_tx, _) = watch::channel(countdown.view());
        let (event_tx, _) = broadcast::channel(100);

        Self {
            shared: Arc::new(Shared {
                session: Mutex::new(Session {
                    countdown,
                    ticker: None,
                    generation: 0,
                }),
                view_tx,
                event_tx,
            }),
            scheduler,
            tick_interval: TICK_INTERVAL,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    /// Apply an intent to the engine and notify watchers if it changed anything
    fn apply<F>(&self, action: &str, intent: F) -> Result<IntentResult, StateError>
    where
        F: FnOnce(&mut Session, &Weak<Shared>) -> (bool, Option<CountdownEvent>),
    {
        let mut session = self.shared.lock()?;
        let (applied, event) = intent(&mut *session, &Arc::downgrade(&self.shared));
        let view = session.countdown.view();

        if applied {
            self.shared.publish(view.clone(), event);
            drop(session);
            self.record_action(action);
        } else {
            warn!("Ignoring {} while {:?}", action, view.state);
        }

        Ok(IntentResult { applied, view })
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Start or resume the countdown and schedule ticking
    pub fn play(&self) -> Result<IntentResult, StateError> {
        let scheduler = Arc::clone(&self.scheduler);
        let period = self.tick_interval;

        self.apply("play", move |session, shared| {
            let Some(event) = session.countdown.play() else {
                return (false, None);
            };
            info!("Countdown {:?}", event);

            session.cancel_ticker();
            let generation = session.generation;
            let shared = shared.clone();
            session.ticker = Some(scheduler.schedule(
                period,
                Box::new(move || match shared.upgrade() {
                    Some(shared) => shared.on_tick(generation),
                    None => TickFlow::Halt,
                }),
            ));
            (true, Some(event))
        })
    }

    pub fn pause(&self) -> Result<IntentResult, StateError> {
        self.apply("pause", |session, _| match session.countdown.pause() {
            Some(event) => {
                session.cancel_ticker();
                info!("Countdown {:?}", event);
                (true, Some(event))
            }
            None => (false, None),
        })
    }

    pub fn stop(&self) -> Result<IntentResult, StateError> {
        self.apply("stop", |session, _| match session.countdown.stop() {
            Some(event) => {
                session.cancel_ticker();
                info!("Countdown stopped");
                (true, Some(event))
            }
            None => (false, None),
        })
    }

    pub fn focus_field(&self, field: Field) -> Result<IntentResult, StateError> {
        self.apply(&format!("focus-{}", field), |session, _| {
            (session.countdown.focus_field(field), None)
        })
    }

    pub fn change_field(&self, field: Field, raw: &str) -> Result<IntentResult, StateError> {
        self.apply(&format!("change-{}", field), |session, _| {
            (session.countdown.change_field(field, raw), None)
        })
    }

    pub fn edit_done(&self) -> Result<IntentResult, StateError> {
        self.apply("edit-done", |session, _| (session.countdown.edit_done(), None))
    }

    /// Fill the fields as if the user typed the values and confirmed
    pub fn preset(
        &self,
        hours: Option<u64>,
        minutes: Option<u64>,
        seconds: Option<u64>,
    ) -> Result<CountdownView, StateError> {
        let values = [
            (Field::Hours, hours),
            (Field::Minutes, minutes),
            (Field::Seconds, seconds),
        ];
        for (field, value) in values {
            if let Some(value) = value {
                self.change_field(field, &value.to_string())?;
            }
        }
        Ok(self.edit_done()?.view)
    }

    /// Cancel any pending tick, leaving the engine as it is
    pub fn shutdown(&self) -> Result<(), StateError> {
        let mut session = self.shared.lock()?;
        session.cancel_ticker();
        Ok(())
    }

    pub fn get_view(&self) -> Result<CountdownView, StateError> {
        Ok(self.shared.lock()?.countdown.view())
    }

    /// Watch every published view, starting from the current one
    pub fn subscribe_views(&self) -> watch::Receiver<CountdownView> {
        self.shared.view_tx.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<CountdownEvent> {
        self.shared.event_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
