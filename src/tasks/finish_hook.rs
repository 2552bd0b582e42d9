//! Finish hook background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use crate::{
    services::run_finish_command,
    state::{AppState, CountdownEvent},
};

/// Background task that reacts to countdown completion
pub async fn finish_hook_task(state: Arc<AppState>, command: Option<String>) {
    info!("Starting finish hook task");

    let mut events = state.subscribe_events();

    loop {
        match events.recv().await {
            Ok(CountdownEvent::Finished) => {
                info!("Countdown reached zero");

                if let Some(command) = command.as_deref() {
                    if let Err(e) = run_finish_command(command).await {
                        error!("{}", e);
                    }
                }
            }
            Ok(event) => {
                debug!("Finish hook observed {:?}", event);
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Finish hook lagged behind by {} events", skipped);
            }
            Err(RecvError::Closed) => {
                debug!("Countdown event channel closed, stopping finish hook");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use crate::tasks::ManualTickScheduler;

    #[tokio::test]
    async fn runs_command_when_countdown_finishes() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("finished");

        let scheduler = ManualTickScheduler::new();
        let state = Arc::new(AppState::new(
            0,
            "127.0.0.1".to_string(),
            Arc::new(scheduler.clone()),
        ));
        let hook = tokio::spawn(finish_hook_task(
            Arc::clone(&state),
            Some(format!("touch {}", marker.display())),
        ));
        // Let the hook subscribe before anything is published
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(20)).await;

        state.preset(None, None, Some(1)).unwrap();
        state.play().unwrap();
        assert!(!marker.exists());
        scheduler.fire();

        for _ in 0..100 {
            if marker.exists() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(marker.exists());
        hook.abort();
    }
}
