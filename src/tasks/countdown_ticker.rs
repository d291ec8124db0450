//! Once-per-second driver for a timer's countdown

use std::{sync::Arc, time::Duration};

use tokio::time::interval;
use tracing::{debug, error, info};

use crate::{state::TimerHandle, timer::CountdownState};

/// Tick the countdown of `handle` every second for as long as `run` is the
/// timer's current run and the countdown is active
pub async fn countdown_ticker_task(handle: Arc<TimerHandle>, run: u64) {
    debug!("Starting countdown ticker for '{}' (run {})", handle.name(), run);

    let mut ticker = interval(Duration::from_secs(1));
    // The first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;

        match handle.tick_countdown(run) {
            Ok(Some(CountdownState::Active)) => {}
            Ok(Some(CountdownState::Finished)) => {
                info!("Countdown for '{}' finished", handle.name());
                break;
            }
            Ok(_) => {
                debug!("Countdown ticker for '{}' superseded by a reset", handle.name());
                break;
            }
            Err(e) => {
                error!("Failed to tick countdown for '{}': {}", handle.name(), e);
                break;
            }
        }
    }
}
