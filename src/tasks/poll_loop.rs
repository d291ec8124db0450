//! Fixed-cadence polling of every timer

use std::{sync::Arc, time::Duration};

use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use crate::state::AppState;

/// Tick every timer at `period` and publish the resulting snapshots.
/// Correctness does not depend on `period`; it only bounds how late a
/// completion is noticed.
pub async fn poll_loop_task(state: Arc<AppState>, period: Duration) {
    info!("Starting poll loop every {:?}", period);

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        state.poll_all();
    }
}
