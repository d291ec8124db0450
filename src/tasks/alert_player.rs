//! Repeating alert tone, one cancellable task per timer
//!
//! The loop follows a `watch` channel carrying the run id of the completed
//! timer (`None` while not completed). A loop started for run `r` keeps going
//! only while the channel still says `Some(r)`, so a reset followed by a
//! quick re-completion can never revive a stale loop. A new loop awaits the
//! previous one's `JoinHandle` before emitting anything.

use std::sync::Mutex;

use tokio::{sync::watch, task::JoinHandle, time::sleep};
use tracing::{debug, info, warn};

use crate::{
    error::{Error, Result},
    services::{ToneBackend, ToneCadence},
};

#[derive(Debug)]
pub struct AlertPlayer {
    name: String,
    backend: ToneBackend,
    cadence: ToneCadence,
    signal: watch::Sender<Option<u64>>,
    current: Mutex<Option<JoinHandle<()>>>,
}

impl AlertPlayer {
    pub fn new(name: impl Into<String>, backend: ToneBackend, cadence: ToneCadence) -> Self {
        let (signal, _) = watch::channel(None);
        Self {
            name: name.into(),
            backend,
            cadence,
            signal,
            current: Mutex::new(None),
        }
    }

    /// Begin alerting for `run`. Must be called from within a tokio runtime.
    pub fn start(&self, run: u64) -> Result<()> {
        let mut current = self
            .current
            .lock()
            .map_err(|_| Error::LockPoisoned("alert task"))?;

        self.signal.send_replace(Some(run));
        let previous = current.take();
        let task = tone_loop(
            self.name.clone(),
            run,
            self.backend.clone(),
            self.cadence,
            self.signal.subscribe(),
            previous,
        );
        *current = Some(tokio::spawn(task));

        info!("Alert started for '{}'", self.name);
        Ok(())
    }

    /// Signal the running loop, if any, to stop before its next tone
    pub fn stop(&self) {
        let previous = self.signal.send_replace(None);
        if previous.is_some() {
            info!("Alert stopped for '{}'", self.name);
        }
    }

    /// Whether an alert is sounding: signalled on and its loop still alive
    pub fn is_playing(&self) -> bool {
        if self.signal.borrow().is_none() {
            return false;
        }
        self.current
            .lock()
            .map(|current| current.as_ref().is_some_and(|task| !task.is_finished()))
            .unwrap_or(false)
    }

    pub fn cadence(&self) -> ToneCadence {
        self.cadence
    }

    /// Stop and wait for the loop to exit
    pub async fn shutdown(&self) {
        self.stop();
        let task = self.current.lock().ok().and_then(|mut current| current.take());
        if let Some(task) = task {
            if let Err(e) = task.await {
                warn!("Alert task for '{}' ended abnormally: {}", self.name, e);
            }
        }
    }
}

fn is_current(signal: &watch::Receiver<Option<u64>>, run: u64) -> bool {
    *signal.borrow() == Some(run)
}

/// Resolves once the signal no longer names `run`
async fn stopped(signal: &mut watch::Receiver<Option<u64>>, run: u64) {
    loop {
        if *signal.borrow_and_update() != Some(run) {
            return;
        }
        if signal.changed().await.is_err() {
            return;
        }
    }
}

async fn tone_loop(
    name: String,
    run: u64,
    backend: ToneBackend,
    cadence: ToneCadence,
    mut signal: watch::Receiver<Option<u64>>,
    previous: Option<JoinHandle<()>>,
) {
    if let Some(previous) = previous {
        if let Err(e) = previous.await {
            warn!("Previous alert task for '{}' ended abnormally: {}", name, e);
        }
    }

    debug!("Alert loop for '{}' (run {}) running", name, run);
    let mut warned = false;

    while is_current(&signal, run) {
        tokio::select! {
            biased;
            _ = stopped(&mut signal, run) => break,
            result = backend.play(&cadence) => {
                if let Err(e) = result {
                    if warned {
                        debug!("Alert tone for '{}' failed: {}", name, e);
                    } else {
                        warn!("Alert tone for '{}' failed: {}", name, e);
                        warned = true;
                    }
                }
            }
        }

        tokio::select! {
            biased;
            _ = stopped(&mut signal, run) => break,
            _ = sleep(cadence.silence) => {}
        }
    }

    debug!("Alert loop for '{}' (run {}) finished", name, run);
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
        time::Duration,
    };

    use super::*;

    fn player() -> (AlertPlayer, Arc<AtomicUsize>) {
        let tones = Arc::new(AtomicUsize::new(0));
        let player = AlertPlayer::new(
            "Tips",
            ToneBackend::Recording(Arc::clone(&tones)),
            ToneCadence::default(),
        );
        (player, tones)
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeats_once_per_cycle() {
        let (player, tones) = player();
        player.start(1).unwrap();

        sleep(Duration::from_millis(3_500)).await;
        assert_eq!(tones.load(Ordering::SeqCst), 4);
        assert!(player.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_silences_within_one_cycle() {
        let (player, tones) = player();
        player.start(1).unwrap();
        sleep(Duration::from_millis(1_500)).await;
        let before = tones.load(Ordering::SeqCst);

        player.stop();
        assert!(!player.is_playing());
        sleep(player.cadence().period()).await;
        assert!(!player.is_playing());

        sleep(Duration::from_secs(5)).await;
        assert_eq!(tones.load(Ordering::SeqCst), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_never_overlaps() {
        let (player, tones) = player();
        player.start(1).unwrap();
        sleep(Duration::from_millis(1_500)).await;
        assert_eq!(tones.load(Ordering::SeqCst), 2);

        player.stop();
        player.start(2).unwrap();
        sleep(Duration::from_millis(3_050)).await;

        // One tone per second from the new loop only
        assert_eq!(tones.load(Ordering::SeqCst), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_run_does_not_survive_quick_restart() {
        let (player, tones) = player();
        player.start(1).unwrap();
        sleep(Duration::from_millis(300)).await;

        // Signal moves straight from run 1 to run 2 without a visible None
        player.start(2).unwrap();
        sleep(Duration::from_millis(2_050)).await;
        assert_eq!(tones.load(Ordering::SeqCst), 1 + 3);

        player.shutdown().await;
        assert!(!player.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_without_start_is_harmless() {
        let (player, tones) = player();
        player.stop();
        player.shutdown().await;
        assert_eq!(tones.load(Ordering::SeqCst), 0);
    }
}
