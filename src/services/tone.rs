//! Tone output backends for the alert player

#[cfg(test)]
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::{io::Write, time::Duration};

use tokio::{process::Command, time::sleep};
use tracing::{debug, info, warn};

use crate::config::AudioChoice;

/// Shape of one alert cycle: a tone followed by silence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneCadence {
    pub frequency_hz: u32,
    pub tone: Duration,
    pub silence: Duration,
}

impl ToneCadence {
    /// Longest time between a stop request and the next tone being suppressed
    pub fn period(&self) -> Duration {
        self.tone + self.silence
    }
}

impl Default for ToneCadence {
    fn default() -> Self {
        Self {
            frequency_hz: 440,
            tone: Duration::from_millis(200),
            silence: Duration::from_millis(800),
        }
    }
}

/// Where tones go
#[derive(Debug, Clone)]
pub enum ToneBackend {
    /// SoX `play` synthesising a sine wave
    Sox,
    /// ASCII BEL on stderr
    Bell,
    /// No audio at all; tones are only logged
    Silent,
    #[cfg(test)]
    Recording(Arc<AtomicUsize>),
}

impl ToneBackend {
    /// Pick a backend for the requested choice, degrading when the
    /// requested one is not available.
    pub async fn detect(choice: AudioChoice) -> Self {
        let backend = match choice {
            AudioChoice::Silent => Self::Silent,
            AudioChoice::Bell => Self::Bell,
            AudioChoice::Sox => {
                if check_sox_available().await {
                    Self::Sox
                } else {
                    warn!("SoX 'play' not found, falling back to terminal bell");
                    Self::Bell
                }
            }
            AudioChoice::Auto => {
                if !cfg!(windows) && check_sox_available().await {
                    Self::Sox
                } else {
                    Self::Bell
                }
            }
        };
        info!("Alert tone backend: {}", backend.name());
        backend
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sox => "sox",
            Self::Bell => "bell",
            Self::Silent => "silent",
            #[cfg(test)]
            Self::Recording(_) => "recording",
        }
    }

    /// Emit one tone and return once it has finished sounding
    pub async fn play(&self, cadence: &ToneCadence) -> Result<(), String> {
        match self {
            Self::Sox => play_sox_tone(cadence).await,
            Self::Bell => {
                let mut stderr = std::io::stderr();
                stderr
                    .write_all(b"\x07")
                    .and_then(|_| stderr.flush())
                    .map_err(|e| format!("Failed to ring terminal bell: {}", e))?;
                sleep(cadence.tone).await;
                Ok(())
            }
            Self::Silent => {
                debug!("Alert tone ({} Hz, no audio backend)", cadence.frequency_hz);
                sleep(cadence.tone).await;
                Ok(())
            }
            #[cfg(test)]
            Self::Recording(count) => {
                count.fetch_add(1, Ordering::SeqCst);
                sleep(cadence.tone).await;
                Ok(())
            }
        }
    }
}

async fn play_sox_tone(cadence: &ToneCadence) -> Result<(), String> {
    let length = format!("{:.3}", cadence.tone.as_secs_f64());
    let frequency = cadence.frequency_hz.to_string();

    let status = Command::new("play")
        .args(["-nq", "-t", "alsa", "synth", length.as_str(), "sine", frequency.as_str()])
        .kill_on_drop(true)
        .status()
        .await
        .map_err(|e| format!("Failed to execute play: {}", e))?;

    if !status.success() {
        return Err(format!("play exited with {}", status));
    }
    Ok(())
}

/// Check whether SoX's `play` is on the PATH
pub async fn check_sox_available() -> bool {
    match Command::new("play").arg("--version").output().await {
        Ok(output) => output.status.success(),
        Err(e) => {
            debug!("SoX probe failed: {}", e);
            false
        }
    }
}
