//! Render-ready description of one timer

use serde::Serialize;

use super::theme::{Palette, Rgb};
use crate::{
    state::TimerSnapshot,
    timer::{flash_phase, format_mm_ss, CountdownState, FlashPhase, TimerStatus},
};

/// Prefix shown in front of countdown text
pub const COUNTDOWN_LABEL: &str = "GS Reset";

/// Progress ring geometry and colours for one timer
///
/// The ring is a filled circle with a pie slice starting at 12 o'clock
/// (90°) and sweeping clockwise (negative extent). Once completed the slice
/// disappears and the whole circle flashes.
#[derive(Debug, Clone, Serialize)]
pub struct TimerView {
    pub name: String,
    pub status: TimerStatus,
    pub progress: f64,
    pub completed: bool,
    pub enabled: bool,
    pub alerting: bool,
    pub remaining_text: String,
    pub arc_start_degrees: f64,
    pub arc_extent_degrees: f64,
    pub fill: Rgb,
    pub arc_fill: Rgb,
    pub countdown_text: String,
    pub countdown_label: Option<String>,
}

impl TimerView {
    pub fn render(snapshot: &TimerSnapshot, palette: &Palette) -> Self {
        let fill = if snapshot.completed {
            match flash_phase(snapshot.taken_at) {
                FlashPhase::Accent => palette.accent,
                FlashPhase::Base => palette.canvas_bg,
            }
        } else {
            palette.canvas_fill
        };

        let arc_extent_degrees = if snapshot.completed {
            0.0
        } else {
            -snapshot.progress * 360.0
        };

        let countdown_label = match snapshot.countdown_state {
            Some(CountdownState::Active) | Some(CountdownState::Finished) => {
                Some(format!("{}: {}", COUNTDOWN_LABEL, snapshot.countdown_text))
            }
            _ => None,
        };

        Self {
            name: snapshot.name.clone(),
            status: snapshot.status,
            progress: snapshot.progress,
            completed: snapshot.completed,
            enabled: snapshot.enabled,
            alerting: snapshot.alerting,
            remaining_text: format_mm_ss(snapshot.remaining_seconds),
            arc_start_degrees: 90.0,
            arc_extent_degrees,
            fill,
            arc_fill: palette.arc_fill,
            countdown_text: snapshot.countdown_text.clone(),
            countdown_label,
        }
    }
}
