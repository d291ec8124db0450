//! Terminal presenter: one status line redrawn whenever snapshots change

use std::{
    io::{self, Write},
    sync::Arc,
};

use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use tracing::{debug, warn};

use crate::{
    presentation::{Palette, TimerView},
    state::{AppState, TimerSnapshot},
};

const BAR_CELLS: usize = 20;

/// Queue one timer as `Name [bar] 42% 03:10`, coloured from `palette`
pub fn render_cell(out: &mut impl Write, view: &TimerView, palette: &Palette) -> io::Result<()> {
    let filled = if view.completed {
        BAR_CELLS
    } else {
        ((view.progress * BAR_CELLS as f64).floor() as usize).min(BAR_CELLS)
    };
    let (done, rest) = if view.completed {
        (view.fill, view.fill)
    } else {
        (view.arc_fill, view.fill)
    };

    queue!(
        out,
        SetForegroundColor(palette.text.into()),
        Print(&view.name),
        ResetColor,
        Print(" ["),
        SetBackgroundColor(done.into()),
        Print(" ".repeat(filled)),
        SetBackgroundColor(rest.into()),
        Print(" ".repeat(BAR_CELLS - filled)),
        ResetColor,
        Print("]"),
    )?;

    if !view.enabled {
        queue!(out, Print(" off"))?;
    } else if view.completed {
        queue!(out, Print(" DONE"))?;
    } else {
        queue!(
            out,
            Print(format!(
                " {:>3}% {}",
                (view.progress * 100.0).floor() as u32,
                view.remaining_text
            ))
        )?;
    }

    if let Some(label) = &view.countdown_label {
        queue!(out, Print(format!(" ({})", label)))?;
    }
    Ok(())
}

/// Redraw the whole status line in place
fn draw(out: &mut impl Write, snapshots: &[TimerSnapshot], palette: &Palette) -> io::Result<()> {
    queue!(out, MoveToColumn(0))?;
    for (i, snapshot) in snapshots.iter().enumerate() {
        if i > 0 {
            queue!(out, Print("  "))?;
        }
        render_cell(out, &TimerView::render(snapshot, palette), palette)?;
    }
    queue!(out, Clear(ClearType::UntilNewLine))?;
    out.flush()
}

/// Redraw the status line on stdout for every published snapshot set
pub async fn dashboard_task(state: Arc<AppState>) {
    debug!("Starting terminal dashboard");

    let mut snapshots = state.snapshot_tx.subscribe();
    while snapshots.changed().await.is_ok() {
        let theme = match state.theme() {
            Ok(theme) => theme,
            Err(e) => {
                warn!("Failed to read theme: {}", e);
                continue;
            }
        };

        let current = snapshots.borrow_and_update().clone();
        if let Err(e) = draw(&mut io::stdout().lock(), &current, theme.palette()) {
            warn!("Failed to draw dashboard, stopping it: {}", e);
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use crate::{
        clock::ManualClock,
        presentation::{Rgb, DARK},
        state::app_state::tests::test_state,
        timer::TimerStatus,
    };

    fn view(progress: f64, completed: bool, enabled: bool) -> TimerView {
        TimerView {
            name: "Tips".to_string(),
            status: TimerStatus::Running,
            progress,
            completed,
            enabled,
            alerting: completed,
            remaining_text: "02:30".to_string(),
            arc_start_degrees: 90.0,
            arc_extent_degrees: -progress * 360.0,
            fill: Rgb(1, 2, 3),
            arc_fill: Rgb(4, 5, 6),
            countdown_text: String::new(),
            countdown_label: None,
        }
    }

    /// Drop CSI sequences, keeping only the printed text
    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut in_escape = false;
        for c in s.chars() {
            match (in_escape, c) {
                (false, '\x1b') => in_escape = true,
                (true, c) if c.is_ascii_alphabetic() => in_escape = false,
                (true, _) => {}
                (false, c) => out.push(c),
            }
        }
        out
    }

    fn cell(view: &TimerView, palette: &Palette) -> String {
        let mut out = Vec::new();
        render_cell(&mut out, view, palette).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_running_cell() {
        let cell = strip_ansi(&cell(&view(0.5, false, true), &DARK));
        assert_eq!(cell, format!("Tips [{}]  50% 02:30", " ".repeat(BAR_CELLS)));
    }

    #[test]
    fn test_completed_and_disabled_cells() {
        let done = strip_ansi(&cell(&view(1.0, true, true), &DARK));
        assert!(done.ends_with("] DONE"));

        let mut with_countdown = view(1.0, true, true);
        with_countdown.countdown_label = Some("GS Reset: 05:00".to_string());
        let counting = strip_ansi(&cell(&with_countdown, &DARK));
        assert!(counting.ends_with("DONE (GS Reset: 05:00)"));

        let off = strip_ansi(&cell(&view(0.0, false, false), &DARK));
        assert!(off.ends_with("] off"));
    }

    #[tokio::test]
    async fn test_status_line_redraws_in_place() {
        let clock = Arc::new(ManualClock::default());
        let state = test_state(Arc::clone(&clock));
        clock.set(Duration::from_secs(150));
        let snapshots = state.poll_all();

        let mut out = Vec::new();
        draw(&mut out, &snapshots, &DARK).unwrap();
        let line = String::from_utf8(out).unwrap();

        assert!(line.starts_with("\x1b[1G"));
        assert!(line.ends_with("\x1b[K"));
        let text = strip_ansi(&line);
        assert!(text.starts_with("Tips ["));
        assert!(text.contains("  Work ["));
        assert!(text.contains("  Overtime ["));
        assert!(text.contains(" 50% 02:30"));
    }
}
