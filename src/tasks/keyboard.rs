//! Keyboard shortcuts read key by key from the terminal
//!
//! Runs while the terminal is in raw mode (see
//! [`RawModeGuard`](crate::utils::RawModeGuard)), so every key press reaches
//! the shortcut buffer immediately. Raw mode also swallows Ctrl-C, which is
//! handled here as a quit key instead.

use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::{
    error::Result,
    state::{AppState, KeyOutcome},
};

/// What a single terminal event amounted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Typed(KeyOutcome),
    Quit,
    Ignored,
}

/// Why the keyboard task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardExit {
    Quit,
    Closed,
}

/// Route one terminal event: printable characters go through the shortcut
/// buffer, Ctrl-C / Ctrl-D quit, everything else is ignored
pub fn handle_event(state: &AppState, event: &Event) -> Result<KeyAction> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind,
        ..
    }) = event
    else {
        return Ok(KeyAction::Ignored);
    };
    if *kind != KeyEventKind::Press {
        return Ok(KeyAction::Ignored);
    }

    match code {
        KeyCode::Char('c') | KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
            Ok(KeyAction::Quit)
        }
        KeyCode::Char(c) => {
            let mut keys = [0u8; 4];
            Ok(KeyAction::Typed(state.type_keys(c.encode_utf8(&mut keys))?))
        }
        _ => Ok(KeyAction::Ignored),
    }
}

/// Feed key presses to the shortcut buffer until the user quits or the
/// event stream ends. Expects raw mode to be enabled by the caller.
pub async fn keyboard_task(state: Arc<AppState>) -> KeyboardExit {
    info!("Keyboard shortcuts enabled: type a timer name to reset it, '/' clears, Ctrl-C quits");

    let mut events = EventStream::new();
    while let Some(event) = events.next().await {
        let event = match event {
            Ok(event) => event,
            Err(e) => {
                warn!("Failed to read terminal event: {}", e);
                break;
            }
        };

        match handle_event(&state, &event) {
            Ok(KeyAction::Typed(outcome)) => {
                for name in &outcome.reset {
                    info!("Shortcut reset '{}'", name);
                }
                debug!("Shortcut buffer now '{}'", outcome.buffer);
            }
            Ok(KeyAction::Quit) => return KeyboardExit::Quit,
            Ok(KeyAction::Ignored) => {}
            Err(e) => warn!("Failed to handle shortcut input: {}", e),
        }
    }

    debug!("Terminal event stream closed, keyboard shortcuts disabled");
    KeyboardExit::Closed
}
