//! Tacoshack Timers - countdown timers with repeating completion alerts
//!
//! This is the main entry point for the tacoshack-timers application.

use std::{future, io, sync::Arc};

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use tacoshack_timers::{
    api::create_router,
    clock::SystemClock,
    config::{default_timers, Config},
    services::{ToneBackend, ToneCadence},
    state::{AppOptions, AppState},
    tasks::{dashboard_task, keyboard_task, poll_loop_task, KeyboardExit},
    utils::{shutdown_signal, stdin_is_terminal, CrlfWriter, RawModeGuard},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    let keyboard = !config.no_keyboard && stdin_is_terminal();

    // Logs go to stderr so the dashboard keeps stdout to itself
    let writer = if keyboard {
        BoxMakeWriter::new(|| CrlfWriter(io::stderr()))
    } else {
        BoxMakeWriter::new(io::stderr)
    };
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "tacoshack_timers={},tower_http=info",
            config.log_level()
        ))
        .with_writer(writer)
        .init();

    info!("Starting tacoshack-timers v{}", env!("CARGO_PKG_VERSION"));
    if !config.no_keyboard && !keyboard {
        info!("stdin is not a terminal, keyboard shortcuts disabled");
    }

    let backend = ToneBackend::detect(config.audio).await;
    let options = AppOptions {
        timers: default_timers()?,
        backend,
        cadence: ToneCadence::default(),
        theme: config.theme(),
        host: config.host.clone(),
        port: config.port,
    };
    let state = Arc::new(AppState::new(options, Arc::new(SystemClock::new()))?);

    for timer in state.timers() {
        info!("Timer '{}' armed", timer.name());
    }

    tokio::spawn(poll_loop_task(Arc::clone(&state), config.poll_interval()));
    if !config.no_dashboard {
        tokio::spawn(dashboard_task(Arc::clone(&state)));
    }

    let raw_mode = if keyboard {
        match RawModeGuard::enable() {
            Ok(guard) => Some(guard),
            Err(e) => {
                warn!("Failed to enable raw terminal mode, keyboard shortcuts disabled: {}", e);
                None
            }
        }
    } else {
        None
    };
    let keys = raw_mode
        .is_some()
        .then(|| tokio::spawn(keyboard_task(Arc::clone(&state))));

    let quit_key = async move {
        match keys {
            Some(task) => match task.await {
                Ok(KeyboardExit::Quit) => {}
                _ => future::pending::<()>().await,
            },
            None => future::pending::<()>().await,
        }
    };
    let stop = async {
        tokio::select! {
            _ = shutdown_signal() => info!("Shutdown signal received"),
            _ = quit_key => info!("Quit key pressed"),
        }
    };

    if config.http {
        let addr = config.address();
        let listener = TcpListener::bind(&addr).await?;
        let app = create_router(Arc::clone(&state));

        info!("Control API on http://{}", addr);
        info!("  GET  /status                - All timers");
        info!("  GET  /timers/:name          - One timer");
        info!("  POST /timers/:name/reset    - Restart a timer");
        info!("  POST /timers/:name/enable   - Enable (and restart) a timer");
        info!("  POST /timers/:name/disable  - Disable a timer");
        info!("  POST /keys                  - Type shortcut keys");
        info!("  POST /theme/toggle          - Switch light/dark");
        info!("  GET  /health                - Health check");

        let server = axum::serve(listener, app);

        tokio::select! {
            result = server => {
                if let Err(e) = result {
                    tracing::error!("Server error: {}", e);
                }
            }
            _ = stop => {}
        }
    } else {
        stop.await;
    }

    state.shutdown().await;
    drop(raw_mode);
    println!();
    info!("Shutdown complete");
    Ok(())
}
