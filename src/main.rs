//! history-modals - a terminal playground for the modal coordinator
//!
//! Opens modals over a simulated tab history so the back and forward
//! buttons can be exercised from the keyboard.

mod action;
mod app;
mod component;
mod components;
mod config;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable overriding `log_level` from the config
const LOG_ENV: &str = "HISTORY_MODALS_LOG";

fn main() -> Result<()> {
    let (config, created) = match Config::load() {
        Some(config) => (config, false),
        None => (Config::default(), true),
    };

    // Log to a file; stdout belongs to the terminal UI
    if let Err(err) = init_logging(&config) {
        eprintln!("Logging disabled: {:#}", err);
    }

    if created {
        match config.save() {
            Ok(()) => tracing::info!("wrote default config"),
            Err(err) => tracing::warn!(error = %err, "could not write default config"),
        }
    }

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(config.tick_rate_ms));
    tui.enter()?;

    let mut app = App::new(config);
    app.init()?;

    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "application error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(config: &Config) -> Result<()> {
    let log_path = Config::log_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine log path"))?;
    if let Some(dir) = log_path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&log_path)?;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()?;

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            let area = frame.area();
            if let Err(e) = app.draw(frame, area) {
                tracing::error!(error = %e, "draw failed");
            }
        })?;

        let action = match tui.next_event()? {
            Some(Event::Key(key)) => app.handle_key_event(key)?,
            Some(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            Some(_) => None,
            None => Some(Action::Tick),
        };

        // Action might produce a follow-up action
        let mut current_action = action;
        while let Some(a) = current_action {
            if a != Action::Tick {
                tracing::debug!(action = %a, "dispatch");
            }
            current_action = app.update(a)?;
        }
    }

    Ok(())
}
