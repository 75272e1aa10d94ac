mod app;
mod cli;
mod config;
mod logging;
mod news;
mod ui;
mod view;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use crate::cli::Cli;
use crate::news::manager::FetchManager;
use crate::news::NewsClient;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config, then let flags override it
    let mut cfg = config::load_config(cli.config.as_deref())?;
    cli.apply(&mut cfg);

    let log_path = logging::init(&cfg.logging)?;
    info!(endpoint = %cfg.api.endpoint, log = ?log_path, "starting");

    let client = NewsClient::new(cfg.api.client_settings()).context("Failed to build HTTP client")?;

    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, cfg, client).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
    client: NewsClient,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let tick_rate = Duration::from_millis(cfg.ui.tick_rate_ms.max(16));
    let mut state = AppState::new(cfg);
    let mut fetch_manager = FetchManager::new(Arc::new(client), event_tx.clone());

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if term_tx.send(AppEvent::Terminal(event)).is_err() {
                break;
            }
        }
    });

    // Spawn tick task
    let tick_tx = event_tx;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_rate);
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    let size = terminal.size()?;
    state.viewport = Rect::new(0, 0, size.width, size.height);

    // Initial render
    let mut vm = view::project(&state);
    terminal.draw(|f| ui::render(f, &state, &vm))?;

    // Main event loop
    while let Some(event) = event_rx.recv().await {
        let actions = handler::handle_event(&mut state, event);

        for action in actions {
            match action {
                Action::FetchNews { topics } => fetch_manager.start(topics),
                Action::OpenUrl { url } => {
                    info!(%url, "opening link");
                    if let Err(e) = open::that_detached(&url) {
                        warn!(%url, error = %e, "failed to open link");
                        state.set_error(format!("Could not open link: {}", e));
                    }
                }
                Action::Quit => state.should_quit = true,
            }
        }

        if state.should_quit {
            fetch_manager.cancel();
            info!("quitting");
            break;
        }

        if state.dirty {
            view::sync(&mut vm, &state);
            terminal.draw(|f| ui::render(f, &state, &vm))?;
            state.dirty = false;
        }
    }

    Ok(())
}
