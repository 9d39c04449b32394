use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use wordhoard::config::AppConfig;
use wordhoard::tui::app::AppState;
use wordhoard::tui::services::Services;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to file only; the terminal belongs to the TUI
    let _log_guard = wordhoard::core::logging::init_tui();
    log::info!("{} v{} starting", wordhoard::NAME, wordhoard::VERSION);

    let config = AppConfig::load();
    let tick_rate = Duration::from_millis(config.tui.tick_rate_ms.max(1));

    // Services before the terminal, so startup errors print normally
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::init(config, event_tx).await?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppState::new(event_rx, services);
    let result = app.run(&mut terminal, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        log::error!("TUI exited with error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    log::info!("Shutting down");
    Ok(())
}
