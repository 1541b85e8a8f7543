mod app;
mod handlers;
mod state;
mod ui;

use crate::app::App;
use crate::state::{StatusKind, TICK_RATE};
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::execute;
use pdm::PdmClient;
use pdmconfig::PdmConfig;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use tokio::runtime::Runtime;

fn main() -> Result<()> {
    let config = PdmConfig::load_or_onboard().with_context(|| "Failed to load pdm config")?;
    let api_url = config.api_url()?;
    let client = PdmClient::new().with_base_url(api_url);
    let runtime = Runtime::new().with_context(|| "Failed to start async runtime")?;
    let mut app = App::new(config, client);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &runtime);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    runtime: &Runtime,
) -> Result<()> {
    if app.config.tui.refresh_on_start {
        app.refresh_status(runtime);
    } else {
        // Start the poll timer without an immediate fetch.
        app.last_refresh = Some(std::time::Instant::now());
        app.set_message(StatusKind::Info, "Press r to refresh".to_string());
    }

    loop {
        app.clear_expired_message();
        app.maybe_poll(runtime);
        terminal.draw(|f| ui::render_app(f, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handlers::handle_key(app, key, runtime) {
                    return Ok(());
                }
            }
        }
    }
}
