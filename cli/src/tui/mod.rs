pub mod app;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::client::TaskApi;
use crate::tui::app::{App, Filter, InputMode};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub async fn run<A: TaskApi>(api: A) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state and fetch the initial list once
    let mut app = App::new(api);
    app.load().await;
    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal loop failed");
        println!("{:?}", err);
    }

    Ok(())
}

async fn run_app<B: Backend, A: TaskApi>(terminal: &mut Terminal<B>, app: &mut App<A>) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected().await,
                KeyCode::Char('d') | KeyCode::Delete => app.remove_selected().await,
                KeyCode::Char('a') | KeyCode::Char('i') => app.enter_edit_mode(),
                KeyCode::Char('f') | KeyCode::Tab => app.cycle_filter(),
                KeyCode::Char('1') => app.set_filter(Filter::All),
                KeyCode::Char('2') => app.set_filter(Filter::Active),
                KeyCode::Char('3') => app.set_filter(Filter::Completed),
                KeyCode::Char('t') => app.toggle_theme(),
                KeyCode::Char('r') => app.load().await,
                _ => {}
            },
            InputMode::Editing => match key.code {
                KeyCode::Enter => app.submit_draft().await,
                KeyCode::Esc => app.exit_input_mode(),
                KeyCode::Char(c) => app.input_char(c),
                KeyCode::Backspace => app.delete_char(),
                KeyCode::Left => app.move_cursor_left(),
                KeyCode::Right => app.move_cursor_right(),
                _ => {}
            },
        }
    }
}
