pub mod app;

pub use app::{App, Focus};

use std::io;
use std::sync::mpsc::Receiver;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use splash_core::UiConfig;
use splash_services::TodoStore;

use crate::services::{TodoService, TodoServiceMessage};

/// Puts the terminal back on every exit path: early `?` returns during
/// setup, errors from the loop and panics unwinding through `run_tui`.
struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // From here on Drop undoes raw mode even if entering the screen fails.
        let guard = Self { active: true };
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Set up the terminal, run the app until the user quits, and restore the
/// terminal even when the loop fails.
pub fn run_tui<S: TodoStore>(
    service: TodoService<S>,
    rx: Receiver<TodoServiceMessage>,
    ui: &UiConfig,
) -> io::Result<()> {
    let mut guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = std::time::Duration::from_millis(ui.tick_rate_ms);
    let mut app = App::new(service, rx, tick_rate, ui.show_help);
    let result = app.run(&mut terminal);

    guard.restore()?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!("Terminal UI failed: {}", e);
    }
    result
}
