use std::io::Stdout;

use crossterm::{execute, terminal, ExecutableCommand};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::Result;

pub type DashboardTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Puts the terminal in raw mode on the alternate screen while the dashboard runs.
/// Log output is redirected to a file for that period, so nothing else writes here.
pub struct TerminalGuard {
    terminal: DashboardTerminal,
    restored: bool,
}

impl TerminalGuard {
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, terminal::EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    pub fn terminal_mut(&mut self) -> &mut DashboardTerminal {
        &mut self.terminal
    }

    /// Called when the user quits; a second call, including the one from `Drop`, is a no-op.
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        self.terminal.show_cursor()?;
        self.terminal
            .backend_mut()
            .execute(terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
