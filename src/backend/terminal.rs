//! Character-cell front end (crossterm + ratatui)

use super::DisplayBackend;
use crate::app::App;
use crate::config::Config;
use crate::error::FrameError;
use crate::ui::{self, Theme};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{stdout, Stdout};
use std::time::Duration;
use tracing::{debug, info};

pub struct TerminalBackend {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    theme: Theme,
    poll_interval: Duration,
    active: bool,
}

impl DisplayBackend for TerminalBackend {
    type Options = Config;

    fn startup(config: Config) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;

        // Undo whatever already succeeded if a later step fails
        let terminal = match enter_screen() {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = execute!(stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                return Err(e);
            }
        };

        info!(theme = config.theme.as_str(), "terminal ready");

        Ok(Self {
            terminal,
            theme: Theme::from_name(config.theme),
            poll_interval: Duration::from_millis(config.terminal.poll_interval_ms),
            active: true,
        })
    }

    fn name(&self) -> &'static str {
        "terminal"
    }

    fn poll_events(&mut self, app: &mut App) -> Result<bool, FrameError> {
        if !event::poll(self.poll_interval)? {
            return Ok(false);
        }

        // Drain everything already queued so typing never lags a frame behind
        loop {
            match event::read()? {
                // Only handle key press events (not release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) {
                        return Ok(true);
                    }
                }
                Event::Resize(width, height) => debug!(width, height, "terminal resized"),
                _ => {}
            }

            if !app.is_running() || !event::poll(Duration::ZERO)? {
                return Ok(false);
            }
        }
    }

    fn new_frame(&mut self, app: &mut App) -> Result<(), FrameError> {
        app.sync_focus();
        Ok(())
    }

    fn render(&mut self, app: &mut App) -> Result<(), FrameError> {
        let theme = &self.theme;
        self.terminal.draw(|frame| ui::render(frame, app, theme))?;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to restore terminal")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

fn enter_screen() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}
