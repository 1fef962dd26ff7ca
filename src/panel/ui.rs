//! Terminal user interface for the recording control panel.
//!
//! Renders recording status, elapsed duration, and session identity from the
//! session state, and maps key presses to panel commands. The panel never
//! mutates the session itself; it only reports user intent to the caller.

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::Paragraph,
};
use std::io::{stdout, Stdout};

use super::format_duration;
use crate::session::SessionState;

/// User input command from the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    /// Keep rendering (no key pressed)
    Continue,
    /// Start a new recording session ('s')
    Start,
    /// Pause or resume the current session (Space)
    TogglePause,
    /// Stop the current session ('x')
    Stop,
    /// Leave the panel (Escape, 'q', or Ctrl+C)
    Quit,
}

/// Terminal UI for the recording control panel.
pub struct RecorderPanel {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Leading characters of the session id shown in the panel.
    session_id_prefix_len: usize,
}

impl RecorderPanel {
    /// Creates the panel and enters alternate screen mode.
    ///
    /// # Errors
    /// - If the terminal cannot be initialized
    /// - If raw mode cannot be enabled
    /// - If the alternate screen cannot be entered
    pub fn new(session_id_prefix_len: usize) -> anyhow::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(RecorderPanel {
            terminal,
            session_id_prefix_len,
        })
    }

    /// Renders one frame of the panel from the session state.
    ///
    /// # Errors
    /// - If terminal rendering fails
    pub fn render(&mut self, state: &SessionState, error: Option<&str>) -> anyhow::Result<()> {
        let status = status_line(state);
        let duration = duration_line(state);
        let session = session_line(state, self.session_id_prefix_len);
        let hints = hint_line(state);

        self.terminal.draw(|frame| {
            let area = frame.area();

            let mut lines = vec![
                Line::from(Span::styled(
                    "Productivity Recorder",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Self-accountability through screen and webcam recording",
                    Style::default().fg(Color::DarkGray),
                )),
                Line::default(),
                status,
                duration,
            ];
            if let Some(session) = session {
                lines.push(session);
            }
            if let Some(error) = error {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    format!("⚠ {error}"),
                    Style::default().fg(Color::Red),
                )));
            }

            let body_height = lines.len() as u16;
            let body_area = Rect {
                x: area.x,
                y: area.y + area.height.saturating_sub(body_height + 1) / 2,
                width: area.width,
                height: body_height.min(area.height),
            };
            frame.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center),
                body_area,
            );

            let footer_area = Rect {
                x: area.x,
                y: area.y + area.height.saturating_sub(1),
                width: area.width,
                height: 1,
            };
            frame.render_widget(
                Paragraph::new(hints).alignment(Alignment::Center),
                footer_area,
            );
        })?;

        Ok(())
    }

    /// Processes user input and returns the appropriate panel command.
    ///
    /// Polls for 50ms so the caller can keep the clock and rendering moving.
    /// Unrecognized keys are ignored.
    ///
    /// # Errors
    /// - If event polling fails
    pub fn handle_input(&mut self) -> anyhow::Result<PanelCommand> {
        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                return Ok(match key.code {
                    KeyCode::Char('s') => {
                        tracing::debug!("'s' pressed: start recording");
                        PanelCommand::Start
                    }
                    KeyCode::Char(' ') => {
                        tracing::debug!("Space pressed: toggle pause");
                        PanelCommand::TogglePause
                    }
                    KeyCode::Char('x') => {
                        tracing::debug!("'x' pressed: stop recording");
                        PanelCommand::Stop
                    }
                    KeyCode::Char('q') | KeyCode::Esc => {
                        tracing::debug!("Escape or 'q' pressed: leaving panel");
                        PanelCommand::Quit
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        tracing::debug!("Ctrl+C pressed: leaving panel");
                        PanelCommand::Quit
                    }
                    _ => PanelCommand::Continue,
                });
            }
        }
        Ok(PanelCommand::Continue)
    }

    /// Cleans up terminal state and exits alternate screen mode.
    ///
    /// # Errors
    /// - If terminal mode cannot be disabled
    /// - If the cursor cannot be shown
    pub fn cleanup(&mut self) -> anyhow::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for RecorderPanel {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn status_line(state: &SessionState) -> Line<'static> {
    let (indicator, label, color) = if !state.is_recording() {
        ("○", "Ready to Record", Color::DarkGray)
    } else if state.is_paused() {
        ("⏸", "Recording Paused", Color::Yellow)
    } else {
        ("●", "Recording Active", Color::Red)
    };

    Line::from(Span::styled(
        format!("{indicator} {label}"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn duration_line(state: &SessionState) -> Line<'static> {
    Line::from(vec![
        Span::styled("Duration ", Style::default().fg(Color::DarkGray)),
        Span::raw(format_duration(state.duration_secs())),
    ])
}

fn session_line(state: &SessionState, prefix_len: usize) -> Option<Line<'static>> {
    let session_id = state.session_id()?;
    let shown: String = session_id.chars().take(prefix_len).collect();
    let suffix = if session_id.chars().count() > prefix_len {
        "…"
    } else {
        ""
    };
    Some(Line::from(vec![
        Span::styled("Session  ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{shown}{suffix}")),
    ]))
}

fn hint_line(state: &SessionState) -> Line<'static> {
    let hints = if !state.is_recording() {
        "s start recording / q quit"
    } else if state.is_paused() {
        "space resume / x stop / q quit"
    } else {
        "space pause / x stop / q quit"
    };
    Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
}
