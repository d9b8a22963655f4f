//! Main TUI application state and logic

use crate::trace::Session;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Expression,
    Tree,
    Tokens,
    Nodes,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: expression -> tokens -> nodes -> tree)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Expression => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Nodes,
            FocusedPane::Nodes => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Expression,
        }
    }
}

/// The main application state
pub struct App {
    /// The recorded scan/parse session being replayed
    pub session: Session,

    /// The expression string the session was recorded from
    pub input: String,

    /// Error message if the run failed (replayable up to the failure)
    pub error: Option<String>,

    /// Index of the snapshot currently on screen
    pub position: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub tokens_scroll: usize,
    pub nodes_scroll: usize,
    pub tree_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app over a recorded session.
    pub fn new(session: Session, input: String, error: Option<String>) -> Self {
        let status_message = match &error {
            Some(e) => e.clone(),
            None => String::from("Ready!"),
        };
        App {
            session,
            input,
            error,
            position: 0,
            focused_pane: FocusedPane::Expression,
            tokens_scroll: 0,
            nodes_scroll: 0,
            tree_scroll: 0,
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing {
                if self.last_play_time.elapsed() >= Duration::from_secs(1) {
                    if self.position + 1 < self.session.len() {
                        self.position += 1;
                        self.refresh_status();
                    } else {
                        self.is_playing = false;
                        self.status_message = "Playback complete".to_string();
                    }
                    self.last_play_time = Instant::now();
                }
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(pane_area);

        // Left column: Expression (top) | Tree (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(columns[0]);

        // Right column: Tokens (top) | Nodes (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let Some(snapshot) = self.session.get(self.position).cloned() else {
            return;
        };

        super::panes::render_expression_pane(
            frame,
            left_rows[0],
            &self.input,
            &snapshot,
            self.focused_pane == FocusedPane::Expression,
        );

        super::panes::render_tree_pane(
            frame,
            left_rows[1],
            &snapshot,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            right_rows[0],
            &snapshot,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        super::panes::render_nodes_pane(
            frame,
            right_rows[1],
            &snapshot,
            self.focused_pane == FocusedPane::Nodes,
            &mut self.nodes_scroll,
        );

        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.position,
            self.session.len(),
            self.is_playing,
            self.error.is_some() && self.position + 1 >= self.session.len(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                if self.position > 0 {
                    self.position -= 1;
                    self.refresh_status();
                } else {
                    self.status_message = "Already at the first step".to_string();
                }
            }
            KeyCode::Right => {
                self.is_playing = false;
                if self.position + 1 < self.session.len() {
                    self.position += 1;
                    self.refresh_status();
                } else {
                    self.status_message = "Already at the last step".to_string();
                }
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap() as usize;
                let target = (self.position + n).min(self.session.len().saturating_sub(1));
                let stepped = target - self.position;
                self.position = target;
                self.status_message = format!("Stepped forward {} step(s)", stepped);
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Tokens => {
                    self.tokens_scroll = self.tokens_scroll.saturating_sub(1);
                }
                FocusedPane::Nodes => {
                    self.nodes_scroll = self.nodes_scroll.saturating_sub(1);
                }
                FocusedPane::Tree => {
                    self.tree_scroll = self.tree_scroll.saturating_sub(1);
                }
                FocusedPane::Expression => {}
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Tokens => {
                    self.tokens_scroll = self.tokens_scroll.saturating_add(1);
                }
                FocusedPane::Nodes => {
                    self.nodes_scroll = self.nodes_scroll.saturating_add(1);
                }
                FocusedPane::Tree => {
                    self.tree_scroll = self.tree_scroll.saturating_add(1);
                }
                FocusedPane::Expression => {}
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(Duration::from_secs(1))
                            .unwrap_or_else(Instant::now);
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.position = self.session.len().saturating_sub(1);
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.position = 0;
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    fn refresh_status(&mut self) {
        if let Some(snapshot) = self.session.get(self.position) {
            self.status_message = snapshot.description.clone();
        }
    }
}
