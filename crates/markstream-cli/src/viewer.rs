//! Terminal viewer that replays a document the way a streaming reply
//! arrives: a few characters per tick, re-parsed from scratch each time.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use markstream_config::{Config, OutputFormat};
use markstream_engine::Parser;
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::{io::stdout, time::Duration};

pub(crate) struct App {
    input: String,
    /// Byte offset of every character boundary, plus the end of input.
    boundaries: Vec<usize>,
    /// Characters revealed so far.
    revealed: usize,
    chunk_chars: usize,
    format: OutputFormat,
    paused: bool,
    parser: Parser,
    rendered: String,
}

impl App {
    pub(crate) fn new(input: String, config: &Config) -> Self {
        let boundaries = input
            .char_indices()
            .map(|(i, _)| i)
            .chain([input.len()])
            .collect();
        let mut app = Self {
            input,
            boundaries,
            revealed: 0,
            chunk_chars: config.stream.chunk_chars.max(1),
            format: config.format,
            paused: false,
            parser: Parser::new(config.registry()),
            rendered: String::new(),
        };
        app.refresh();
        app
    }

    fn total_chars(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub(crate) fn is_done(&self) -> bool {
        self.revealed >= self.total_chars()
    }

    /// The part of the input a reader would have received by now.
    pub(crate) fn visible(&self) -> &str {
        let end = self.boundaries[self.revealed.min(self.total_chars())];
        &self.input[..end]
    }

    /// Reveals the next chunk unless paused or finished.
    pub(crate) fn tick(&mut self) {
        if self.paused || self.is_done() {
            return;
        }
        self.revealed = (self.revealed + self.chunk_chars).min(self.total_chars());
        self.refresh();
    }

    pub(crate) fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub(crate) fn restart(&mut self) {
        self.revealed = 0;
        self.paused = false;
        self.refresh();
    }

    /// Re-parses the whole visible prefix from a clean parser.
    fn refresh(&mut self) {
        let end = self.boundaries[self.revealed.min(self.total_chars())];
        self.parser.clear_all_states();
        self.parser.parse(&self.input[..end]);
        if self.is_done() {
            self.parser.finish();
        }
        self.rendered = match crate::render(self.parser.root(), self.format) {
            Ok(text) => text,
            Err(e) => format!("Error rendering tree: {e}"),
        };
    }

    /// Returns true when the viewer should quit.
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => return true,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => return true,
            (KeyCode::Char(' '), _) => self.toggle_pause(),
            (KeyCode::Char('r'), _) => self.restart(),
            _ => {}
        }
        false
    }

    fn status(&self) -> String {
        let state = if self.is_done() {
            "done"
        } else if self.paused {
            "paused"
        } else {
            "streaming"
        };
        format!(
            "{}/{} chars | depth {} | pending {:?} | {state}",
            self.revealed,
            self.total_chars(),
            self.parser.depth(),
            self.parser.pending(),
        )
    }

    fn draw(&self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3), Constraint::Length(1)])
            .split(f.area());
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[0]);

        let source = Paragraph::new(self.visible())
            .block(Block::default().borders(Borders::ALL).title("Input"))
            .wrap(Wrap { trim: false });
        f.render_widget(source, columns[0]);

        let title = match self.format {
            OutputFormat::Outline => "Tree",
            OutputFormat::Html => "HTML",
            OutputFormat::Yaml => "YAML",
        };
        let tree = Paragraph::new(self.rendered.as_str())
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(tree, columns[1]);

        let status = Paragraph::new(self.status())
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title("Parser"));
        f.render_widget(status, rows[1]);

        let help = Line::from(vec![
            Span::raw("q/Esc: Quit | "),
            Span::raw("Space: Pause | "),
            Span::raw("r: Restart"),
        ]);
        f.render_widget(Paragraph::new(help), rows[2]);
    }
}

pub fn run(input: String, config: &Config) -> Result<()> {
    let mut app = App::new(input, config);
    let tick = Duration::from_millis(config.stream.tick_ms);

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, tick);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, tick: Duration) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| app.draw(f))?;

        if event::poll(tick)? {
            if let Event::Key(key) = event::read()?
                && app.handle_key(key)
            {
                return Ok(());
            }
        } else {
            app.tick();
        }
    }
}
