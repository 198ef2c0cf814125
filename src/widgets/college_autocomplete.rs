//! Rendering for the college dropdown: the labeled input, the option list,
//! the result panel and the status line.

use crate::autocomplete::{AutocompleteState, LogoDisplay};
use crate::logging::LogEntry;
use crate::widgets::search_input::SearchInput;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub const LOGO_UNAVAILABLE: &str = "Logo could not be retrieved";

const GLYPH_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const ASCII_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Loading indicator advanced once per event loop tick
#[derive(Debug, Clone, Default)]
pub struct Spinner {
    frame: usize,
    ascii: bool,
}

impl Spinner {
    pub fn new(use_glyphs: bool) -> Self {
        Self {
            frame: 0,
            ascii: !use_glyphs,
        }
    }

    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    pub fn current(&self) -> &'static str {
        if self.ascii {
            ASCII_FRAMES[self.frame % ASCII_FRAMES.len()]
        } else {
            GLYPH_FRAMES[self.frame % GLYPH_FRAMES.len()]
        }
    }
}

pub struct CollegeAutocomplete<'a> {
    pub state: &'a AutocompleteState,
    pub input: &'a SearchInput,
    pub spinner: &'a Spinner,
    /// Recent log lines, when the log pane is open
    pub logs: Option<Vec<LogEntry>>,
}

impl CollegeAutocomplete<'_> {
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let mut constraints = vec![
            Constraint::Length(3), // Input
            Constraint::Min(3),    // Options
        ];
        if self.state.selected().is_some() {
            constraints.push(Constraint::Length(5));
        }
        if self.logs.is_some() {
            constraints.push(Constraint::Length(8));
        }
        constraints.push(Constraint::Length(1)); // Status

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        self.input.render(f, chunks[0], &self.input_suffix());
        self.render_options(f, chunks[1]);

        let mut next = 2;
        if self.state.selected().is_some() {
            self.render_selection(f, chunks[next]);
            next += 1;
        }
        if let Some(logs) = &self.logs {
            render_logs(f, chunks[next], logs);
            next += 1;
        }
        render_status(f, chunks[next]);
    }

    fn input_suffix(&self) -> String {
        if self.state.is_loading() {
            self.spinner.current().to_string()
        } else if self.state.is_typing() {
            "(typing...)".to_string()
        } else {
            String::new()
        }
    }

    fn render_options(&self, f: &mut Frame, area: Rect) {
        let options = self.state.options();
        let block = Block::default().borders(Borders::ALL).title(format!("Options ({})", options.len()));

        if options.is_empty() {
            let hint = if self.state.input().is_empty() {
                "Start typing to search"
            } else if self.state.is_loading() || self.state.is_typing() {
                "Searching..."
            } else {
                "No options"
            };
            let paragraph = Paragraph::new(hint)
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = options
            .iter()
            .map(|institution| ListItem::new(institution.name.as_str()))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = ListState::default();
        list_state.select(self.state.highlighted_index());
        f.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_selection(&self, f: &mut Frame, area: Rect) {
        let Some(selected) = self.state.selected() else {
            return;
        };

        let mut lines = vec![Line::from(Span::styled(
            selected.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ))];

        match self.state.logo_display() {
            LogoDisplay::Image(url) => lines.push(Line::from(vec![
                Span::raw("Logo: "),
                Span::styled(url.to_string(), Style::default().fg(Color::Green)),
            ])),
            LogoDisplay::Unavailable => lines.push(Line::from(Span::styled(
                LOGO_UNAVAILABLE,
                Style::default().fg(Color::Red),
            ))),
            LogoDisplay::Checking => lines.push(Line::from(Span::styled(
                format!("{} Checking logo...", self.spinner.current()),
                Style::default().fg(Color::DarkGray),
            ))),
            LogoDisplay::Nothing => {}
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Selected"))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }
}

fn render_logs(f: &mut Frame, area: Rect, logs: &[LogEntry]) {
    let height = area.height.saturating_sub(2) as usize;
    let skip = logs.len().saturating_sub(height);
    let lines: Vec<Line> = logs[skip..]
        .iter()
        .map(|entry| {
            let color = match entry.level.as_str() {
                "ERROR" => Color::Red,
                "WARN" => Color::Yellow,
                "DEBUG" | "TRACE" => Color::DarkGray,
                _ => Color::Reset,
            };
            Line::from(Span::styled(entry.format_for_display(), Style::default().fg(color)))
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Logs (F12)"));
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, area: Rect) {
    let status = Line::from(vec![
        Span::styled("↑/↓", Style::default().fg(Color::Cyan)),
        Span::raw(" move  "),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::raw(" select  "),
        Span::styled("Ctrl+X", Style::default().fg(Color::Cyan)),
        Span::raw(" clear selection  "),
        Span::styled("Ctrl+U", Style::default().fg(Color::Cyan)),
        Span::raw(" clear input  "),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::raw(" quit"),
    ]);
    f.render_widget(Paragraph::new(status), area);
}
