//! Text box the user types the college name into
//!
//! Wraps `tui_input` for editing and reports when the text actually
//! changed. Debouncing is left to `AutocompleteState`.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

/// Result of handling a key in the search input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchInputAction {
    /// Text changed to the contained value
    Changed(String),
    /// Key consumed (cursor movement etc), text untouched
    Unchanged,
    /// Not an editing key, the caller decides
    PassThrough,
}

pub struct SearchInput {
    input: Input,
    label: String,
    style: Style,
}

impl SearchInput {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            label: label.into(),
            style: Style::default().fg(Color::Yellow),
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn set_value(&mut self, value: String) {
        self.input = Input::default().with_value(value);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SearchInputAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('u') if ctrl => {
                if self.input.value().is_empty() {
                    return SearchInputAction::Unchanged;
                }
                self.input.reset();
                SearchInputAction::Changed(String::new())
            }
            KeyCode::Char(_) if ctrl => SearchInputAction::PassThrough,
            KeyCode::Char(_)
            | KeyCode::Backspace
            | KeyCode::Delete
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Home
            | KeyCode::End => match self.input.handle_event(&Event::Key(key)) {
                Some(change) if change.value => {
                    SearchInputAction::Changed(self.input.value().to_string())
                }
                _ => SearchInputAction::Unchanged,
            },
            _ => SearchInputAction::PassThrough,
        }
    }

    /// Render the labeled box. `suffix` is appended to the label (spinner,
    /// typing indicator).
    pub fn render(&self, f: &mut Frame, area: Rect, suffix: &str) {
        let title = if suffix.is_empty() {
            self.label.clone()
        } else {
            format!("{} {}", self.label, suffix)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(self.style);

        let paragraph = Paragraph::new(self.input.value())
            .block(block)
            .style(self.style);

        f.render_widget(paragraph, area);
        f.set_cursor_position((area.x + self.input.visual_cursor() as u16 + 1, area.y + 1));
    }
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new("Select a College")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_reports_changes() {
        let mut input = SearchInput::default();
        assert_eq!(
            input.handle_key(key(KeyCode::Char('M'))),
            SearchInputAction::Changed("M".to_string())
        );
        assert_eq!(
            input.handle_key(key(KeyCode::Char('I'))),
            SearchInputAction::Changed("MI".to_string())
        );
        assert_eq!(input.handle_key(key(KeyCode::Left)), SearchInputAction::Unchanged);
        assert_eq!(
            input.handle_key(key(KeyCode::Backspace)),
            SearchInputAction::Changed("I".to_string())
        );
    }

    #[test]
    fn test_navigation_keys_pass_through() {
        let mut input = SearchInput::default();
        assert_eq!(input.handle_key(key(KeyCode::Up)), SearchInputAction::PassThrough);
        assert_eq!(input.handle_key(key(KeyCode::Enter)), SearchInputAction::PassThrough);
        assert_eq!(
            input.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            SearchInputAction::PassThrough
        );
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = SearchInput::default();
        input.set_value("Harvard".to_string());
        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);

        assert_eq!(input.handle_key(ctrl_u), SearchInputAction::Changed(String::new()));
        assert_eq!(input.value(), "");
        assert_eq!(input.handle_key(ctrl_u), SearchInputAction::Unchanged);
    }

    #[test]
    fn test_backspace_on_empty_is_unchanged() {
        let mut input = SearchInput::default();
        assert_eq!(input.handle_key(key(KeyCode::Backspace)), SearchInputAction::Unchanged);
    }
}
