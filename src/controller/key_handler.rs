use crate::controller::{Command, Mode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct KeyHandler;

impl KeyHandler {
    pub fn parse_key(mode: Mode, key_event: &KeyEvent) -> Option<Command> {
        let key = key_event.code;

        if key == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Command::Quit);
        }

        match mode {
            Mode::Library => Self::parse_library_key(key),
            Mode::ChapterMenu => Self::parse_chapter_menu_key(key),
            Mode::Reading => Self::parse_reading_key(key),
            Mode::SearchPrompt => Self::parse_search_prompt_key(key),
            Mode::SearchResults => Self::parse_search_results_key(key),
        }
    }

    /// Digits, Backspace and Enter edit a pending number in every menu.
    fn parse_number_entry(key: KeyCode) -> Option<Command> {
        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => Some(Command::Digit(c)),
            KeyCode::Backspace => Some(Command::DeleteChar),
            KeyCode::Enter => Some(Command::Confirm),
            _ => None,
        }
    }

    fn parse_library_key(key: KeyCode) -> Option<Command> {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            _ => Self::parse_number_entry(key),
        }
    }

    fn parse_chapter_menu_key(key: KeyCode) -> Option<Command> {
        match key {
            KeyCode::Char('r') => Some(Command::Read),
            KeyCode::Char('s') | KeyCode::Char('/') => Some(Command::StartSearch),
            KeyCode::Char('b') | KeyCode::Esc => Some(Command::Back),
            KeyCode::Char('q') => Some(Command::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Command::SelectNextChapter),
            KeyCode::Char('k') | KeyCode::Up => Some(Command::SelectPrevChapter),
            _ => Self::parse_number_entry(key),
        }
    }

    fn parse_reading_key(key: KeyCode) -> Option<Command> {
        match key {
            KeyCode::Char('n') | KeyCode::Char(' ') | KeyCode::Right | KeyCode::PageDown => {
                Some(Command::NextPage)
            }
            KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => Some(Command::PrevPage),
            KeyCode::Char('c') | KeyCode::Esc => Some(Command::ShowChapters),
            KeyCode::Char('s') | KeyCode::Char('/') => Some(Command::StartSearch),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        }
    }

    fn parse_search_prompt_key(key: KeyCode) -> Option<Command> {
        match key {
            KeyCode::Char(c) => Some(Command::InsertChar(c)),
            KeyCode::Backspace => Some(Command::DeleteChar),
            KeyCode::Enter => Some(Command::Confirm),
            KeyCode::Esc => Some(Command::Cancel),
            _ => None,
        }
    }

    fn parse_search_results_key(key: KeyCode) -> Option<Command> {
        match key {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('q') => Some(Command::Cancel),
            _ => Self::parse_number_entry(key),
        }
    }
}
