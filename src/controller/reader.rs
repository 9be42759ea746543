use crate::controller::search_commands::SearchCommands;
use crate::controller::{Command, Mode, ModeTransition, ReaderState};
use crate::view::Screen;
use crate::view::view_model::{
    chapter_menu_screen, page_lines_for_height, page_screen, search_results_screen,
};
use tracing::debug;

const MAX_NUMBER_DIGITS: usize = 6;

/// Drives one reading session: chapter menu, pages and search.
pub struct ReaderController {
    mode: Mode,
    /// Where a search returns to when it is cancelled or finds nothing.
    search_origin: Mode,
    state: ReaderState,
}

impl ReaderController {
    pub fn new(state: ReaderState) -> Self {
        Self {
            mode: Mode::ChapterMenu,
            search_origin: Mode::ChapterMenu,
            state,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Size pages so a whole page fits a terminal `height` rows tall.
    pub fn fit_page_height(&mut self, height: usize) {
        if self.state.fit_lines_per_page(page_lines_for_height(height)) {
            debug!(
                height,
                lines_per_page = self.state.paginator.lines_per_page(),
                "page size fitted to terminal"
            );
        }
    }

    pub fn handle_command(&mut self, command: Command) -> ModeTransition {
        self.state.status_message.clear();

        let transition = match self.mode {
            Mode::Library | Mode::ChapterMenu => self.handle_chapter_menu(command),
            Mode::Reading => self.handle_reading(command),
            Mode::SearchPrompt => self.handle_search_prompt(command),
            Mode::SearchResults => self.handle_search_results(command),
        };

        if let ModeTransition::ToMode(mode) = transition {
            debug!(from = ?self.mode, to = ?mode, "mode change");
            if mode == Mode::SearchPrompt {
                self.search_origin = self.mode;
                self.state.search_buffer.clear();
            }
            self.state.number_buffer.clear();
            self.mode = mode;
        }
        transition
    }

    pub fn screen(&self) -> Screen {
        let state = &self.state;
        let screen = match self.mode {
            Mode::SearchPrompt => self
                .mode_screen(self.search_origin)
                .with_prompt(format!("Search: {}", state.search_buffer)),
            mode => self.mode_screen(mode),
        };
        screen.with_status(state.status_message.clone())
    }

    fn mode_screen(&self, mode: Mode) -> Screen {
        let state = &self.state;
        match mode {
            Mode::Reading => page_screen(&state.book, &state.paginator, &state.cursor),
            Mode::SearchResults => {
                search_results_screen(&state.search_query, &state.search_hits, state.search_limit)
                    .with_prompt(format!("> {}", state.number_buffer))
            }
            Mode::Library | Mode::ChapterMenu | Mode::SearchPrompt => {
                chapter_menu_screen(&state.book, &state.cursor)
                    .with_prompt(format!("> {}", state.number_buffer))
            }
        }
    }

    fn handle_chapter_menu(&mut self, command: Command) -> ModeTransition {
        let current = self.state.cursor.chapter_index;
        match command {
            Command::Read => self.open_chapter(current),
            Command::Confirm => match self.state.take_number() {
                Some(number) if number > 0 => self.open_chapter(number - 1),
                Some(_) => {
                    self.state.status_message = "Chapters are numbered from 1".to_string();
                    ModeTransition::Stay
                }
                None => self.open_chapter(current),
            },
            Command::SelectNextChapter => {
                self.select_chapter(current + 1);
                ModeTransition::Stay
            }
            Command::SelectPrevChapter => {
                if let Some(prev) = current.checked_sub(1) {
                    self.select_chapter(prev);
                }
                ModeTransition::Stay
            }
            Command::Digit(_) | Command::DeleteChar => self.edit_number(command),
            Command::StartSearch => ModeTransition::ToMode(Mode::SearchPrompt),
            Command::Back => ModeTransition::ToLibrary,
            Command::Quit => ModeTransition::Quit,
            _ => ModeTransition::Stay,
        }
    }

    fn handle_reading(&mut self, command: Command) -> ModeTransition {
        let state = &mut self.state;
        let chapters = state.book.chapters();
        match command {
            Command::NextPage => {
                if !state.paginator.advance(chapters, &mut state.cursor) {
                    state.status_message = "End of book".to_string();
                }
                ModeTransition::Stay
            }
            Command::PrevPage => {
                if !state.paginator.retreat(chapters, &mut state.cursor) {
                    state.status_message = "Start of book".to_string();
                }
                ModeTransition::Stay
            }
            Command::ShowChapters => ModeTransition::ToMode(Mode::ChapterMenu),
            Command::StartSearch => ModeTransition::ToMode(Mode::SearchPrompt),
            Command::Quit => ModeTransition::Quit,
            _ => ModeTransition::Stay,
        }
    }

    fn handle_search_prompt(&mut self, command: Command) -> ModeTransition {
        let state = &mut self.state;
        match command {
            Command::InsertChar(c) => {
                state.search_buffer.push(c);
                ModeTransition::Stay
            }
            Command::DeleteChar => {
                state.search_buffer.pop();
                ModeTransition::Stay
            }
            Command::Confirm => {
                let query = state.search_buffer.trim().to_string();
                if query.is_empty() {
                    return ModeTransition::ToMode(self.search_origin);
                }
                if SearchCommands::run(state, &query) {
                    ModeTransition::ToMode(Mode::SearchResults)
                } else {
                    ModeTransition::ToMode(self.search_origin)
                }
            }
            Command::Cancel => ModeTransition::ToMode(self.search_origin),
            Command::Quit => ModeTransition::Quit,
            _ => ModeTransition::Stay,
        }
    }

    fn handle_search_results(&mut self, command: Command) -> ModeTransition {
        match command {
            Command::Confirm => match self.state.take_number() {
                Some(number) if number > 0 => {
                    if SearchCommands::jump_to_hit(&mut self.state, number - 1) {
                        ModeTransition::ToMode(Mode::Reading)
                    } else {
                        ModeTransition::Stay
                    }
                }
                Some(_) => {
                    self.state.status_message = "Matches are numbered from 1".to_string();
                    ModeTransition::Stay
                }
                None => ModeTransition::ToMode(self.search_origin),
            },
            Command::Digit(_) | Command::DeleteChar => self.edit_number(command),
            Command::Cancel => ModeTransition::ToMode(self.search_origin),
            Command::Quit => ModeTransition::Quit,
            _ => ModeTransition::Stay,
        }
    }

    fn open_chapter(&mut self, index: usize) -> ModeTransition {
        let state = &mut self.state;
        match state
            .paginator
            .jump_to_chapter(state.book.chapters(), &mut state.cursor, index)
        {
            Ok(()) => ModeTransition::ToMode(Mode::Reading),
            Err(e) => {
                state.status_message = e.to_string();
                ModeTransition::Stay
            }
        }
    }

    /// Move the menu marker; past either end it stays put.
    fn select_chapter(&mut self, index: usize) {
        let state = &mut self.state;
        if let Err(e) = state
            .paginator
            .jump_to_chapter(state.book.chapters(), &mut state.cursor, index)
        {
            debug!(error = %e, "selection unchanged");
        }
    }

    fn edit_number(&mut self, command: Command) -> ModeTransition {
        let buffer = &mut self.state.number_buffer;
        match command {
            Command::Digit(d) if buffer.len() < MAX_NUMBER_DIGITS => buffer.push(d),
            Command::DeleteChar => {
                buffer.pop();
            }
            _ => {}
        }
        ModeTransition::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_model::{Book, Cursor, LineSource, LoadOptions, Paginator};

    fn three_chapter_book() -> Book {
        let mut lines = Vec::new();
        for (title, count) in [("CHAPTER I", 59), ("CHAPTER II", 19), ("CHAPTER III", 29)] {
            lines.push(title.to_string());
            lines.extend((0..count).map(|n| format!("prose {n} of {title}").to_lowercase()));
        }
        lines[100] = "the dragon sleeps".to_string();
        Book::from_source("three", LineSource::from_lines(lines), &LoadOptions::default())
    }

    fn controller() -> ReaderController {
        ReaderController::new(ReaderState::new(three_chapter_book(), Paginator::new(25), 30))
    }

    fn type_text(controller: &mut ReaderController, text: &str) {
        for c in text.chars() {
            controller.handle_command(Command::InsertChar(c));
        }
    }

    #[test]
    fn test_starts_in_chapter_menu() {
        let controller = controller();
        assert_eq!(controller.mode(), Mode::ChapterMenu);
        assert_eq!(controller.state.cursor, Cursor::default());
        assert_eq!(controller.state.book.chapters().len(), 3);
    }

    #[test]
    fn test_read_then_page_through() {
        let mut controller = controller();

        assert_eq!(
            controller.handle_command(Command::Read),
            ModeTransition::ToMode(Mode::Reading)
        );
        controller.handle_command(Command::NextPage);
        controller.handle_command(Command::NextPage);
        assert_eq!(controller.state.cursor, Cursor::new(0, 2));

        controller.handle_command(Command::NextPage);
        assert_eq!(controller.state.cursor, Cursor::new(1, 0));

        controller.handle_command(Command::PrevPage);
        assert_eq!(controller.state.cursor, Cursor::new(0, 2));
    }

    #[test]
    fn test_start_of_book_status() {
        let mut controller = controller();
        controller.handle_command(Command::Read);

        controller.handle_command(Command::PrevPage);
        assert_eq!(controller.state.cursor, Cursor::default());
        assert_eq!(controller.state.status_message, "Start of book");

        controller.handle_command(Command::NextPage);
        assert!(controller.state.status_message.is_empty());
    }

    #[test]
    fn test_chapter_number_entry() {
        let mut controller = controller();

        controller.handle_command(Command::Digit('3'));
        assert_eq!(
            controller.handle_command(Command::Confirm),
            ModeTransition::ToMode(Mode::Reading)
        );
        assert_eq!(controller.state.cursor, Cursor::new(2, 0));
    }

    #[test]
    fn test_out_of_range_chapter_is_reported() {
        let mut controller = controller();

        controller.handle_command(Command::Digit('9'));
        assert_eq!(controller.handle_command(Command::Confirm), ModeTransition::Stay);
        assert_eq!(controller.mode(), Mode::ChapterMenu);
        assert_eq!(controller.state.cursor, Cursor::default());
        assert_eq!(controller.state.status_message, "No chapter 9 (book has 3)");
        assert!(controller.state.number_buffer.is_empty());
    }

    #[test]
    fn test_menu_selection_moves_marker() {
        let mut controller = controller();

        controller.handle_command(Command::SelectNextChapter);
        controller.handle_command(Command::SelectNextChapter);
        controller.handle_command(Command::SelectNextChapter);
        assert_eq!(controller.state.cursor.chapter_index, 2);

        controller.handle_command(Command::SelectPrevChapter);
        assert_eq!(controller.state.cursor.chapter_index, 1);
        assert!(controller.screen().body[1].starts_with('>'));
    }

    #[test]
    fn test_search_and_jump_to_hit() {
        let mut controller = controller();
        controller.handle_command(Command::Read);

        assert_eq!(
            controller.handle_command(Command::StartSearch),
            ModeTransition::ToMode(Mode::SearchPrompt)
        );
        type_text(&mut controller, "  Dragon ");
        assert_eq!(
            controller.handle_command(Command::Confirm),
            ModeTransition::ToMode(Mode::SearchResults)
        );
        assert_eq!(controller.state.search_hits.len(), 1);

        controller.handle_command(Command::Digit('1'));
        assert_eq!(
            controller.handle_command(Command::Confirm),
            ModeTransition::ToMode(Mode::Reading)
        );
        assert_eq!(controller.state.cursor, Cursor::new(2, 0));
        assert!(controller.screen().body.contains(&"the dragon sleeps".to_string()));
    }

    #[test]
    fn test_search_without_hits_returns_to_origin() {
        let mut controller = controller();
        controller.handle_command(Command::Read);
        controller.handle_command(Command::StartSearch);
        type_text(&mut controller, "griffin");

        assert_eq!(
            controller.handle_command(Command::Confirm),
            ModeTransition::ToMode(Mode::Reading)
        );
        assert_eq!(controller.state.status_message, "Pattern not found: griffin");
    }

    #[test]
    fn test_blank_query_is_never_run() {
        let mut controller = controller();
        controller.handle_command(Command::StartSearch);
        type_text(&mut controller, "   ");

        assert_eq!(
            controller.handle_command(Command::Confirm),
            ModeTransition::ToMode(Mode::ChapterMenu)
        );
        assert!(controller.state.status_message.is_empty());
        assert!(controller.state.search_hits.is_empty());
    }

    #[test]
    fn test_search_prompt_edits_and_cancels() {
        let mut controller = controller();
        controller.handle_command(Command::StartSearch);
        type_text(&mut controller, "drx");
        controller.handle_command(Command::DeleteChar);

        let screen = controller.screen();
        assert_eq!(screen.prompt.as_deref(), Some("Search: dr"));

        assert_eq!(
            controller.handle_command(Command::Cancel),
            ModeTransition::ToMode(Mode::ChapterMenu)
        );
    }

    #[test]
    fn test_results_cancel_returns_to_reading() {
        let mut controller = controller();
        controller.handle_command(Command::Read);
        controller.handle_command(Command::NextPage);
        controller.handle_command(Command::StartSearch);
        type_text(&mut controller, "prose");
        controller.handle_command(Command::Confirm);
        assert_eq!(controller.mode(), Mode::SearchResults);

        assert_eq!(
            controller.handle_command(Command::Cancel),
            ModeTransition::ToMode(Mode::Reading)
        );
        assert_eq!(controller.state.cursor, Cursor::new(0, 1));
    }

    #[test]
    fn test_fit_page_height_keeps_reading_position() {
        let mut controller = controller();
        controller.handle_command(Command::Read);
        controller.handle_command(Command::NextPage);
        controller.handle_command(Command::NextPage);
        assert_eq!(controller.state.cursor, Cursor::new(0, 2));

        // Lines 50.. were on top; with 10-line pages that is page 5
        controller.fit_page_height(16);
        assert_eq!(controller.state.paginator.lines_per_page(), 10);
        assert_eq!(controller.state.cursor, Cursor::new(0, 5));
        assert_eq!(controller.screen().body[0], "prose 49 of chapter i");

        // A tall terminal never grows pages past the configured size
        controller.fit_page_height(100);
        assert_eq!(controller.state.paginator.lines_per_page(), 25);
        assert_eq!(controller.state.cursor, Cursor::new(0, 2));
    }

    #[test]
    fn test_back_and_quit() {
        let mut controller = controller();
        assert_eq!(controller.handle_command(Command::Back), ModeTransition::ToLibrary);

        controller.handle_command(Command::Read);
        assert_eq!(controller.handle_command(Command::Quit), ModeTransition::Quit);
    }
}
