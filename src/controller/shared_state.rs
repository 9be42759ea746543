use crate::controller::command_types::Mode;
use crate::document_model::{Book, Cursor, Paginator, SearchHit};

/// Everything one reading session owns. The book is read-only; the cursor
/// is the only reading state that changes.
pub struct ReaderState {
    pub book: Book,
    pub paginator: Paginator,
    /// Page size from the configuration; the terminal may only shrink it.
    pub max_lines_per_page: usize,
    pub cursor: Cursor,
    pub search_limit: usize,
    pub number_buffer: String,
    pub search_buffer: String,
    pub search_query: String,
    pub search_hits: Vec<SearchHit>,
    pub status_message: String,
}

impl ReaderState {
    pub fn new(book: Book, paginator: Paginator, search_limit: usize) -> Self {
        Self {
            book,
            paginator,
            max_lines_per_page: paginator.lines_per_page(),
            cursor: Cursor::default(),
            search_limit,
            number_buffer: String::new(),
            search_buffer: String::new(),
            search_query: String::new(),
            search_hits: Vec::new(),
            status_message: String::new(),
        }
    }

    /// Use pages of `lines` rows, capped at the configured size. The first
    /// line of the current page stays on the new page. Returns `true` when
    /// the page size changed.
    pub fn fit_lines_per_page(&mut self, lines: usize) -> bool {
        let paginator = Paginator::new(lines.min(self.max_lines_per_page));
        if paginator == self.paginator {
            return false;
        }

        if let Some(chapter) = self.book.chapter(self.cursor.chapter_index) {
            let top = chapter.start + self.cursor.page_index * self.paginator.lines_per_page();
            self.cursor.page_index = paginator.page_of_line(chapter, top);
        }
        self.paginator = paginator;
        true
    }

    /// Consume the pending number; `None` when nothing or garbage was typed.
    pub fn take_number(&mut self) -> Option<usize> {
        std::mem::take(&mut self.number_buffer).parse().ok()
    }
}

/// Result of handling a command in a mode controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTransition {
    Stay,
    ToMode(Mode),
    ToLibrary,
    Quit,
}
