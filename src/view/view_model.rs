/// View Model - Plain text screens built from document data
/// The renderer only ever sees a `Screen`, never a `Book` or a `Cursor`.
use crate::document_model::{Book, Cursor, Paginator, SearchHit};
use std::path::Path;
use unicode_width::UnicodeWidthChar;

/// Chapter titles in menus are cut to this many columns.
pub const TITLE_DISPLAY_WIDTH: usize = 50;
const TAB_WIDTH: usize = 4;
/// Rows a page screen spends around its body: two header rows, a blank row
/// on each side of the body, the footer and the status line.
pub const PAGE_CHROME_ROWS: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub header: Vec<String>,
    pub body: Vec<String>,
    pub footer: String,
    pub status: String,
    /// Shown on the last row with the terminal cursor after it.
    pub prompt: Option<String>,
}

impl Screen {
    /// Header, body and footer with a blank row between each part.
    pub fn content_lines(&self) -> Vec<String> {
        let mut lines = self.header.clone();
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(self.body.iter().cloned());
        if !self.footer.is_empty() {
            lines.push(String::new());
            lines.push(self.footer.clone());
        }
        lines
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

pub fn library_screen(names: &[String]) -> Screen {
    Screen {
        header: vec!["Books:".to_string()],
        body: names
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{}. {name}", i + 1))
            .collect(),
        footer: "[number] open  [q]uit".to_string(),
        ..Screen::default()
    }
}

pub fn empty_library_screen(books_dir: &Path) -> Screen {
    Screen {
        header: vec![format!("No books found in '{}'", books_dir.display())],
        footer: "Press any key to quit".to_string(),
        ..Screen::default()
    }
}

pub fn chapter_menu_screen(book: &Book, cursor: &Cursor) -> Screen {
    Screen {
        header: vec![book.name().to_string()],
        body: book
            .chapters()
            .iter()
            .enumerate()
            .map(|(i, chapter)| {
                let marker = if i == cursor.chapter_index { ">" } else { " " };
                let title = truncate_to_width(&chapter.title, TITLE_DISPLAY_WIDTH);
                format!("{marker} {}. {title}", i + 1)
            })
            .collect(),
        footer: "[r]ead  [s]earch  [b]ack  [q]uit".to_string(),
        ..Screen::default()
    }
}

/// Body lines that fit on a terminal `height` rows tall.
pub fn page_lines_for_height(height: usize) -> usize {
    height.saturating_sub(PAGE_CHROME_ROWS).max(1)
}

pub fn page_screen(book: &Book, paginator: &Paginator, cursor: &Cursor) -> Screen {
    let Some(chapter) = book.chapter(cursor.chapter_index) else {
        return Screen::default().with_status("No chapter to show");
    };

    Screen {
        header: vec![
            format!("{} - {}", book.name(), chapter.title),
            format!(
                "Chapter {}/{} | Page {}/{}",
                cursor.chapter_index + 1,
                book.chapters().len(),
                cursor.page_index + 1,
                paginator.page_count(chapter)
            ),
        ],
        body: paginator
            .visible_lines(chapter, cursor, book.lines())
            .iter()
            .map(|line| expand_tabs(line.trim_end()))
            .collect(),
        footer: "[n]ext [p]rev [c]hapters [s]earch [q]uit".to_string(),
        ..Screen::default()
    }
}

/// Numbered hit list; at most `limit` hits are listed, the rest are counted.
pub fn search_results_screen(query: &str, hits: &[SearchHit], limit: usize) -> Screen {
    let mut body: Vec<String> = hits
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, hit)| format!("{:>3}) {}: {}", i + 1, hit.line_index, hit.text))
        .collect();
    if hits.len() > limit {
        body.push(format!("...(+{} more)", hits.len() - limit));
    }

    Screen {
        header: vec![format!("Search: {query} ({} matches)", hits.len())],
        body,
        footer: "[number] jump to match  [Esc] back".to_string(),
        ..Screen::default()
    }
}

/// Cut `text` so it occupies at most `max_width` terminal columns.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut result = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        width += ch_width;
        result.push(ch);
    }
    result
}

fn expand_tabs(line: &str) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }

    let mut column = 0;
    let mut result = String::new();
    for ch in line.chars() {
        if ch == '\t' {
            let spaces = TAB_WIDTH - column % TAB_WIDTH;
            result.extend(std::iter::repeat_n(' ', spaces));
            column += spaces;
        } else {
            column += ch.width().unwrap_or(0);
            result.push(ch);
        }
    }
    result
}
