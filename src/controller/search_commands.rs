use crate::controller::ReaderState;
use crate::document_model::{Cursor, SearchLocator};
use tracing::info;

/// Search command handlers - controller logic for search operations
pub struct SearchCommands;

impl SearchCommands {
    /// Search the whole book. Returns `true` when there are hits to list.
    pub fn run(state: &mut ReaderState, query: &str) -> bool {
        let locator = SearchLocator::new(state.paginator);

        match locator.search(state.book.lines(), query) {
            Ok(hits) if hits.is_empty() => {
                state.status_message = format!("Pattern not found: {query}");
                false
            }
            Ok(hits) => {
                info!(query, hits = hits.len(), "search");
                state.status_message = format!("/{query}/  [{} matches]", hits.len());
                state.search_query = query.to_string();
                state.search_hits = hits;
                true
            }
            Err(e) => {
                state.status_message = format!("Search error: {e}");
                false
            }
        }
    }

    /// Move the cursor to the page showing hit `hit_index` (0-based).
    /// Returns `true` when the cursor moved.
    pub fn jump_to_hit(state: &mut ReaderState, hit_index: usize) -> bool {
        let Some(hit) = state.search_hits.get(hit_index) else {
            state.status_message = format!("No match {}", hit_index + 1);
            return false;
        };
        let line_index = hit.line_index;

        match Self::hit_cursor(state, line_index) {
            Ok(cursor) => {
                state.cursor = cursor;
                state.status_message = format!(
                    "Line {line_index}: chapter {}, page {}",
                    cursor.chapter_index + 1,
                    cursor.page_index + 1
                );
                true
            }
            Err(e) => {
                state.status_message = format!("Search error: {e}");
                false
            }
        }
    }

    /// Cursor for the page holding `line_index`, checked against the same
    /// bounds as menu navigation.
    fn hit_cursor(state: &ReaderState, line_index: usize) -> Result<Cursor, Box<dyn std::error::Error>> {
        let chapters = state.book.chapters();
        let resolved = SearchLocator::new(state.paginator).resolve(chapters, line_index)?;

        let mut cursor = state.cursor;
        state
            .paginator
            .jump_to_chapter(chapters, &mut cursor, resolved.chapter_index)?;
        state
            .paginator
            .set_page(chapters, &mut cursor, resolved.page_index)?;
        Ok(cursor)
    }
}
