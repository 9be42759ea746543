use super::chapters::Chapter;
use tracing::debug;

pub const DEFAULT_LINES_PER_PAGE: usize = 25;

/// Reading position: a chapter plus a page inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub chapter_index: usize,
    pub page_index: usize,
}

impl Cursor {
    pub fn new(chapter_index: usize, page_index: usize) -> Self {
        Self {
            chapter_index,
            page_index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("No chapter {} (book has {count})", .index + 1)]
    ChapterOutOfRange { index: usize, count: usize },
    #[error("No page {} (chapter has {page_count})", .page + 1)]
    PageOutOfRange { page: usize, page_count: usize },
}

/// Page arithmetic over a chapter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    lines_per_page: usize,
}

impl Paginator {
    /// A page size of zero is bumped to one.
    pub fn new(lines_per_page: usize) -> Self {
        Self {
            lines_per_page: lines_per_page.max(1),
        }
    }

    pub fn lines_per_page(&self) -> usize {
        self.lines_per_page
    }

    /// Never less than one, even for an empty chapter.
    pub fn page_count(&self, chapter: &Chapter) -> usize {
        chapter.len().div_ceil(self.lines_per_page).max(1)
    }

    pub fn last_page(&self, chapter: &Chapter) -> usize {
        self.page_count(chapter) - 1
    }

    /// Page of `chapter` that shows `line_index`.
    pub fn page_of_line(&self, chapter: &Chapter, line_index: usize) -> usize {
        line_index.saturating_sub(chapter.start) / self.lines_per_page
    }

    /// Next page, or the first page of the next chapter. Returns `false` at
    /// the end of the document.
    pub fn advance(&self, chapters: &[Chapter], cursor: &mut Cursor) -> bool {
        let Some(chapter) = chapters.get(cursor.chapter_index) else {
            return false;
        };

        if cursor.page_index < self.last_page(chapter) {
            cursor.page_index += 1;
        } else if cursor.chapter_index + 1 < chapters.len() {
            cursor.chapter_index += 1;
            cursor.page_index = 0;
        } else {
            return false;
        }
        debug!(chapter = cursor.chapter_index, page = cursor.page_index, "advance");
        true
    }

    /// Previous page, or the last page of the previous chapter. Returns
    /// `false` at the start of the document.
    pub fn retreat(&self, chapters: &[Chapter], cursor: &mut Cursor) -> bool {
        if cursor.page_index > 0 {
            cursor.page_index -= 1;
        } else if cursor.chapter_index > 0 {
            let Some(previous) = chapters.get(cursor.chapter_index - 1) else {
                return false;
            };
            cursor.chapter_index -= 1;
            cursor.page_index = self.last_page(previous);
        } else {
            return false;
        }
        debug!(chapter = cursor.chapter_index, page = cursor.page_index, "retreat");
        true
    }

    /// Move to page 0 of `index`. The cursor is untouched on error.
    pub fn jump_to_chapter(
        &self,
        chapters: &[Chapter],
        cursor: &mut Cursor,
        index: usize,
    ) -> Result<(), NavigationError> {
        if index >= chapters.len() {
            return Err(NavigationError::ChapterOutOfRange {
                index,
                count: chapters.len(),
            });
        }
        cursor.chapter_index = index;
        cursor.page_index = 0;
        Ok(())
    }

    pub fn set_page(
        &self,
        chapters: &[Chapter],
        cursor: &mut Cursor,
        page: usize,
    ) -> Result<(), NavigationError> {
        let chapter =
            chapters
                .get(cursor.chapter_index)
                .ok_or(NavigationError::ChapterOutOfRange {
                    index: cursor.chapter_index,
                    count: chapters.len(),
                })?;
        let page_count = self.page_count(chapter);
        if page >= page_count {
            return Err(NavigationError::PageOutOfRange { page, page_count });
        }
        cursor.page_index = page;
        Ok(())
    }

    /// The slice of `lines` shown for `cursor`'s page of `chapter`.
    pub fn visible_lines<'a, S>(&self, chapter: &Chapter, cursor: &Cursor, lines: &'a [S]) -> &'a [S] {
        let page_start = chapter.start + cursor.page_index * self.lines_per_page;
        let end = (page_start + self.lines_per_page).min(chapter.end).min(lines.len());
        let start = page_start.min(end);
        &lines[start..end]
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_LINES_PER_PAGE)
    }
}
