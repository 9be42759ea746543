use super::chapters::Chapter;
use super::cursor::{Cursor, Paginator};
use regex::Regex;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub line_index: usize,
    /// The matching line, trimmed.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("No search pattern")]
    EmptyQuery,
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),
    #[error("Line {} is not inside any chapter", .line_index + 1)]
    LineNotCovered { line_index: usize },
}

/// Finds lines containing a query and maps them back to reading positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchLocator {
    paginator: Paginator,
}

impl SearchLocator {
    pub fn new(paginator: Paginator) -> Self {
        Self { paginator }
    }

    /// Every line containing `query`, ignoring case, in document order. The
    /// query is matched literally and must not be empty.
    pub fn search<S: AsRef<str>>(&self, lines: &[S], query: &str) -> Result<Vec<SearchHit>, SearchError> {
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let regex = Regex::new(&format!("(?i){}", regex::escape(query)))
            .map_err(|e| SearchError::InvalidPattern(e.to_string()))?;

        let hits: Vec<SearchHit> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| regex.is_match(line.as_ref()))
            .map(|(line_index, line)| SearchHit {
                line_index,
                text: line.as_ref().trim().to_string(),
            })
            .collect();

        debug!(query, hits = hits.len(), "search finished");
        Ok(hits)
    }

    /// The cursor whose page shows `line_index`. If spans ever overlap the
    /// last matching chapter wins.
    pub fn resolve(&self, chapters: &[Chapter], line_index: usize) -> Result<Cursor, SearchError> {
        let Some((chapter_index, chapter)) = chapters
            .iter()
            .enumerate()
            .rev()
            .find(|(_, chapter)| chapter.contains(line_index))
        else {
            warn!(line_index, chapters = chapters.len(), "line outside every chapter");
            return Err(SearchError::LineNotCovered { line_index });
        };

        Ok(Cursor::new(
            chapter_index,
            self.paginator.page_of_line(chapter, line_index),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_model::chapters::ChapterSegmenter;

    fn book_lines(count: usize, matches: &[usize]) -> Vec<String> {
        (0..count)
            .map(|i| {
                if i % 97 == 0 {
                    format!("CHAPTER {i}")
                } else if matches.contains(&i) {
                    format!("  and there the Dragon slept ({i})  ")
                } else {
                    format!("quiet line {i}")
                }
            })
            .collect()
    }

    #[test]
    fn test_search_returns_every_hit_in_order() {
        let lines = book_lines(1000, &[812, 41, 400]);
        let locator = SearchLocator::default();

        let hits = locator.search(&lines, "dragon").unwrap();

        let indices: Vec<usize> = hits.iter().map(|hit| hit.line_index).collect();
        assert_eq!(indices, vec![41, 400, 812]);
        assert_eq!(hits[0].text, "and there the Dragon slept (41)");
    }

    #[test]
    fn test_search_is_not_capped() {
        let lines = vec!["needle"; 250];
        let hits = SearchLocator::default().search(&lines, "NEEDLE").unwrap();
        assert_eq!(hits.len(), 250);
    }

    #[test]
    fn test_search_query_is_literal() {
        let lines = ["cost: $5.00 (approx)", "cost: 5500"];
        let hits = SearchLocator::default().search(&lines, "$5.00 (").unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].line_index, 0);
    }

    #[test]
    fn test_empty_query_rejected() {
        let lines = ["anything"];
        assert_eq!(
            SearchLocator::default().search(&lines, ""),
            Err(SearchError::EmptyQuery)
        );
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let lines = ["alpha", "beta"];
        assert_eq!(SearchLocator::default().search(&lines, "gamma"), Ok(Vec::new()));
    }

    #[test]
    fn test_resolve_page_within_chapter() {
        let chapters = vec![Chapter::new("One", 0, 30), Chapter::new("Two", 30, 100)];
        let locator = SearchLocator::new(Paginator::new(25));

        assert_eq!(locator.resolve(&chapters, 0), Ok(Cursor::new(0, 0)));
        assert_eq!(locator.resolve(&chapters, 29), Ok(Cursor::new(0, 1)));
        assert_eq!(locator.resolve(&chapters, 30), Ok(Cursor::new(1, 0)));
        assert_eq!(locator.resolve(&chapters, 80), Ok(Cursor::new(1, 2)));
    }

    #[test]
    fn test_resolve_outside_chapters_fails() {
        let chapters = vec![Chapter::new("One", 0, 30)];
        let locator = SearchLocator::default();

        assert_eq!(
            locator.resolve(&chapters, 30),
            Err(SearchError::LineNotCovered { line_index: 30 })
        );
        assert_eq!(
            locator.resolve(&[], 0),
            Err(SearchError::LineNotCovered { line_index: 0 })
        );
    }

    #[test]
    fn test_resolve_prefers_last_overlapping_chapter() {
        let chapters = vec![Chapter::new("Wide", 0, 50), Chapter::new("Inner", 20, 40)];
        let locator = SearchLocator::new(Paginator::new(10));

        assert_eq!(locator.resolve(&chapters, 35), Ok(Cursor::new(1, 1)));
    }

    #[test]
    fn test_resolve_matches_direct_slicing_for_every_line() {
        let lines = book_lines(400, &[]);
        let chapters = ChapterSegmenter::default().segment(&lines);
        let paginator = Paginator::new(25);
        let locator = SearchLocator::new(paginator);

        for line_index in 0..lines.len() {
            let resolved = locator.resolve(&chapters, line_index).unwrap();
            let chapter = &chapters[resolved.chapter_index];
            assert!(chapter.contains(line_index));

            let mut cursor = Cursor::default();
            paginator
                .jump_to_chapter(&chapters, &mut cursor, resolved.chapter_index)
                .unwrap();
            paginator
                .set_page(&chapters, &mut cursor, resolved.page_index)
                .unwrap();
            assert_eq!(cursor, resolved);

            let page_start = chapter.start + resolved.page_index * 25;
            let page_end = (page_start + 25).min(chapter.end);
            let window = paginator.visible_lines(chapter, &cursor, &lines);
            assert_eq!(window, &lines[page_start..page_end]);
            assert!(window.contains(&lines[line_index]));
        }
    }
}
