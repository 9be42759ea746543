use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Title of the stretch before the first heading.
pub const BEGINNING_TITLE: &str = "Beginning";
/// Title of the single chapter used when no heading is found.
pub const FALLBACK_TITLE: &str = "Full Text";

static KEYWORD_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:chapter|part|book|section)\s+(?:[ivxlcdm]+|\d+|\w+)\b")
        .expect("Invalid keyword heading regex")
});

static ROMAN_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[IVX]+\.").expect("Invalid roman heading regex"));

/// A half-open `[start, end)` span of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub title: String,
    pub start: usize,
    pub end: usize,
}

impl Chapter {
    pub fn new(title: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            title: title.into(),
            start,
            end,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn contains(&self, line_index: usize) -> bool {
        (self.start..self.end).contains(&line_index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmenterConfig {
    /// A span must be longer than this to be recorded as its own chapter.
    pub min_gap: usize,
    /// All-caps lines must be longer than this to count as headings.
    pub min_heading_len: usize,
    /// All-caps lines longer than this are treated as shouting prose.
    pub max_heading_len: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            min_gap: 10,
            min_heading_len: 3,
            max_heading_len: 60,
        }
    }
}

/// One independent way a trimmed line can qualify as a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingRule {
    /// `Chapter 4`, `PART ONE`, `Book IX`, `Section 2`
    Keyword,
    /// `IV.` or `XII. The Return`
    RomanNumeral,
    /// A short line with no lower-case letters.
    UpperCase { min_len: usize, max_len: usize },
}

impl HeadingRule {
    pub fn matches(&self, trimmed: &str) -> bool {
        match *self {
            HeadingRule::Keyword => KEYWORD_HEADING.is_match(trimmed),
            HeadingRule::RomanNumeral => ROMAN_HEADING.is_match(trimmed),
            HeadingRule::UpperCase { min_len, max_len } => {
                let len = trimmed.chars().count();
                len > min_len
                    && len <= max_len
                    && trimmed.chars().any(char::is_uppercase)
                    && !trimmed.chars().any(char::is_lowercase)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChapterSegmenter {
    config: SegmenterConfig,
    rules: Vec<HeadingRule>,
}

impl ChapterSegmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self {
            config,
            rules: vec![
                HeadingRule::Keyword,
                HeadingRule::RomanNumeral,
                HeadingRule::UpperCase {
                    min_len: config.min_heading_len,
                    max_len: config.max_heading_len,
                },
            ],
        }
    }

    pub fn is_heading(&self, trimmed: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(trimmed))
    }

    /// Split `lines` into chapters in a single pass.
    ///
    /// The result is never empty and its spans cover `0..lines.len()` exactly
    /// once, in order. Stretches too short to stand alone are folded into the
    /// neighbouring chapter. A document without any heading yields one
    /// [`FALLBACK_TITLE`] chapter.
    pub fn segment<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Chapter> {
        let min_gap = self.config.min_gap;
        let mut chapters = Vec::new();
        let mut title = BEGINNING_TITLE.to_string();
        let mut start = 0;
        let mut saw_heading = false;

        for (i, line) in lines.iter().enumerate() {
            let trimmed = line.as_ref().trim();
            if trimmed.is_empty() || !self.is_heading(trimmed) {
                continue;
            }
            saw_heading = true;

            let heading = trimmed.to_string();
            if i - start > min_gap {
                chapters.push(Chapter::new(std::mem::replace(&mut title, heading), start, i));
            } else {
                title = heading;
            }
            start = i;
        }

        if !saw_heading {
            debug!(lines = lines.len(), "no headings found, using fallback chapter");
            return vec![Chapter::new(FALLBACK_TITLE, 0, lines.len())];
        }

        let len = lines.len();
        if len - start > min_gap || !chapters.is_empty() {
            chapters.push(Chapter::new(title, start, len));
        }

        if chapters.is_empty() {
            debug!(lines = len, "headings too close together, using fallback chapter");
            return vec![Chapter::new(FALLBACK_TITLE, 0, len)];
        }

        close_gaps(&mut chapters, len);
        debug!(lines = len, chapters = chapters.len(), "segmented document");
        chapters
    }
}

impl Default for ChapterSegmenter {
    fn default() -> Self {
        Self::new(SegmenterConfig::default())
    }
}

/// Stretch spans so they tile `0..len` with no holes.
fn close_gaps(chapters: &mut [Chapter], len: usize) {
    if let Some(first) = chapters.first_mut() {
        first.start = 0;
    }
    for i in 1..chapters.len() {
        let next_start = chapters[i].start;
        chapters[i - 1].end = next_start;
    }
    if let Some(last) = chapters.last_mut() {
        last.end = len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filler(prefix: &str, count: usize) -> Vec<String> {
        (1..=count).map(|n| format!("{prefix} line {n}")).collect()
    }

    fn assert_tiles(chapters: &[Chapter], len: usize) {
        assert!(!chapters.is_empty());
        assert_eq!(chapters[0].start, 0);
        assert_eq!(chapters[chapters.len() - 1].end, len);
        for pair in chapters.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        for chapter in chapters {
            assert!(chapter.start <= chapter.end);
        }
    }

    #[test]
    fn test_prologue_then_short_chapter() {
        let mut lines = vec!["PROLOGUE".to_string()];
        lines.extend((1..=11).map(|n| format!("text{n}")));
        lines.push("CHAPTER ONE".to_string());
        lines.push("more".to_string());

        let chapters = ChapterSegmenter::default().segment(&lines);

        assert_eq!(
            chapters,
            vec![
                Chapter::new("PROLOGUE", 0, 12),
                Chapter::new("CHAPTER ONE", 12, 14),
            ]
        );
    }

    #[test]
    fn test_no_headings_gives_fallback() {
        let lines = filler("plain prose", 40);
        let chapters = ChapterSegmenter::default().segment(&lines);

        assert_eq!(chapters, vec![Chapter::new(FALLBACK_TITLE, 0, 40)]);
    }

    #[test]
    fn test_empty_document_gives_fallback() {
        let lines: Vec<String> = Vec::new();
        let chapters = ChapterSegmenter::default().segment(&lines);

        assert_eq!(chapters, vec![Chapter::new(FALLBACK_TITLE, 0, 0)]);
    }

    #[test]
    fn test_back_to_back_headings_collapse() {
        let mut lines = vec!["PART ONE".to_string(), "CHAPTER 1".to_string()];
        lines.extend(filler("first", 15));
        lines.push("CHAPTER 2".to_string());
        lines.extend(filler("second", 15));

        let chapters = ChapterSegmenter::default().segment(&lines);

        assert_eq!(
            chapters,
            vec![
                Chapter::new("CHAPTER 1", 0, 17),
                Chapter::new("CHAPTER 2", 17, 33),
            ]
        );
    }

    #[test]
    fn test_short_prelude_folds_into_first_chapter() {
        let mut lines = vec!["a title page".to_string(), String::new()];
        lines.push("Chapter 1".to_string());
        lines.extend(filler("one", 12));
        lines.push("Chapter 2".to_string());
        lines.extend(filler("two", 12));

        let chapters = ChapterSegmenter::default().segment(&lines);

        assert_eq!(
            chapters,
            vec![
                Chapter::new("Chapter 1", 0, 15),
                Chapter::new("Chapter 2", 15, 28),
            ]
        );
    }

    #[test]
    fn test_long_prelude_keeps_beginning_title() {
        let mut lines = filler("preface", 12);
        lines.push("I. The Start".to_string());
        lines.extend(filler("one", 12));

        let chapters = ChapterSegmenter::default().segment(&lines);

        assert_eq!(chapters[0], Chapter::new(BEGINNING_TITLE, 0, 12));
        assert_eq!(chapters[1], Chapter::new("I. The Start", 12, 25));
    }

    #[test]
    fn test_stray_caps_line_folds_into_previous_chapter() {
        let mut lines = vec!["CHAPTER I".to_string()];
        lines.extend(filler("one", 12));
        lines.push("BANG".to_string());
        lines.extend(filler("after bang", 3));
        lines.push("CHAPTER II".to_string());
        lines.extend(filler("two", 12));

        let chapters = ChapterSegmenter::default().segment(&lines);

        assert_eq!(
            chapters,
            vec![
                Chapter::new("CHAPTER I", 0, 17),
                Chapter::new("CHAPTER II", 17, 30),
            ]
        );
    }

    #[test]
    fn test_min_gap_is_configurable() {
        let mut lines = vec!["CHAPTER 1".to_string()];
        lines.extend(filler("one", 6));
        lines.push("CHAPTER 2".to_string());
        lines.extend(filler("two", 6));

        let strict = ChapterSegmenter::default().segment(&lines);
        let loose = ChapterSegmenter::new(SegmenterConfig {
            min_gap: 5,
            ..SegmenterConfig::default()
        })
        .segment(&lines);

        assert_eq!(strict, vec![Chapter::new(FALLBACK_TITLE, 0, 14)]);
        assert_eq!(loose.len(), 2);
        assert_eq!(loose[1], Chapter::new("CHAPTER 2", 7, 14));
    }

    #[test]
    fn test_heading_rules() {
        let segmenter = ChapterSegmenter::default();

        assert!(segmenter.is_heading("Chapter 12"));
        assert!(segmenter.is_heading("chapter xiv"));
        assert!(segmenter.is_heading("PART Two"));
        assert!(segmenter.is_heading("Book the First"));
        assert!(segmenter.is_heading("Section 3: Methods"));
        assert!(segmenter.is_heading("IV."));
        assert!(segmenter.is_heading("XII. The Return"));
        assert!(segmenter.is_heading("THE END"));

        assert!(!segmenter.is_heading("Chapters are long."));
        assert!(!segmenter.is_heading("Bookkeeping matters"));
        assert!(!segmenter.is_heading("iv. lower roman"));
        assert!(!segmenter.is_heading("OK"));
        assert!(!segmenter.is_heading("1234"));
        assert!(!segmenter.is_heading(&"LOUD ".repeat(20)));
        assert!(!segmenter.is_heading("Just an ordinary sentence."));
    }

    #[test]
    fn test_upper_case_length_bounds() {
        let rule = HeadingRule::UpperCase {
            min_len: 3,
            max_len: 10,
        };

        assert!(!rule.matches("ABC"));
        assert!(rule.matches("ABCD"));
        assert!(rule.matches("ABCDEFGHIJ"));
        assert!(!rule.matches("ABCDEFGHIJK"));
        assert!(rule.matches("ÉPILOGUE"));
    }

    #[test]
    fn test_blank_lines_never_trigger() {
        let mut lines = vec!["CHAPTER 1".to_string()];
        lines.extend(std::iter::repeat_n("   ".to_string(), 20));

        let chapters = ChapterSegmenter::default().segment(&lines);
        assert_eq!(chapters, vec![Chapter::new("CHAPTER 1", 0, 21)]);
    }

    #[test]
    fn test_spans_always_tile_the_document() {
        let segmenter = ChapterSegmenter::default();
        let shapes: &[&[usize]] = &[&[0], &[3], &[0, 5], &[2, 14, 15, 40], &[11, 12, 13, 50, 61], &[30]];

        for shape in shapes {
            let len = 70;
            let lines: Vec<String> = (0..len)
                .map(|i| {
                    if shape.contains(&i) {
                        format!("CHAPTER {i}")
                    } else {
                        format!("line {i}")
                    }
                })
                .collect();

            let chapters = segmenter.segment(&lines);
            assert_tiles(&chapters, len);
        }
    }
}
