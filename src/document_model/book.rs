use super::chapters::{Chapter, ChapterSegmenter, SegmenterConfig};
use super::{LineSource, LoadError};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub strip_preamble: bool,
    pub segmenter: SegmenterConfig,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            strip_preamble: true,
            segmenter: SegmenterConfig::default(),
        }
    }
}

/// A loaded document: its lines and the chapters found in them. Both are
/// fixed for the lifetime of the book.
#[derive(Debug, Clone)]
pub struct Book {
    name: String,
    source: LineSource,
    chapters: Vec<Chapter>,
}

impl Book {
    pub fn from_source(name: impl Into<String>, mut source: LineSource, options: &LoadOptions) -> Self {
        if options.strip_preamble {
            source.strip_preamble();
        }
        let chapters = ChapterSegmenter::new(options.segmenter).segment(source.lines());

        Self {
            name: name.into(),
            source,
            chapters,
        }
    }

    pub fn load(path: &Path, options: &LoadOptions) -> Result<Self, LoadError> {
        let source = LineSource::from_file(path)?;
        let book = Self::from_source(display_name(path), source, options);

        info!(
            book = %book.name,
            lines = book.source.len(),
            chapters = book.chapters.len(),
            "loaded book"
        );
        Ok(book)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[String] {
        self.source.lines()
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapter(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }
}

/// File name without the `.txt` extension.
pub fn display_name(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "[No Name]".to_string())
}
