use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const PREAMBLE_PUBLISHER_MARKER: &str = "PROJECT GUTENBERG";
const PREAMBLE_START_MARKER: &str = "START";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The lines of one document, 0-indexed and read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSource {
    lines: Vec<String>,
}

impl LineSource {
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Split text on `\n`, `\r\n` or a lone `\r`. A trailing newline does not
    /// add an empty line.
    pub fn from_text(text: &str) -> Self {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        Self::from_lines(normalized.lines())
    }

    /// Undecodable bytes are replaced rather than rejected.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_text(&String::from_utf8_lossy(bytes))
    }

    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let bytes = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Self::from_bytes(&bytes);
        debug!(path = %path.display(), lines = source.len(), "read line source");
        Ok(source)
    }

    /// Drop everything up to and including the first line that carries both
    /// the publisher marker and the start marker. Returns whether anything
    /// was removed.
    pub fn strip_preamble(&mut self) -> bool {
        let marker_line = self.lines.iter().position(|line| {
            let upper = line.to_uppercase();
            upper.contains(PREAMBLE_PUBLISHER_MARKER) && upper.contains(PREAMBLE_START_MARKER)
        });

        match marker_line {
            Some(index) => {
                self.lines.drain(..=index);
                debug!(dropped = index + 1, "stripped preamble");
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}
