use crate::document_model::{LoadError, display_name};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const BOOK_EXTENSION: &str = "txt";

/// The `.txt` books found in one directory, sorted by path.
#[derive(Debug, Clone)]
pub struct Library {
    books_dir: PathBuf,
    books: Vec<PathBuf>,
}

impl Library {
    /// Scan `books_dir`, creating it first if it does not exist.
    pub fn open(books_dir: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let books_dir = books_dir.into();
        fs::create_dir_all(&books_dir).map_err(|source| LoadError::Io {
            path: books_dir.clone(),
            source,
        })?;

        let mut library = Self {
            books_dir,
            books: Vec::new(),
        };
        library.refresh()?;
        Ok(library)
    }

    pub fn refresh(&mut self) -> Result<(), LoadError> {
        let io_error = |source| LoadError::Io {
            path: self.books_dir.clone(),
            source,
        };

        let mut books = Vec::new();
        for entry in fs::read_dir(&self.books_dir).map_err(io_error)? {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    warn!(dir = %self.books_dir.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if path.is_file() && path.extension().is_some_and(|ext| ext == BOOK_EXTENSION) {
                books.push(path);
            }
        }
        books.sort();

        debug!(dir = %self.books_dir.display(), books = books.len(), "scanned library");
        self.books = books;
        Ok(())
    }

    pub fn books_dir(&self) -> &Path {
        &self.books_dir
    }

    pub fn book(&self, index: usize) -> Option<&Path> {
        self.books.get(index).map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn display_names(&self) -> Vec<String> {
        self.books.iter().map(|path| display_name(path)).collect()
    }
}
