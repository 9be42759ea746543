/// Document model subsystem - Lines, chapters, pagination and search
///
/// This module holds everything that works on a loaded book without touching
/// the terminal: reading and cleaning the text, splitting it into chapters,
/// page arithmetic and mapping search hits back to reading positions.

pub mod book;
pub mod chapters;
pub mod cursor;
pub mod line_source;
pub mod search_state;

// Re-export main types for convenience
pub use book::{Book, LoadOptions, display_name};
pub use chapters::SegmenterConfig;
pub use cursor::{Cursor, Paginator};
pub use line_source::{LineSource, LoadError};
pub use search_state::{SearchHit, SearchLocator};
