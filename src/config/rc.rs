use crate::document_model::{LoadOptions, Paginator, SegmenterConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const RC_FILE_NAME: &str = ".readrusrc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RcConfig {
    pub lines_per_page: usize,
    pub min_gap: usize,
    pub min_heading_len: usize,
    pub max_heading_len: usize,
    pub strip_preamble: bool,
    pub books_dir: PathBuf,
    pub search_limit: usize,
}

impl Default for RcConfig {
    fn default() -> Self {
        let segmenter = SegmenterConfig::default();
        Self {
            lines_per_page: 25,
            min_gap: segmenter.min_gap,
            min_heading_len: segmenter.min_heading_len,
            max_heading_len: segmenter.max_heading_len,
            strip_preamble: true,
            books_dir: PathBuf::from("books"),
            search_limit: 30,
        }
    }
}

impl RcConfig {
    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.lines_per_page)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            strip_preamble: self.strip_preamble,
            segmenter: SegmenterConfig {
                min_gap: self.min_gap,
                min_heading_len: self.min_heading_len,
                max_heading_len: self.max_heading_len,
            },
        }
    }
}

pub struct RcLoader;

impl RcLoader {
    /// Get the path to the RC file
    /// Looks for .readrusrc in:
    /// 1. Current directory
    /// 2. Home directory (~/.readrusrc)
    pub fn get_rc_path() -> Option<PathBuf> {
        let current_rc = Path::new(RC_FILE_NAME);
        if current_rc.exists() {
            return Some(current_rc.to_path_buf());
        }

        if let Ok(home) = env::var("HOME") {
            let home_rc = Path::new(&home).join(RC_FILE_NAME);
            if home_rc.exists() {
                return Some(home_rc);
            }
        }

        None
    }

    /// Load and parse the RC file, falling back to defaults.
    pub fn load_config() -> RcConfig {
        match Self::get_rc_path() {
            Some(rc_path) => Self::load_config_from(&rc_path),
            None => RcConfig::default(),
        }
    }

    pub fn load_config_from(rc_path: &Path) -> RcConfig {
        let mut config = RcConfig::default();

        match fs::read_to_string(rc_path) {
            Ok(content) => {
                Self::parse_config_content(&content, &mut config);
                debug!(path = %rc_path.display(), "loaded rc file");
            }
            Err(e) => {
                warn!(path = %rc_path.display(), error = %e, "cannot read rc file, using defaults");
            }
        }

        config
    }

    fn parse_config_content(content: &str, config: &mut RcConfig) {
        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') || line.starts_with('"') {
                continue;
            }

            Self::parse_config_line(line, config);
        }
    }

    fn parse_config_line(line: &str, config: &mut RcConfig) {
        // Remove inline comments; a `#` inside a value is kept
        let line = match inline_comment_start(line) {
            Some(pos) => &line[..pos],
            None => line,
        }
        .trim();

        let setting = line.strip_prefix("set ").map_or(line, str::trim);

        match setting.split_once('=') {
            Some((key, value)) => Self::apply_setting(key.trim(), value.trim(), config),
            None => Self::apply_flag(setting, config),
        }
    }

    /// `set preamble` / `set nopreamble`
    fn apply_flag(flag: &str, config: &mut RcConfig) {
        match flag {
            "preamble" | "strip_preamble" => config.strip_preamble = true,
            "nopreamble" | "nostrip_preamble" => config.strip_preamble = false,
            _ => debug!(flag, "ignoring unknown rc flag"),
        }
    }

    fn apply_setting(key: &str, value: &str, config: &mut RcConfig) {
        match key {
            "lines_per_page" | "lines" | "pagesize" => {
                if let Some(n) = parse_in_range(value, 1, 500) {
                    config.lines_per_page = n;
                }
            }
            "min_gap" | "mingap" => {
                if let Some(n) = parse_in_range(value, 0, 10_000) {
                    config.min_gap = n;
                }
            }
            "min_heading_len" => {
                if let Some(n) = parse_in_range(value, 0, 1_000) {
                    config.min_heading_len = n;
                }
            }
            "max_heading_len" => {
                if let Some(n) = parse_in_range(value, 1, 1_000) {
                    config.max_heading_len = n;
                }
            }
            "search_limit" => {
                if let Some(n) = parse_in_range(value, 1, 1_000) {
                    config.search_limit = n;
                }
            }
            "strip_preamble" | "preamble" => {
                config.strip_preamble = value == "true" || value == "1" || value == "yes";
            }
            "books_dir" | "books" => {
                if !value.is_empty() {
                    config.books_dir = PathBuf::from(value);
                }
            }
            _ => debug!(key, "ignoring unknown rc setting"),
        }
    }

    /// Generate a sample RC file content
    pub fn generate_sample_rc() -> String {
        r#"# read-rus configuration file (.readrusrc)
# Lines starting with # or " are comments

# Paging
set lines_per_page=25   # Lines shown per page
search_limit=30         # Search hits listed on screen

# Chapter detection
set min_gap=10          # Shortest span recorded as its own chapter
min_heading_len=3       # ALL-CAPS headings must be longer than this
max_heading_len=60      # ...and no longer than this

# Text
set preamble            # Strip the Project Gutenberg header (or set nopreamble)
books_dir=books         # Where the library looks for .txt files
"#
        .to_string()
    }
}

/// Byte offset of a `#` that starts a comment: one at the start of the line
/// or right after whitespace.
fn inline_comment_start(line: &str) -> Option<usize> {
    line.char_indices()
        .find(|&(pos, c)| c == '#' && (pos == 0 || line[..pos].ends_with(char::is_whitespace)))
        .map(|(pos, _)| pos)
}

fn parse_in_range(value: &str, min: usize, max: usize) -> Option<usize> {
    value.parse::<usize>().ok().filter(|n| (min..=max).contains(n))
}
