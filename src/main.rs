mod config;
mod controller;
mod document_model;
mod library;
mod view;

use clap::Parser;
use config::{RcConfig, RcLoader};
use controller::App;
use document_model::{Book, SearchLocator};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt};

/// Read plain-text books page by page, chapter by chapter
#[derive(Parser, Debug)]
#[command(name = "read-rus", version)]
struct Cli {
    /// Book to open directly, skipping the library screen
    file: Option<PathBuf>,

    /// Directory listed on the library screen
    #[arg(long)]
    books_dir: Option<PathBuf>,

    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=500))]
    lines_per_page: Option<u16>,

    /// Minimum number of lines between two chapter headings
    #[arg(long)]
    min_gap: Option<usize>,

    #[arg(long)]
    max_heading_len: Option<usize>,

    /// Keep the Project Gutenberg header
    #[arg(long)]
    no_strip_preamble: bool,

    /// Print the chapter list of FILE and exit
    #[arg(long, requires = "file")]
    chapters: bool,

    /// Print every line of FILE matching QUERY and exit
    #[arg(long, value_name = "QUERY", requires = "file")]
    search: Option<String>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print a sample .readrusrc and exit
    #[arg(long)]
    print_rc: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn is_interactive(&self) -> bool {
        !self.chapters && self.search.is_none() && !self.print_rc
    }

    fn apply_overrides(&self, config: &mut RcConfig) {
        if let Some(dir) = &self.books_dir {
            config.books_dir = dir.clone();
        }
        if let Some(lines) = self.lines_per_page {
            config.lines_per_page = usize::from(lines);
        }
        if let Some(gap) = self.min_gap {
            config.min_gap = gap;
        }
        if let Some(len) = self.max_heading_len {
            config.max_heading_len = len;
        }
        if self.no_strip_preamble {
            config.strip_preamble = false;
        }
    }
}

fn init_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // The interactive UI owns the terminal, so it only ever logs to a file.
    let (writer, ansi) = match &cli.log_file {
        Some(path) => (BoxMakeWriter::new(Mutex::new(File::create(path)?)), false),
        None if cli.is_interactive() => (BoxMakeWriter::new(io::sink), false),
        None => (BoxMakeWriter::new(io::stderr), true),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(writer)
        .try_init()
        .map_err(|e| -> Box<dyn std::error::Error> { e })?;
    Ok(())
}

fn print_chapters(book: &Book) {
    for (index, chapter) in book.chapters().iter().enumerate() {
        println!(
            "{}. {} ({}-{})",
            index + 1,
            chapter.title,
            chapter.start,
            chapter.end
        );
    }
}

/// One `line: text [chapter c, page p]` row per hit.
fn search_report(
    book: &Book,
    config: &RcConfig,
    query: &str,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let locator = SearchLocator::new(config.paginator());
    let mut report = Vec::new();

    for hit in locator.search(book.lines(), query)? {
        let cursor = locator.resolve(book.chapters(), hit.line_index)?;
        report.push(format!(
            "{}: {} [chapter {}, page {}]",
            hit.line_index,
            hit.text,
            cursor.chapter_index + 1,
            cursor.page_index + 1
        ));
    }
    Ok(report)
}

/// Exits with status 1 when a search finds nothing, like `grep`.
fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    if cli.print_rc {
        print!("{}", RcLoader::generate_sample_rc());
        return Ok(ExitCode::SUCCESS);
    }

    // Load RC configuration, then let the command line win
    let mut config = RcLoader::load_config();
    cli.apply_overrides(&mut config);

    if !cli.is_interactive() {
        if let Some(path) = &cli.file {
            let book = Book::load(path, &config.load_options())?;
            if cli.chapters {
                print_chapters(&book);
            }
            if let Some(query) = &cli.search {
                let report = search_report(&book, &config, query)?;
                if report.is_empty() {
                    eprintln!("Pattern not found: {query}");
                    return Ok(ExitCode::FAILURE);
                }
                for row in report {
                    println!("{row}");
                }
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    App::new(config)?.run(cli.file)?;
    Ok(ExitCode::SUCCESS)
}
