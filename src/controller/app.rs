use crate::config::RcConfig;
use crate::controller::key_handler::KeyHandler;
use crate::controller::library::{LibraryController, LibrarySelection};
use crate::controller::reader::ReaderController;
use crate::controller::{Mode, ModeTransition, ReaderState};
use crate::document_model::{Book, LoadError};
use crate::library::Library;
use crate::view::View;
use crate::view::view_model::empty_library_screen;
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::{self, stdout};
use std::path::PathBuf;
use tracing::{info, warn};

/// The interactive program: library screen, then one reading session per
/// opened book.
pub struct App {
    config: RcConfig,
    library: Library,
    view: View,
}

impl App {
    pub fn new(config: RcConfig) -> Result<Self, LoadError> {
        let library = Library::open(&config.books_dir)?;
        Ok(Self {
            config,
            library,
            view: View::new(),
        })
    }

    pub fn run(mut self, initial_book: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen)?;

        let result = self.run_loop(initial_book);

        disable_raw_mode()?;
        execute!(stdout(), cursor::Show, LeaveAlternateScreen)?;

        result
    }

    fn run_loop(&mut self, initial_book: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
        let mut next_book = initial_book;
        let mut library_status = String::new();

        loop {
            let path = match next_book.take() {
                Some(path) => path,
                None => match self.select_book(&library_status)? {
                    Some(path) => path,
                    None => return Ok(()),
                },
            };
            library_status.clear();

            match Book::load(&path, &self.config.load_options()) {
                Ok(book) => {
                    if self.read_book(book)? == ModeTransition::Quit {
                        return Ok(());
                    }
                }
                Err(e) => {
                    warn!(error = %e, "cannot open book");
                    library_status = e.to_string();
                }
            }
        }
    }

    fn select_book(&mut self, status: &str) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
        self.library.refresh()?;
        self.view.force_redraw();

        if self.library.is_empty() {
            self.view.render(&empty_library_screen(self.library.books_dir()))?;
            while next_key(&mut self.view)?.is_none() {}
            return Ok(None);
        }

        let mut controller = LibraryController::new(status);
        loop {
            self.view.render(&controller.screen(&self.library))?;

            let Some(key) = next_key(&mut self.view)? else {
                continue;
            };
            let Some(command) = KeyHandler::parse_key(Mode::Library, &key) else {
                continue;
            };

            match controller.handle_command(command, &self.library) {
                LibrarySelection::Pending => {}
                LibrarySelection::Open(path) => return Ok(Some(path)),
                LibrarySelection::Quit => return Ok(None),
            }
        }
    }

    /// Returns `Quit` or `ToLibrary`, whichever ended the session.
    fn read_book(&mut self, book: Book) -> io::Result<ModeTransition> {
        info!(book = book.name(), "reading");
        let state = ReaderState::new(book, self.config.paginator(), self.config.search_limit);
        let mut controller = ReaderController::new(state);
        self.view.force_redraw();

        loop {
            let (_, height) = terminal::size()?;
            controller.fit_page_height(usize::from(height));
            self.view.render(&controller.screen())?;

            let Some(key) = next_key(&mut self.view)? else {
                continue;
            };
            let Some(command) = KeyHandler::parse_key(controller.mode(), &key) else {
                continue;
            };

            match controller.handle_command(command) {
                transition @ (ModeTransition::Quit | ModeTransition::ToLibrary) => {
                    return Ok(transition);
                }
                ModeTransition::Stay | ModeTransition::ToMode(_) => {}
            }
        }
    }
}

/// Block for the next key press. A resize schedules a full redraw and
/// yields `None`, as does any other event.
fn next_key(view: &mut View) -> io::Result<Option<KeyEvent>> {
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
        Event::Resize(_, _) => {
            view.force_redraw();
            Ok(None)
        }
        _ => Ok(None),
    }
}
