use crate::controller::Command;
use crate::library::Library;
use crate::view::Screen;
use crate::view::view_model::library_screen;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibrarySelection {
    Pending,
    Open(PathBuf),
    Quit,
}

/// Picks a book by number from the library listing.
#[derive(Debug, Default)]
pub struct LibraryController {
    number_buffer: String,
    status_message: String,
}

impl LibraryController {
    pub fn new(status_message: impl Into<String>) -> Self {
        Self {
            number_buffer: String::new(),
            status_message: status_message.into(),
        }
    }

    pub fn handle_command(&mut self, command: Command, library: &Library) -> LibrarySelection {
        self.status_message.clear();

        match command {
            Command::Digit(d) => {
                self.number_buffer.push(d);
                LibrarySelection::Pending
            }
            Command::DeleteChar => {
                self.number_buffer.pop();
                LibrarySelection::Pending
            }
            Command::Confirm => {
                let typed = std::mem::take(&mut self.number_buffer);
                let book = typed
                    .parse::<usize>()
                    .ok()
                    .and_then(|number| number.checked_sub(1))
                    .and_then(|index| library.book(index));

                match book {
                    Some(path) => LibrarySelection::Open(path.to_path_buf()),
                    None => {
                        if !typed.is_empty() {
                            self.status_message = format!("No book {typed}");
                        }
                        LibrarySelection::Pending
                    }
                }
            }
            Command::Quit => LibrarySelection::Quit,
            _ => LibrarySelection::Pending,
        }
    }

    pub fn screen(&self, library: &Library) -> Screen {
        library_screen(&library.display_names())
            .with_status(self.status_message.clone())
            .with_prompt(format!("> {}", self.number_buffer))
    }
}
