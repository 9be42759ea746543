/// Controller subsystem - Handles all user input and command execution
///
/// Keys are turned into commands by `key_handler`; the library and reader
/// controllers apply those commands to plain state, and `app` owns the
/// terminal loop that ties them to the view.

pub mod app;
pub mod command_types;
pub mod key_handler;
pub mod library;
pub mod reader;
pub mod search_commands;
pub mod shared_state;

// Re-export public interface
pub use app::App;
pub use command_types::{Command, Mode};
pub use shared_state::{ModeTransition, ReaderState};
