/// View subsystem - Independent rendering and display management
///
/// Screens are assembled as plain text by `view_model` and drawn by
/// `renderer`, so nothing here mutates reading state.

pub mod renderer;
pub mod view_model;

// Re-export public interface
pub use renderer::View;
pub use view_model::Screen;
