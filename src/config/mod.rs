/// Configuration subsystem - Reader settings and preferences
///
/// This module handles loading configuration from .readrusrc files. Command
/// line flags are layered on top in `main`.

pub mod rc;

// Re-export public interface
pub use rc::{RcConfig, RcLoader};
