//! # citysheet-core
//!
//! Application layer for the citysheet viewer.
//!
//! This crate provides:
//! - Error types shared by the loader and the session
//! - Document loading from a file path or URL
//! - [`Viewer`], the explicit application state
//! - The session loop that serializes hover events and fires the tower rise

/// Error types and result aliases.
pub mod error;
/// Document loading.
pub mod loader;
/// Hover session loop.
pub mod session;
/// Application state.
pub mod viewer;

/// Re-export core error types.
pub use error::{CityError, CityResult};
pub use loader::{load_snapshot, DocumentSource, LoadOptions};
pub use session::{Session, SessionConfig, SessionHandle};
pub use viewer::Viewer;

/// Re-export the model and view types callers need alongside the session.
pub use citysheet_dag::{Connection, DependencyGraph, EdgeKey};
pub use citysheet_sheet::{Cell, GridLine, SheetSnapshot};
pub use citysheet_viz::{AnimationPhase, Hover, HoverEvent, Layer};
