//! Tool handlers for the quill surface.

mod edit;

pub use edit::{EditArgs, EditHandler};
