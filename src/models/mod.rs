//! Domain model helpers shared by the database and API layers.

mod draft;
mod project;

pub use draft::*;
pub use project::*;
