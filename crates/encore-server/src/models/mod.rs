//! Encore HTTP Models
//!
//! Request/response DTOs. JSON is camelCase on the wire.

mod catalog;
mod curation;
mod discovery;

pub use catalog::*;
pub use curation::*;
pub use discovery::*;
