//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod page;
mod rating;
mod user_input;

pub use page::*;
pub use rating::*;
pub use user_input::*;
