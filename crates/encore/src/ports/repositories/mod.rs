//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.
//! Every lookup is scoped by the owning user: a record owned by someone
//! else behaves exactly like a missing one.

mod category_repository;
mod comment_repository;
mod favorite_repository;
mod recommendation_repository;

pub use category_repository::*;
pub use comment_repository::*;
pub use favorite_repository::*;
pub use recommendation_repository::*;
