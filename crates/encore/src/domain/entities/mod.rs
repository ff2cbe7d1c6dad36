//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Recommendation: AI discovery request, resolved tracks and rating
//! - Favorite: Catalog track saved by a user
//! - Category: User-defined grouping of favorites
//! - Comment: Free-text note attached to a favorite

mod category;
mod comment;
mod favorite;
mod recommendation;

pub use category::*;
pub use comment::*;
pub use favorite::*;
pub use recommendation::*;
