//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod gemini;
pub mod postgres;
pub mod spotify;

// Re-exports
pub use gemini::GeminiProvider;
pub use postgres::{
    PgCategoryRepository, PgCommentRepository, PgCredentialStore, PgFavoriteRepository,
    PgRecommendationRepository,
};
pub use spotify::SpotifyCatalog;
