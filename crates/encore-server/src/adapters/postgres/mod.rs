//! PostgreSQL Repository Implementations

mod category_repository;
mod comment_repository;
mod credential_store;
mod favorite_repository;
mod recommendation_repository;

pub use category_repository::PgCategoryRepository;
pub use comment_repository::PgCommentRepository;
pub use credential_store::PgCredentialStore;
pub use favorite_repository::PgFavoriteRepository;
pub use recommendation_repository::PgRecommendationRepository;

use encore::DomainError;

/// Unique violations become `Conflict`; everything else is a persistence failure
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        // PostgreSQL unique constraint violation
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            return DomainError::Conflict(format!(
                "Duplicate value violates unique constraint: {}",
                constraint
            ));
        }
    }
    DomainError::persistence(err)
}
