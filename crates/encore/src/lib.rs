//! Encore Domain Library
//!
//! Core domain types and interfaces for the Encore music curation service.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Recommendation, Favorite, Category, Comment)
//!   - `value_objects/`: Validated value types (UserInput, Rating, PageRequest)
//!   - `services/`: Pure domain services (prompt builder, response parser)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: External service interfaces (LLM, catalog, credentials)
//!
//! # Usage
//!
//! ```rust,ignore
//! use encore::domain::{Recommendation, UserInput};
//! use encore::ports::{CatalogSearch, RecommendationRepository};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    build_recommendation_prompt, Category, Comment, DomainError, Favorite, FavoriteDigest,
    LabeledBlockParser, NewFavorite, Page, PageRequest, ParsedCandidate, Rating, Recommendation,
    RecommendationParser, RecommendationSummary, ResolvedRecommendation, UserInput,
};
pub use ports::{
    // Services
    CatalogSearch,
    CatalogTrack,
    CredentialProvider,
    LlmProvider,
    // Repositories
    CategoryRepository,
    CommentRepository,
    FavoriteRepository,
    RecommendationRepository,
};
