//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and external services.

mod curation_service;
mod discovery_service;
mod generator;
mod resolver;

pub use curation_service::CurationService;
pub use discovery_service::{history_limit, DiscoveryService};
pub use generator::{GeneratedText, RecommendationGenerator};
pub use resolver::RecommendationResolver;
