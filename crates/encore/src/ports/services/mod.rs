//! Service Ports
//!
//! Abstract interfaces for external services.

mod catalog_search;
mod credentials;
mod llm_provider;

pub use catalog_search::*;
pub use credentials::*;
pub use llm_provider::*;
