//! Catalogue and policy adapters kept in process memory.

mod in_memory_authorization;
mod in_memory_catalogue;

pub use in_memory_authorization::InMemoryAuthorizationPolicy;
pub use in_memory_catalogue::{InMemoryCatalogue, SAMPLE_COMMUNITY_ID, SAMPLE_COMMUNITY_NAME};
