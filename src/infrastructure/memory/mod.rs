//! In-process repository implementations.
//!
//! Used by the HTTP integration tests and for running the service without a
//! database. They follow the same contracts as the PostgreSQL repositories.

mod memory_link_repository;
mod memory_token_repository;

pub use memory_link_repository::InMemoryLinkRepository;
pub use memory_token_repository::InMemoryTokenRepository;
