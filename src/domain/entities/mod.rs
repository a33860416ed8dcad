//! Core domain entities.
//!
//! Entities are plain data structures; rules that need a repository live in
//! [`crate::application::services`].
//!
//! # Entity Types
//!
//! - [`Link`] - A shortened URL mapping with its click counter
//! - [`OwnerId`] / [`Requester`] - Identity supplied by the auth layer
//! - [`Page`] / [`PageRequest`] - Pagination contract for list operations

pub mod link;
pub mod owner;
pub mod page;

pub use link::{Link, NewLink};
pub use owner::{OwnerId, Requester};
pub use page::{Page, PageRequest};
