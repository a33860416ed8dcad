//! Helpers shared across layers.
//!
//! - [`base62`] - Short code encoding and decoding
//! - [`url_validator`] - Destination URL validation

pub mod base62;
pub mod url_validator;
