//! Cafetify Shared Library
//!
//! This crate contains shared types, models, and utilities used across
//! the backend and any Rust API clients.

pub mod errors;
pub mod models;
pub mod tags;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use tags::parse_tag_names;
pub use types::*;

pub use models::{Cafe, PersonalRating, Tag, User};
