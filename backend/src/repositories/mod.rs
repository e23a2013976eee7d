//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod cafe;
#[cfg(any(test, feature = "integration"))]
pub mod memory;
pub mod rating;
pub mod tag;
pub mod user;

pub use cafe::{CafeRecord, CafeRepository, CreateCafe, UpdateCafe};
#[cfg(any(test, feature = "integration"))]
pub use memory::MemoryCredentialStore;
pub use rating::{CreateRating, RatingRecord, RatingRepository, UpdateRating};
pub use tag::{CafeTagRecord, TagRecord, TagRepository};
pub use user::{CredentialStore, NewUser, StoreError, UserRecord, UserRepository};
