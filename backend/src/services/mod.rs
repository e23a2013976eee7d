//! Business logic services
//!
//! Services validate input, coordinate repositories and own transactions.

pub mod cafe;
pub mod user;

pub use cafe::CafeService;
pub use user::UserService;
