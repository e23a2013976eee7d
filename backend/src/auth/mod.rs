//! Authentication module
//!
//! Provides JWT session tokens, bcrypt password hashing, the request
//! authentication gate and the resource ownership check.

mod jwt;
mod middleware;
mod ownership;
mod password;

pub use jwt::{Claims, JwtService, TokenError, SESSION_TTL_DAYS};
pub use middleware::{authenticate, extract_token, AuthUser, SESSION_COOKIE};
pub use ownership::check_ownership;
pub use password::{PasswordError, PasswordService, BCRYPT_COST};
