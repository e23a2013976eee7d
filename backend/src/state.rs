//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! Everything in here is built once in `main` and is read-only afterwards;
//! every field is cheap to clone.

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::repositories::{CredentialStore, UserRepository};
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// User accounts
    pub users: Arc<dyn CredentialStore>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
}

impl AppState {
    /// Create application state backed by PostgreSQL for everything
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        let users = Arc::new(UserRepository::new(db.clone()));
        Self::with_credential_store(db, users, config)
    }

    /// Create application state with a custom credential store
    pub fn with_credential_store(
        db: PgPool,
        users: Arc<dyn CredentialStore>,
        config: AppConfig,
    ) -> Self {
        let jwt = JwtService::new(&config.jwt.secret);

        Self {
            db,
            users,
            config: Arc::new(config),
            jwt,
        }
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    /// Get the credential store
    #[inline]
    pub fn users(&self) -> &dyn CredentialStore {
        self.users.as_ref()
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
