//! User service for registration, login and account management
//!
//! Password hashing and verification run on the blocking thread pool.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{CredentialStore, NewUser, UserRecord};
use cafetify_shared::validation::{validate_email, validate_password, validate_username};
use cafetify_shared::{RegisterRequest, UpdateProfileRequest};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new account
    pub async fn register(
        store: &dyn CredentialStore,
        request: RegisterRequest,
    ) -> Result<UserRecord, ApiError> {
        let username = request.username.trim().to_string();
        let email = request.email.trim().to_string();

        validate_username(&username).map_err(ApiError::Validation)?;
        validate_email(&email).map_err(ApiError::Validation)?;
        validate_password(&request.password).map_err(ApiError::Validation)?;

        let password_hash = PasswordService::hash_async(request.password).await?;

        let user = store
            .create(NewUser {
                username,
                email,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Check credentials and issue a session token
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(
        store: &dyn CredentialStore,
        jwt: &JwtService,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<String, ApiError> {
        let Some(user) = store.find_by_email(email.trim()).await? else {
            warn!("Login attempt for unknown email");
            return Err(ApiError::BadRequest(INVALID_CREDENTIALS.to_string()));
        };

        let valid =
            PasswordService::verify_async(user.password_hash.clone(), password.to_string()).await?;
        if !valid {
            warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(ApiError::BadRequest(INVALID_CREDENTIALS.to_string()));
        }

        let token = jwt.issue(user.id, now)?;
        info!(user_id = user.id, "User logged in");
        Ok(token)
    }

    /// Change username and/or email
    ///
    /// Absent or blank fields keep their current value.
    pub async fn update_profile(
        store: &dyn CredentialStore,
        user_id: i64,
        request: UpdateProfileRequest,
    ) -> Result<UserRecord, ApiError> {
        let username = non_blank(request.username);
        let email = non_blank(request.email);

        if let Some(username) = &username {
            validate_username(username).map_err(ApiError::Validation)?;
        }
        if let Some(email) = &email {
            validate_email(email).map_err(ApiError::Validation)?;
        }

        store
            .update_profile(user_id, username.as_deref(), email.as_deref())
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// Replace the password after checking the current one
    pub async fn change_password(
        store: &dyn CredentialStore,
        user: &UserRecord,
        old_password: String,
        new_password: String,
    ) -> Result<(), ApiError> {
        let valid = PasswordService::verify_async(user.password_hash.clone(), old_password).await?;
        if !valid {
            warn!(user_id = user.id, "Password change with wrong old password");
            return Err(ApiError::BadRequest("Old password is incorrect".to_string()));
        }

        validate_password(&new_password).map_err(ApiError::Validation)?;

        let password_hash = PasswordService::hash_async(new_password).await?;
        store.update_password(user.id, &password_hash).await?;

        info!(user_id = user.id, "Password changed");
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
