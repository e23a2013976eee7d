//! Input validation functions
//!
//! This module provides validation utilities for user input.
//! Email syntax checks come from the `validator` crate.

use crate::tags::parse_tag_names;
use validator::ValidateEmail;

/// bcrypt only reads the first 72 bytes of a password
pub const MAX_PASSWORD_BYTES: usize = 72;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_USERNAME_LENGTH: usize = 50;
pub const MAX_CAFE_NAME_LENGTH: usize = 255;
pub const MAX_LABEL_LENGTH: usize = 50;
pub const MAX_TAG_NAME_LENGTH: usize = 100;
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !email.validate_email() {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(format!(
            "Password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        ));
    }
    Ok(())
}

/// Validate display name
pub fn validate_username(username: &str) -> Result<(), String> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    if trimmed.chars().count() > MAX_USERNAME_LENGTH {
        return Err(format!(
            "Username must be at most {} characters",
            MAX_USERNAME_LENGTH
        ));
    }
    Ok(())
}

/// Validate a required free-text field with a length cap
pub fn validate_required_text(field: &str, value: &str, max_len: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    if value.chars().count() > max_len {
        return Err(format!("{} must be at most {} characters", field, max_len));
    }
    Ok(())
}

/// Validate a 1-5 star rating
pub fn validate_rating(field: &str, value: i32) -> Result<(), String> {
    if !(MIN_RATING..=MAX_RATING).contains(&value) {
        return Err(format!(
            "{} must be between {} and {}",
            field, MIN_RATING, MAX_RATING
        ));
    }
    Ok(())
}

/// Validate latitude in degrees
pub fn validate_latitude(latitude: f64) -> Result<(), String> {
    if latitude.is_nan() || latitude.is_infinite() {
        return Err("Latitude must be a valid number".to_string());
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90".to_string());
    }
    Ok(())
}

/// Validate longitude in degrees
pub fn validate_longitude(longitude: f64) -> Result<(), String> {
    if longitude.is_nan() || longitude.is_infinite() {
        return Err("Longitude must be a valid number".to_string());
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180".to_string());
    }
    Ok(())
}

/// Validate every tag name a `tags_input` string resolves to
pub fn validate_tags_input(input: &str) -> Result<(), String> {
    match parse_tag_names(input)
        .into_iter()
        .find(|name| name.chars().count() > MAX_TAG_NAME_LENGTH)
    {
        Some(name) => Err(format!(
            "Tag '{}...' must be at most {} characters",
            name.chars().take(20).collect::<String>(),
            MAX_TAG_NAME_LENGTH
        )),
        None => Ok(()),
    }
}
