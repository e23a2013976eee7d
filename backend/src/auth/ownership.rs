//! Resource ownership check

use crate::error::ApiError;

/// Allow the request only if the authenticated user owns the resource.
///
/// A mismatch is 403: the caller is known, just not permitted here.
pub fn check_ownership(resource_owner_id: i64, identity_id: i64) -> Result<(), ApiError> {
    if resource_owner_id == identity_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "You do not have permission to modify this resource".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_is_allowed() {
        assert!(check_ownership(7, 7).is_ok());
    }

    #[test]
    fn test_other_user_is_forbidden() {
        assert!(matches!(check_ownership(7, 8), Err(ApiError::Forbidden(_))));
    }
}
