//! Role guards for the HTML pages.
//!
//! The session middleware attaches an [`AuthenticatedUser`] to every request
//! that carries a live session cookie. These extractors turn a missing user
//! into a redirect to the login page and a user of the other role into a
//! 403 page.
//!
//! ```ignore
//! pub async fn handler(RequireTechnician(user): RequireTechnician) { ... }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::core::error::{AppError, PageError};
use crate::features::auth::model::{AuthenticatedUser, UserRole};
use crate::shared::constants::MSG_LOGIN_REQUIRED;

fn require_role(parts: &Parts, role: UserRole) -> Result<AuthenticatedUser, PageError> {
    let user = parts
        .extensions
        .get::<AuthenticatedUser>()
        .ok_or_else(|| AppError::Unauthorized(MSG_LOGIN_REQUIRED.to_string()))?;

    if user.role != role {
        return Err(AppError::Forbidden(format!("This page is only available to {}s", role)).into());
    }

    Ok(user.clone())
}

/// Guard for pages only customers may see.
pub struct RequireCustomer(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireCustomer
where
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, UserRole::Customer).map(RequireCustomer)
    }
}

/// Guard for pages only technicians may see.
pub struct RequireTechnician(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireTechnician
where
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, UserRole::Technician).map(RequireTechnician)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(user: Option<AuthenticatedUser>) -> Parts {
        let (mut parts, _) = Request::new(()).into_parts();
        if let Some(user) = user {
            parts.extensions.insert(user);
        }
        parts
    }

    fn technician() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 3,
            role: UserRole::Technician,
            email: "tech@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_anonymous_is_unauthorized() {
        let mut parts = parts_with(None);
        let result = RequireCustomer::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(PageError(AppError::Unauthorized(_)))));
    }

    #[tokio::test]
    async fn test_wrong_role_is_forbidden() {
        let mut parts = parts_with(Some(technician()));
        let result = RequireCustomer::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(PageError(AppError::Forbidden(_)))));
    }

    #[tokio::test]
    async fn test_matching_role_passes() {
        let mut parts = parts_with(Some(technician()));
        let RequireTechnician(user) = RequireTechnician::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(user.user_id, 3);
    }
}
