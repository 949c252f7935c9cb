use std::convert::Infallible;

use axum::{
    body::Body,
    extract::{rejection::FormRejection, FromRequest, OptionalFromRequestParts, Request},
    http::request::Parts,
    Form,
};
use serde::de::DeserializeOwned;

use crate::core::error::{AppError, PageError};
use crate::features::auth::model::AuthenticatedUser;

/// Form extractor whose rejection renders the HTML error page
pub struct AppForm<T>(pub T);

impl<T, S> FromRequest<S> for AppForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(form_rejection_error(rejection).into()),
        }
    }
}

fn form_rejection_error(rejection: FormRejection) -> AppError {
    let message = match rejection {
        FormRejection::FailedToDeserializeForm(err) => format!("Invalid form data: {}", err),
        FormRejection::FailedToDeserializeFormBody(err) => format!("Invalid form data: {}", err),
        FormRejection::InvalidFormContentType(err) => format!("Invalid form content type: {}", err),
        _ => "Failed to parse form body".to_string(),
    };

    AppError::BadRequest(message)
}

/// `Option<AuthenticatedUser>` for pages that render for anyone but show
/// who is logged in.
impl<S> OptionalFromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<AuthenticatedUser>().cloned())
    }
}
