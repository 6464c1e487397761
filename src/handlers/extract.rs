use axum::{
    extract::{FromRequest, FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;
use crate::validation::validate_id;

/// `Json` extractor whose rejections use the API error envelope instead of
/// axum's plain-text bodies.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// The `{id}` path segment as a row id.
///
/// Runs from the request head, ahead of any body extractor, so a bad id is
/// reported as `InvalidId` whatever the body holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidId(pub i32);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::InvalidId(rejection.body_text()))?;

        validate_id(&raw).map(ValidId)
    }
}
