//! Extractors whose rejections use the JSON error envelope.

use axum::extract::FromRequestParts;

use crate::error::ApiError;

/// `Query` that rejects with [`ApiError`] instead of plain text.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// `Path` that rejects with [`ApiError`] instead of plain text.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
