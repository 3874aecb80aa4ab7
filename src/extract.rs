use axum::extract::FromRequest;

use crate::errors::AppError;

/// `axum::Json` whose rejections go through the `AppError` envelope instead
/// of axum's plain-text body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
