//! Body extractors that report decode failures as `AppError::InvalidQuery`,
//! so malformed bodies get the same 400 JSON error shape as every other
//! rejected request.

use axum::extract::FromRequest;
use axum::extract::rejection::{FormRejection, JsonRejection};

use crate::error::AppError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

#[derive(FromRequest)]
#[from_request(via(axum::Form), rejection(AppError))]
pub struct FormBody<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidQuery(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::InvalidQuery(rejection.body_text())
    }
}
