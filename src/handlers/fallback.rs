//! Error bodies for requests no route handles.

use crate::error::AppError;

pub async fn no_route() -> AppError {
    AppError::RouteNotFound
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
