//! Fills the `apiPath` field of error responses.
//!
//! [`AppError`](crate::error::AppError) renders its body without knowing the
//! request URI and leaves a copy of the [`ErrorResponse`] in the response
//! extensions. This middleware re-renders that body with the path filled in.

use axum::{Json, extract::Request, middleware::Next, response::IntoResponse, response::Response};

use crate::error::ErrorResponse;

pub async fn api_path(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<ErrorResponse>() {
        Some(mut body) => {
            body.api_path = format!("uri={path}");
            let status = response.status();
            (status, Json(body)).into_response()
        }
        None => response,
    }
}
