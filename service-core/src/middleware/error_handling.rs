//! Centralized error translation.
//!
//! Handlers return [`AppError`](crate::error::AppError), which renders the
//! uniform [`ErrorResponse`] body and attaches an [`ErrorReport`]. The
//! middleware here decides whether the diagnostic part of that report reaches
//! the client, and [`PanicResponder`] turns handler panics into the same body.

use crate::config::Environment;
use crate::error::{ErrorReport, ErrorResponse};
use axum::{
    body::Body,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::any::Any;
use tower_http::catch_panic::ResponseForPanic;

/// Adds `stackTrace` to error bodies outside production.
pub async fn error_handling_middleware(
    State(environment): State<Environment>,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;

    if environment.is_production() {
        return response;
    }

    let Some(ErrorReport {
        body,
        diagnostics: Some(trace),
    }) = response.extensions().get::<ErrorReport>().cloned()
    else {
        return response;
    };

    let body = body.with_stack_trace(trace);
    match serde_json::to_vec(&body) {
        Ok(bytes) => {
            let (mut parts, _) = response.into_parts();
            parts.headers.remove(header::CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            tracing::error!("Failed to serialize error response: {}", e);
            ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                .into_response()
        }
    }
}

/// `CatchPanicLayer` hook rendering a panic as a 500 [`ErrorResponse`].
#[derive(Debug, Clone, Copy)]
pub struct PanicResponder {
    environment: Environment,
}

impl PanicResponder {
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }
}

impl ResponseForPanic for PanicResponder {
    type ResponseBody = Body;

    fn response_for_panic(
        &mut self,
        err: Box<dyn Any + Send + 'static>,
    ) -> http::Response<Self::ResponseBody> {
        let detail = if let Some(s) = err.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = err.downcast_ref::<&str>() {
            s.to_string()
        } else {
            "unknown panic payload".to_string()
        };

        tracing::error!(panic = %detail, "Request handler panicked");

        let mut body = ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        if !self.environment.is_production() {
            body = body.with_stack_trace(format!("panic: {}", detail));
        }
        body.into_response()
    }
}
