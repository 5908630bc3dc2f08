//! Request logging and panic recovery

use axum::{
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    Router,
};
use std::any::Any;
use std::sync::Arc;
use std::time::Instant;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use super::AppState;
use crate::templates::{PageData, StatusPageData};

/// Header carrying the per-request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Cache policy for fingerprinted static assets
pub const STATIC_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

const ERROR_FALLBACK: &str = r#"<!doctype html><meta charset="utf-8">
<title>Something went wrong</title>
<h1>We hit a snag</h1>
<p>Sorry about that. Please try again.</p>"#;

/// Wrap `router` in the standard middleware stack.
///
/// Outermost first: assign a request id, log the request, copy the id onto
/// the response, turn panics into a 500 page.
pub fn with_middleware(router: Router, state: Arc<AppState>) -> Router {
    router
        .layer(CatchPanicLayer::custom(move |err: Box<dyn Any + Send + 'static>| {
            recover_panic(&state, err)
        }))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(middleware::from_fn(log_requests))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Emit one `http_request` event per request
pub async fn log_requests(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "http_request"
    );

    response
}

/// Long-lived caching for successful static responses
pub async fn cache_forever(mut response: Response) -> Response {
    if response.status().is_success() {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(STATIC_CACHE_CONTROL),
        );
    }
    response
}

fn recover_panic(state: &AppState, err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(error = %detail, "Handler panicked");

    let data = StatusPageData {
        page: PageData::new(&state.site, "Server Error"),
    };
    let body = state
        .templates
        .render("error.html", &data)
        .unwrap_or_else(|_| ERROR_FALLBACK.to_string());

    (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
}
