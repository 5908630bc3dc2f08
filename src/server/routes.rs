//! Page handlers

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    middleware::map_response,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::services::ServeDir;

use super::middleware::cache_forever;
use super::AppState;
use crate::templates::{
    BlogIndexData, BlogPostData, HomeData, PageData, StatusPageData, TagPageData,
};

/// Number of posts listed on the home page
const RECENT_POSTS: usize = 5;

const NOT_FOUND_FALLBACK: &str =
    r#"<!doctype html><meta charset="utf-8"><title>Not Found</title><h1>Page not found</h1>"#;

/// Page routes and static files, without middleware
pub fn routes(state: Arc<AppState>) -> Router {
    let assets = Router::new()
        .nest_service("/static", ServeDir::new(&state.static_dir))
        .layer(map_response(cache_forever));

    Router::new()
        .route("/", get(home))
        .route("/healthz", get(healthz))
        .route("/blog", get(blog_index))
        .route("/blog/:slug", get(blog_post))
        .route("/tags/:tag", get(tag_page))
        .fallback(fallback)
        .with_state(state)
        .merge(assets)
}

async fn healthz() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], "OK")
}

async fn home(State(state): State<Arc<AppState>>) -> Response {
    let data = HomeData {
        page: PageData::new(&state.site, "Home"),
        recent_posts: state.store.all().into_iter().take(RECENT_POSTS).collect(),
    };
    render_page(&state, "home.html", &data)
}

async fn blog_index(State(state): State<Arc<AppState>>) -> Response {
    let data = BlogIndexData {
        page: PageData::new(&state.site, "Blog"),
        posts: state.store.all(),
    };
    render_page(&state, "blog_index.html", &data)
}

async fn blog_post(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    let Some(post) = state.store.by_slug(&slug) else {
        return not_found(&state);
    };
    let data = BlogPostData {
        page: PageData::new(&state.site, post.title.clone()),
        post,
    };
    render_page(&state, "blog_post.html", &data)
}

async fn tag_page(State(state): State<Arc<AppState>>, Path(tag): Path<String>) -> Response {
    let posts = state.store.by_tag(&tag);
    if posts.is_empty() {
        return not_found(&state);
    }
    let data = TagPageData {
        page: PageData::new(&state.site, format!("Tagged {}", tag)),
        tag,
        posts,
    };
    render_page(&state, "tag.html", &data)
}

async fn fallback(State(state): State<Arc<AppState>>) -> Response {
    not_found(&state)
}

/// Render a page, or a plain-text 500 naming the template error
fn render_page<T: Serialize>(state: &AppState, template: &str, data: &T) -> Response {
    match state.templates.render(template, data) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Rendering {} failed: {:#}", template, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                format!("template error: {:#}", e),
            )
                .into_response()
        }
    }
}

/// The 404 page, falling back to inline HTML if its template fails
fn not_found(state: &AppState) -> Response {
    let data = StatusPageData {
        page: PageData::new(&state.site, "Not Found"),
    };
    let body = state
        .templates
        .render("not_found.html", &data)
        .unwrap_or_else(|_| NOT_FOUND_FALLBACK.to_string());
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}
