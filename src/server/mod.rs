//! HTTP server for the site
//!
//! Pages are rendered on request from the in-memory [`PostStore`]. When
//! watching is enabled, edits in the post directory trigger a store reload;
//! a failed reload is logged and the last good index keeps being served.

mod middleware;
mod routes;

use anyhow::{Context, Result};
use axum::Router;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::SiteConfig;
use crate::content::PostStore;
use crate::templates::TemplateRenderer;
use crate::Site;

pub use middleware::{with_middleware, REQUEST_ID_HEADER, STATIC_CACHE_CONTROL};
pub use routes::routes;

/// Shared state handed to every handler
pub struct AppState {
    pub site: SiteConfig,
    pub templates: TemplateRenderer,
    pub store: Arc<PostStore>,
    pub static_dir: PathBuf,
}

/// Build the full application: routes plus middleware
pub fn router(state: Arc<AppState>) -> Router {
    with_middleware(routes(state.clone()), state)
}

/// Start the server and block until Ctrl+C
pub async fn start(site: &Site, addr: SocketAddr, show_drafts: bool, watch: bool) -> Result<()> {
    let store = Arc::new(
        site.open_store(show_drafts)
            .with_context(|| format!("loading posts from {}", site.posts_dir.display()))?,
    );

    let state = Arc::new(AppState {
        site: site.config.clone(),
        templates: TemplateRenderer::new()?,
        store: store.clone(),
        static_dir: site.static_dir.clone(),
    });

    if watch {
        let posts_dir = site.posts_dir.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(posts_dir, store) {
                tracing::error!("File watcher error: {:#}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Watch the post directory and reload the store on change
fn watch_and_reload(posts_dir: PathBuf, store: Arc<PostStore>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Debounce so an editor's save burst triggers one reload
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;
    debouncer
        .watcher()
        .watch(&posts_dir, RecursiveMode::NonRecursive)?;
    tracing::debug!("Watching: {:?}", posts_dir);

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events
                    .iter()
                    .any(|e| crate::content::scan::is_markdown_file(&e.path));
                if !relevant {
                    continue;
                }

                match store.reload() {
                    Ok(()) => tracing::info!("Reloaded {} posts", store.len()),
                    Err(e) => tracing::error!(
                        stage = e.stage(),
                        "Reload failed, keeping previous posts: {}",
                        e
                    ),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(_) => break,
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
