//! Web server adapter.
//!
//! Axum server with an HTMX front end. Filter controls post the whole
//! sidebar form; the server answers with the re-rendered `#explorer`
//! block for HTMX requests and a full page otherwise. The dataset is
//! loaded once and shared read-only until `/reload`.

mod error;
mod form;
mod handlers;
mod templates;

pub use error::WebError;
pub use form::{selection_fields, selection_from_form};
pub use templates::{ExplorerView, NO_DATA_MESSAGE};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::{Arc, RwLock};
use tower_http::services::ServeDir;

use crate::domain::config::ExplorerConfig;
use crate::domain::dataset::Session;
use crate::domain::error::ExplorerError;
use crate::ports::record_store::RecordStore;

pub struct AppState {
    pub store: Arc<dyn RecordStore + Send + Sync>,
    pub config: ExplorerConfig,
    session: RwLock<Arc<Session>>,
}

impl AppState {
    /// Fetches and normalizes the session up front; a store or data error
    /// here stops the server from starting.
    pub fn load(
        store: Arc<dyn RecordStore + Send + Sync>,
        config: ExplorerConfig,
    ) -> Result<Self, ExplorerError> {
        let session = Session::load(store.as_ref(), &config.normalizer(), config.preview_limit)?;
        Ok(Self {
            store,
            config,
            session: RwLock::new(Arc::new(session)),
        })
    }

    pub fn session(&self) -> Result<Arc<Session>, WebError> {
        self.session
            .read()
            .map(|s| Arc::clone(&*s))
            .map_err(|_| WebError::internal("session lock poisoned"))
    }

    /// Re-fetches from the store. On failure the current session is kept.
    pub fn reload(&self) -> Result<Arc<Session>, WebError> {
        let fresh = Arc::new(Session::load(
            self.store.as_ref(),
            &self.config.normalizer(),
            self.config.preview_limit,
        )?);
        let mut guard = self
            .session
            .write()
            .map_err(|_| WebError::internal("session lock poisoned"))?;
        *guard = Arc::clone(&fresh);
        Ok(fresh)
    }
}

pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    Router::new()
        .route("/", get(handlers::explorer))
        .route("/select", post(handlers::select))
        .route("/apply", post(handlers::apply))
        .route("/clear", post(handlers::clear))
        .route("/export", post(handlers::export))
        .route("/reload", post(handlers::reload))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
}

/// Binds `config.listen` and serves until the process stops.
pub async fn serve(state: AppState) -> Result<(), ExplorerError> {
    let addr = state.config.listen;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("explorer listening on http://{addr}");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
