//! HTTP request handlers for web adapter.

use askama::Template;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::adapters::csv_adapter::{EXPORT_FILE_NAME, records_to_csv};
use crate::domain::selection::Dimension;
use crate::domain::view::{ExplorerState, Interaction, ViewBody, render};

use super::form::selection_from_form;
use super::templates::{ExplorerFragment, ExplorerPage, ExplorerView, NO_DATA_MESSAGE};
use super::{AppState, WebError, is_htmx_request};

type FormPairs = Form<Vec<(String, String)>>;

fn respond(
    state: &AppState,
    headers: &HeaderMap,
    explorer: &ExplorerState,
) -> Result<Response, WebError> {
    let session = state.session()?;
    let output = render(&session, explorer, &state.config.highlight_columns);
    let view = ExplorerView::new(&output);

    let html = if is_htmx_request(headers) {
        ExplorerFragment { view: &view }.render()?
    } else {
        ExplorerPage { view: &view }.render()?
    };
    Ok(Html(html).into_response())
}

pub async fn explorer(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    respond(&state, &headers, &ExplorerState::default())
}

/// A sidebar control changed. The control that fired is named by the
/// `HX-Trigger-Name` header; date parts below it are reset.
pub async fn select(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(pairs): FormPairs,
) -> Result<Response, WebError> {
    let mut selection = selection_from_form(&pairs)?;
    if let Some(dimension) = headers
        .get("HX-Trigger-Name")
        .and_then(|v| v.to_str().ok())
        .and_then(|name| name.parse::<Dimension>().ok())
    {
        selection.reset_below(dimension);
    }
    let explorer = ExplorerState::default().on(Interaction::Select(selection));
    respond(&state, &headers, &explorer)
}

pub async fn apply(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(pairs): FormPairs,
) -> Result<Response, WebError> {
    let selection = selection_from_form(&pairs)?;
    log::debug!("apply filters: {selection:?}");
    let explorer = ExplorerState::default().on(Interaction::Apply(selection));
    respond(&state, &headers, &explorer)
}

pub async fn clear(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let explorer = ExplorerState::default().on(Interaction::Clear);
    respond(&state, &headers, &explorer)
}

/// Downloads the rows matching the posted selection as CSV.
pub async fn export(
    State(state): State<Arc<AppState>>,
    Form(pairs): FormPairs,
) -> Result<Response, WebError> {
    let selection = selection_from_form(&pairs)?;
    let session = state.session()?;
    let explorer = ExplorerState::default().on(Interaction::Apply(selection));
    let output = render(&session, &explorer, &state.config.highlight_columns);

    let ViewBody::Results { export, .. } = output.body else {
        return Err(WebError::not_found(NO_DATA_MESSAGE));
    };
    let rows = export.len();
    let body = records_to_csv(&session.full.columns, export)?;
    log::info!("exported {rows} rows");

    let disposition = format!("attachment; filename={EXPORT_FILE_NAME}");
    let mut response = body.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition).map_err(|e| WebError::internal(e.to_string()))?,
    );
    Ok(response)
}

/// Restarts the session: re-fetches the store and shows the preview.
pub async fn reload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let session = state.reload()?;
    log::info!("session reloaded with {} records", session.full.len());
    respond(&state, &headers, &ExplorerState::default())
}

pub async fn not_found() -> WebError {
    WebError::not_found("Page not found")
}
