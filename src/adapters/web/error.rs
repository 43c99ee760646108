//! HTTP error responses for web adapter.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::domain::error::ExplorerError;

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

pub fn status_from_error(err: &ExplorerError) -> StatusCode {
    match err {
        ExplorerError::ConfigMissing { .. }
        | ExplorerError::ConfigInvalid { .. }
        | ExplorerError::ConfigParse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        ExplorerError::NoData => StatusCode::NOT_FOUND,
        ExplorerError::DateParse { .. }
        | ExplorerError::MissingField { .. }
        | ExplorerError::InvalidField { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ExplorerError::Database { .. } | ExplorerError::DatabaseQuery { .. } => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        ExplorerError::Export { .. } | ExplorerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<ExplorerError> for WebError {
    fn from(err: ExplorerError) -> Self {
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl From<askama::Error> for WebError {
    fn from(err: askama::Error) -> Self {
        Self::internal(format!("template error: {err}"))
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            log::error!("{} {}", self.status, self.message);
        } else {
            log::debug!("{} {}", self.status, self.message);
        }
        let page = super::templates::ErrorPage {
            message: &self.message,
            status: self.status.as_u16(),
        };
        match page.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(_) => (self.status, self.message).into_response(),
        }
    }
}
