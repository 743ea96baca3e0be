// SPDX-License-Identifier: Apache-2.0

use crate::http::request_tracing::RequestTrace;
use crate::source::SourceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use relief_model::SheetLookupError;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    InvalidRequest,
    SpreadsheetNotFound,
    TabNotFound,
    UnknownComponent,
    EmptySheet,
    UpstreamUnavailable,
}

#[must_use]
pub fn status_for(code: ApiErrorCode) -> StatusCode {
    match code {
        ApiErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ApiErrorCode::SpreadsheetNotFound
        | ApiErrorCode::TabNotFound
        | ApiErrorCode::EmptySheet => StatusCode::NOT_FOUND,
        ApiErrorCode::UnknownComponent | ApiErrorCode::UpstreamUnavailable => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Request failures. Messages are logged; clients only see a generic
/// message per code.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Lookup(#[from] SheetLookupError),
    #[error("component {0:?} is not registered")]
    UnknownComponent(String),
    #[error("sheet has no rows")]
    EmptySheet,
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl ServerError {
    #[must_use]
    pub fn code(&self) -> ApiErrorCode {
        match self {
            Self::InvalidRequest(_) => ApiErrorCode::InvalidRequest,
            Self::Lookup(SheetLookupError::UnknownSpreadsheet(_)) => {
                ApiErrorCode::SpreadsheetNotFound
            }
            Self::Lookup(SheetLookupError::UnknownTab { .. }) => ApiErrorCode::TabNotFound,
            Self::UnknownComponent(_) => ApiErrorCode::UnknownComponent,
            Self::EmptySheet | Self::Source(SourceError::EmptyRange(_)) => ApiErrorCode::EmptySheet,
            Self::Source(SourceError::NotFound(_)) => ApiErrorCode::SpreadsheetNotFound,
            Self::Source(_) => ApiErrorCode::UpstreamUnavailable,
        }
    }

    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self.code() {
            ApiErrorCode::InvalidRequest => "invalid request",
            ApiErrorCode::SpreadsheetNotFound => "spreadsheet not configured",
            ApiErrorCode::TabNotFound => "tab not configured",
            ApiErrorCode::UnknownComponent => "unknown component type",
            ApiErrorCode::EmptySheet => "no data found",
            ApiErrorCode::UpstreamUnavailable => "failed to get sheet data",
        }
    }

    #[must_use]
    pub fn for_request(self, trace: &RequestTrace) -> ApiFailure {
        ApiFailure {
            error: self,
            request_id: trace.request_id.clone(),
        }
    }
}

/// A [`ServerError`] bound to the request it failed.
#[derive(Debug)]
pub struct ApiFailure {
    pub error: ServerError,
    pub request_id: String,
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let code = self.error.code();
        let status = status_for(code);
        if status.is_server_error() {
            tracing::error!(request_id = %self.request_id, error = %self.error, "request failed");
        } else {
            tracing::warn!(request_id = %self.request_id, error = %self.error, "request rejected");
        }
        api_error_response(status, code, self.error.public_message(), &self.request_id)
    }
}

pub(crate) fn api_error_response(
    status: StatusCode,
    code: ApiErrorCode,
    message: &str,
    request_id: &str,
) -> Response {
    let body = Json(json!({
        "error": {
            "code": code,
            "message": message,
            "request_id": request_id,
        }
    }));
    (status, body).into_response()
}
