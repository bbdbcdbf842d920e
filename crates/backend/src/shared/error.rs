//! API error taxonomy.
//!
//! Services return `anyhow::Result`; handlers convert domain conditions into
//! `ApiError` so every response carries a proper status code and a JSON body
//! the frontend can surface as a banner.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Lookup by prescription code matched no register rows
    #[error("{0}")]
    NotFound(String),

    /// Query or connection failure against the register
    #[error("falha na fonte de dados")]
    DataSource(#[from] anyhow::Error),

    /// Malformed request input
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DataSource(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::DataSource(e) = &self {
            // full chain to the log, generic message to the client
            tracing::error!("data source failure: {e:#}");
        }
        let status = self.status();
        let body = Json(json!({ "erro": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::DataSource(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
