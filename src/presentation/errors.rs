// Mapping of graph errors onto HTTP responses
use crate::application::error::GraphsError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl GraphsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnsupportedEntityKind(_) | Self::InvalidObject(_) => StatusCode::BAD_REQUEST,
            Self::TemplateStoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::GraphBackendUnavailable(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GraphsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "graph request failed");
        } else {
            tracing::warn!(error = %self, "graph request rejected");
        }

        (status, self.to_string()).into_response()
    }
}
