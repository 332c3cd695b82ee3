use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use wikioutline_core::outline::OutlineError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Missing required query parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Wikipedia page not found for '{subject}'. URL: {url}")]
    NotFound { subject: String, url: String },

    #[error("HTTP Error fetching content: {0}")]
    UpstreamHttp(String),

    #[error("Network Error during content fetch: {0}")]
    Network(String),

    #[error(transparent)]
    Outline(#[from] OutlineError),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } | Self::Outline(OutlineError::InsufficientHeadings) => {
                StatusCode::NOT_FOUND
            }
            Self::UpstreamHttp(_)
            | Self::Network(_)
            | Self::Outline(OutlineError::ContentNotFound) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{self}");
        } else {
            log::warn!("{self}");
        }

        let body = Json(ErrorBody {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
