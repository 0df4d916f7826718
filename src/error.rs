use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{DOCTYPE, html};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not found")]
    NotFound,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "404 Not Found",
                "The page you requested could not be found.".to_string(),
            ),
            AppError::Io(e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "500 Internal Server Error",
                    "An internal server error occurred.".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "500 Internal Server Error",
                    msg.clone(),
                )
            }
        };

        let body = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    title { (title) }
                }
                body {
                    h1 { (title) }
                    p { (message) }
                    p { a href="/" { "Back to the portfolio" } }
                }
            }
        };

        (status, Html(body.into_string())).into_response()
    }
}

/// Failures of the admin sign-in flow. Every variant is shown to the visitor
/// and leaves their session untouched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("credential could not be decoded: {0}")]
    Decode(String),
    #[error("{email} is not on the admin allow-list")]
    Unauthorized { email: String },
    #[error("identity provider sign-in failed: {0}")]
    Provider(String),
}

impl AuthError {
    /// The notice shown on the login page.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::Decode(_) => "Error decoding Google credential.",
            AuthError::Unauthorized { .. } => {
                "Unauthorized Google account. You do not have admin permissions to edit this portfolio."
            }
            AuthError::Provider(_) => "Google login failed!",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Decode(_) | AuthError::Provider(_) => StatusCode::BAD_REQUEST,
            AuthError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        }
    }
}

/// Durable store failures. These are logged and never surfaced to visitors.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("reading document `{key}` failed: {reason}")]
    Read { key: String, reason: String },
    #[error("writing document `{key}` failed: {reason}")]
    Write { key: String, reason: String },
    #[error("document `{key}` is not valid JSON: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
