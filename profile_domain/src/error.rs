use axum::http::header::WWW_AUTHENTICATE;
use axum::http::StatusCode;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::borrow::Cow;
use std::collections::HashMap;

pub type PfResult<T, E = PfError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum PfError {
    #[error("authentication required")]
    Unauthorized,

    #[error("profile not found")]
    ProfileNotFound,

    #[error("username is taken")]
    UsernameTaken,

    #[error("username is required")]
    UsernameRequired,

    #[error("an error occurred with the database")]
    Sqlx(#[from] sqlx::Error),

    #[error("an internal server error occurred")]
    Anyhow(#[from] anyhow::Error),
}

impl PfError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::ProfileNotFound => StatusCode::NOT_FOUND,
            Self::UsernameTaken => StatusCode::CONFLICT,
            Self::UsernameRequired => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Sqlx(_) | Self::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl axum::response::IntoResponse for PfError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (
                self.status_code(),
                [(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"))]
                    .into_iter()
                    .collect::<HeaderMap>(),
                self.to_string(),
            )
                .into_response(),
            Self::ProfileNotFound => (self.status_code(), ()).into_response(),
            Self::UsernameTaken => with_errors(
                self.status_code(),
                [("username".into(), vec!["username is taken".into()])],
            ),
            Self::UsernameRequired => with_errors(
                self.status_code(),
                [("username".into(), vec!["can't be blank".into()])],
            ),
            Self::Sqlx(ref e) => {
                tracing::error!("SQLx error: {:?}", e);
                (self.status_code(), self.to_string()).into_response()
            }
            Self::Anyhow(ref e) => {
                tracing::error!("Generic error: {:?}", e);
                (self.status_code(), self.to_string()).into_response()
            }
        }
    }
}

#[derive(serde::Serialize)]
struct JsonErrors {
    errors: HashMap<Cow<'static, str>, Vec<Cow<'static, str>>>,
}

fn with_errors(
    status: StatusCode,
    errors: impl Into<HashMap<Cow<'static, str>, Vec<Cow<'static, str>>>>,
) -> Response {
    (
        status,
        Json(JsonErrors {
            errors: errors.into(),
        }),
    )
        .into_response()
}
