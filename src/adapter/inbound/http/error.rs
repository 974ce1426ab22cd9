use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::application::candidate::SubmitError;
use crate::error::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    App(#[from] Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{message}")]
    InvalidFields {
        message: String,
        fields: Vec<&'static str>,
    },
}

impl From<SubmitError> for ApiError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Invalid(_) => Self::InvalidFields {
                fields: err.fields(),
                message: err.to_string(),
            },
            SubmitError::Unavailable => Self::App(Error::Unavailable("sheets webhook")),
            SubmitError::Upstream(e) => Self::App(e),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::InvalidFields { .. } => StatusCode::BAD_REQUEST,
            Self::App(err) => match err {
                Error::Domain(_) => StatusCode::BAD_REQUEST,
                Error::NotFound(_) => StatusCode::NOT_FOUND,
                Error::Conflict(_) => StatusCode::CONFLICT,
                Error::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                Error::Upstream { .. } | Error::Http(_) | Error::Connection(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "Request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = match &self {
            Self::InvalidFields { fields, .. } => json!({
                "error": message,
                "status": status.as_u16(),
                "fields": fields,
            }),
            _ => json!({
                "error": message,
                "status": status.as_u16(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;

    #[test]
    fn errors_map_to_documented_statuses() {
        let cases = [
            (Error::from(DomainError::MissingField { field: "email" }), StatusCode::BAD_REQUEST),
            (Error::NotFound("post".into()), StatusCode::NOT_FOUND),
            (Error::Conflict("email".into()), StatusCode::CONFLICT),
            (Error::Unavailable("sheets webhook"), StatusCode::SERVICE_UNAVAILABLE),
            (Error::upstream("sanity", "timeout"), StatusCode::BAD_GATEWAY),
            (Error::Database("locked".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn submit_errors_keep_their_meaning() {
        let invalid = SubmitError::Invalid(vec![DomainError::MissingField { field: "name" }]);
        match ApiError::from(invalid) {
            ApiError::InvalidFields { fields, .. } => assert_eq!(fields, ["name"]),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            ApiError::from(SubmitError::Unavailable).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
