use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

pub fn redirect_to(uri: &str) -> Response {
    Redirect::to(uri).into_response()
}

pub fn e500(error: impl Into<anyhow::Error>) -> HttpError {
    HttpError::InternalServerError(error.into())
}

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("Something went wrong")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        tracing::error!("{:#?}", self);

        match self {
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}
