use crate::{
    app_state::AppState,
    confirmation::{self, Confirmation},
    domain::{ApiAction, SubscriberEmail, SubscriberStatus},
    utils::redirect_to,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/mailing-list", get(mailing_list_api))
}

/// Entry point for both programmatic callers (JSON) and plain form
/// submissions (303 back to `redirect` with the message in `user`).
#[tracing::instrument(name = "Handle mailing list API request", skip(app_state, parameters))]
async fn mailing_list_api(
    State(app_state): State<AppState>,
    Query(parameters): Query<Parameters>,
) -> Response {
    let result = dispatch(&app_state, &parameters.action, parameters.email).await;

    match parameters.redirect.filter(|r| !r.is_empty()) {
        Some(redirect) => {
            if let Err(e) = &result {
                tracing::error!("{:#?}", e);
            }
            redirect_with_message(&redirect, &result)
        }
        None => match result {
            Ok(outcome) => (StatusCode::OK, Json(outcome.to_body())).into_response(),
            Err(e) => e.into_response(),
        },
    }
}

#[derive(Deserialize)]
struct Parameters {
    action: String,
    email: String,
    redirect: Option<String>,
}

#[tracing::instrument(name = "Dispatch mailing list action", skip(app_state, email))]
async fn dispatch(
    app_state: &AppState,
    action: &str,
    email: String,
) -> Result<ApiOutcome, ApiError> {
    match ApiAction::try_from(action) {
        Ok(ApiAction::Save) => submit(app_state, email).await,
        Ok(ApiAction::Unsubscribe) => unsubscribe(app_state, email).await,
        Err(_) => Err(ApiError::InvalidAction(action.to_string())),
    }
}

async fn submit(app_state: &AppState, email: String) -> Result<ApiOutcome, ApiError> {
    let email = SubscriberEmail::parse(email).map_err(ApiError::InvalidFormat)?;

    insert_subscriber(&app_state.db_pool, &email).await?;
    confirmation::send_detached(
        app_state.email_client.clone(),
        app_state.base_url.clone(),
        email,
        Confirmation::Subscribed,
    );

    Ok(ApiOutcome::Submitted)
}

async fn unsubscribe(app_state: &AppState, email: String) -> Result<ApiOutcome, ApiError> {
    let email = SubscriberEmail::parse(email).map_err(ApiError::InvalidFormat)?;

    if delete_subscriber(&app_state.db_pool, &email).await? == 0 {
        return Err(ApiError::NotFound);
    }

    confirmation::send_detached(
        app_state.email_client.clone(),
        app_state.base_url.clone(),
        email,
        Confirmation::Unsubscribed,
    );

    Ok(ApiOutcome::Removed)
}

/// The UNIQUE constraint on `email` makes the duplicate check and the
/// insert a single atomic operation.
#[tracing::instrument(name = "Insert new subscriber", skip(db_pool))]
async fn insert_subscriber(db_pool: &PgPool, email: &SubscriberEmail) -> Result<(), ApiError> {
    sqlx::query(
        r#"
        INSERT INTO mailing_list (id, email, status, subscribed_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email.as_ref())
    .bind(SubscriberStatus::Active.as_ref())
    .bind(OffsetDateTime::now_utc())
    .execute(db_pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => ApiError::Duplicate,
        _ => ApiError::StoreUnavailable(e),
    })?;

    Ok(())
}

#[tracing::instrument(name = "Delete subscriber", skip(db_pool))]
async fn delete_subscriber(db_pool: &PgPool, email: &SubscriberEmail) -> Result<u64, ApiError> {
    let result = sqlx::query(
        r#"
        DELETE FROM mailing_list
        WHERE email = $1
        "#,
    )
    .bind(email.as_ref())
    .execute(db_pool)
    .await
    .map_err(ApiError::StoreUnavailable)?;

    Ok(result.rows_affected())
}

enum ApiOutcome {
    Submitted,
    Removed,
}

impl ApiOutcome {
    fn desc(&self) -> &'static str {
        match self {
            ApiOutcome::Submitted => "submitted",
            ApiOutcome::Removed => "removed",
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiOutcome::Submitted => {
                "The submitted email address has successfully been added to the mailing list."
            }
            ApiOutcome::Removed => {
                "The submitted email address has successfully been removed from the mailing list."
            }
        }
    }

    fn to_body(&self) -> ApiResponseBody {
        ApiResponseBody {
            status: "success",
            desc: self.desc(),
            message: self.message(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ApiError {
    #[error("{0}")]
    InvalidFormat(String),
    #[error("`{0}` is not a supported mailing list action")]
    InvalidAction(String),
    #[error("The submitted email address is already on the mailing list")]
    Duplicate,
    #[error("The submitted email address is not on the mailing list")]
    NotFound,
    #[error("Failed to reach the subscriber store")]
    StoreUnavailable(#[source] sqlx::Error),
}

impl ApiError {
    fn desc(&self) -> &'static str {
        match self {
            ApiError::InvalidFormat(_) => "invalid-format",
            ApiError::InvalidAction(_) => "invalid-action",
            ApiError::Duplicate => "duplicate",
            ApiError::NotFound => "not-found",
            ApiError::StoreUnavailable(_) => "store-unavailable",
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::InvalidFormat(_) => {
                "The submitted email address does not match the required format."
            }
            ApiError::InvalidAction(_) => "The requested mailing list action cannot be performed.",
            ApiError::Duplicate => "The submitted email address is already on the mailing list.",
            ApiError::NotFound => "The submitted email address is not on the mailing list.",
            ApiError::StoreUnavailable(_) => {
                "An error occurred connecting to the subscriber store. Try again later."
            }
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidFormat(_) | ApiError::InvalidAction(_) => StatusCode::BAD_REQUEST,
            ApiError::Duplicate => StatusCode::CONFLICT,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn to_body(&self) -> ApiResponseBody {
        ApiResponseBody {
            status: "error",
            desc: self.desc(),
            message: self.message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("{:#?}", self);

        (self.status_code(), Json(self.to_body())).into_response()
    }
}

#[derive(Serialize)]
struct ApiResponseBody {
    status: &'static str,
    desc: &'static str,
    message: &'static str,
}

fn redirect_with_message(redirect: &str, result: &Result<ApiOutcome, ApiError>) -> Response {
    let message = match result {
        Ok(outcome) => outcome.message(),
        Err(e) => e.message(),
    };

    match serde_urlencoded::to_string([("user", message)]) {
        Ok(query) => redirect_to(&format!("{redirect}?{query}")),
        Err(e) => {
            tracing::error!("Failed to encode redirect message: {e:?}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
