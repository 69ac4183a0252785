use crate::{
    app_state::AppState,
    domain::{BulkAction, StatusFilter, Subscriber, SubscriberEmail, SubscriberStatus},
    utils::{e500, HttpError},
};
use anyhow::Context;
use askama_axum::Template;
use axum::extract::State;
use axum_extra::extract::Query;
use serde::Deserialize;
use sqlx::PgPool;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use uuid::Uuid;

/// Admin list management screen. A WordPress-style bulk action bar posts
/// back to this same route: `action1`/`action2` carry the verb (first
/// non-empty wins) and `ckd` the selected row ids.
#[tracing::instrument(name = "Manage mailing list", skip(app_state, parameters))]
pub(super) async fn manage_mailing_list(
    State(app_state): State<AppState>,
    Query(parameters): Query<Parameters>,
) -> Result<MailingListPage<'static>, HttpError> {
    if let Some(action) = parameters.bulk_action() {
        match BulkAction::try_from(action) {
            Ok(action) => apply_bulk_action(&app_state.db_pool, &action, &parameters.ckd).await,
            Err(e) => tracing::warn!("Ignoring unknown bulk action: {e}"),
        }
    }

    let filter = StatusFilter::from(parameters.status);
    let subscribers = list_subscribers(&app_state.db_pool, &filter)
        .await
        .map_err(e500)?;

    let rows = subscribers
        .into_iter()
        .filter_map(|subscriber| match subscriber {
            Ok(subscriber) => Some(SubscriberRowView::from(subscriber)),
            Err(e) => {
                tracing::warn!(
                    e.cause_chain = ?e,
                    "Skipping a mailing list row. \
                    The stored contact details are invalid"
                );
                None
            }
        })
        .collect();

    Ok(MailingListPage {
        title: "Mailing List",
        rows,
    })
}

#[derive(Deserialize)]
pub(super) struct Parameters {
    status: Option<String>,
    action1: Option<String>,
    action2: Option<String>,
    #[serde(default)]
    ckd: Vec<Uuid>,
}

impl Parameters {
    fn bulk_action(&self) -> Option<&str> {
        [&self.action1, &self.action2]
            .into_iter()
            .find_map(|action| action.as_deref().filter(|action| !action.is_empty()))
    }
}

/// Each selected row is processed independently. A missing id or a per-row
/// store error is logged and skipped; the rest of the set still proceeds.
#[tracing::instrument(name = "Apply bulk action", skip(db_pool))]
async fn apply_bulk_action(db_pool: &PgPool, action: &BulkAction, selected: &[Uuid]) {
    for id in selected {
        let result = match action {
            BulkAction::Active => set_status(db_pool, id, SubscriberStatus::Active).await,
            BulkAction::Trash => set_status(db_pool, id, SubscriberStatus::Trash).await,
            BulkAction::Delete => delete_row(db_pool, id).await,
        };

        match result {
            Ok(0) => tracing::debug!("No mailing list row with id {id}"),
            Ok(_) => {}
            Err(e) => tracing::warn!(
                error_cause_chain = ?e,
                error.message = %e,
                "Failed to apply `{}` to mailing list row {id}. Skipping.",
                action.as_ref(),
            ),
        }
    }
}

async fn set_status(
    db_pool: &PgPool,
    id: &Uuid,
    status: SubscriberStatus,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE mailing_list SET status = $1
        WHERE id = $2
        "#,
    )
    .bind(status.as_ref())
    .bind(id)
    .execute(db_pool)
    .await?;

    Ok(result.rows_affected())
}

async fn delete_row(db_pool: &PgPool, id: &Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM mailing_list
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(db_pool)
    .await?;

    Ok(result.rows_affected())
}

#[tracing::instrument(skip(db_pool))]
async fn list_subscribers(
    db_pool: &PgPool,
    filter: &StatusFilter,
) -> Result<Vec<Result<Subscriber, anyhow::Error>>, anyhow::Error> {
    const QUERY: &str = "SELECT id, email, status, subscribed_at FROM mailing_list";

    let rows: Vec<SubscriberRow> = match filter {
        StatusFilter::All => sqlx::query_as(QUERY).fetch_all(db_pool).await,
        StatusFilter::Only(status) => {
            sqlx::query_as(&format!("{QUERY} WHERE status = $1"))
                .bind(status)
                .fetch_all(db_pool)
                .await
        }
    }
    .context("Failed to fetch mailing list rows")?;

    Ok(rows.into_iter().map(Subscriber::try_from).collect())
}

#[derive(sqlx::FromRow)]
struct SubscriberRow {
    id: Uuid,
    email: String,
    status: String,
    subscribed_at: OffsetDateTime,
}

impl TryFrom<SubscriberRow> for Subscriber {
    type Error = anyhow::Error;

    fn try_from(row: SubscriberRow) -> Result<Self, Self::Error> {
        let email = SubscriberEmail::parse(row.email).map_err(|e| anyhow::anyhow!(e))?;
        let status = SubscriberStatus::try_from(row.status).map_err(|e| anyhow::anyhow!(e))?;

        Ok(Subscriber {
            id: row.id,
            email,
            status,
            subscribed_at: row.subscribed_at,
        })
    }
}

#[derive(Template)]
#[template(path = "web/mailing_list.html")]
pub(super) struct MailingListPage<'a> {
    title: &'a str,
    rows: Vec<SubscriberRowView>,
}

struct SubscriberRowView {
    id: String,
    email: String,
    status: String,
    subscribed_at: String,
}

impl From<Subscriber> for SubscriberRowView {
    fn from(subscriber: Subscriber) -> Self {
        let subscribed_at = match subscriber.subscribed_at.format(&Rfc3339) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to format subscription timestamp: {e:?}");
                String::new()
            }
        };

        Self {
            id: subscriber.id.to_string(),
            email: subscriber.email.as_ref().to_string(),
            status: subscriber.status.as_ref().to_string(),
            subscribed_at,
        }
    }
}
