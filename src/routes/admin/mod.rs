use crate::app_state::AppState;
use axum::{routing::get, Router};
use mailing_list::manage_mailing_list;

mod mailing_list;

pub fn router() -> Router<AppState> {
    Router::new().route("/admin/mailing-list", get(manage_mailing_list))
}
