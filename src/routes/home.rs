use crate::{app_state::AppState, configuration::SocialLink};
use askama_axum::Template;
use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home))
}

/// The visitor-facing subscribe form. The `user` parameter carries the
/// human-readable message set by the API redirect flow.
#[tracing::instrument(name = "Render subscribe form page", skip(app_state, parameters))]
async fn home(
    State(app_state): State<AppState>,
    Query(parameters): Query<Parameters>,
) -> HomeTemplate<'static> {
    HomeTemplate {
        title: "Mailing List",
        description: "Subscribe to our mailing list to hear about the latest posts.",
        redirect: app_state.base_url.to_string(),
        message: parameters.user,
        social_links: app_state.social_links.clone(),
    }
}

#[derive(Deserialize)]
struct Parameters {
    user: Option<String>,
}

#[derive(Template)]
#[template(path = "web/home.html")]
struct HomeTemplate<'a> {
    title: &'a str,
    description: &'a str,
    redirect: String,
    message: Option<String>,
    social_links: Vec<SocialLink>,
}
