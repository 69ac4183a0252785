use crate::{
    app_state::AppState,
    configuration::{DatabaseSettings, Settings},
    routes::{admin, health_check, home, mailing_list},
    telemetry::{request_span, RequestUuid},
};
use anyhow::Context;
use axum::{http::Uri, Router};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{net::SocketAddr, time::Duration};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

pub struct Application {
    local_addr: SocketAddr,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let db_pool = get_connection_pool(&config.database);
        let email_client = config.email_client.client()?;

        let address = format!("{}:{}", config.application.host, config.application.port);
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind `{address}`"))?;
        let local_addr = listener
            .local_addr()
            .context("Failed to get local address")?;

        let base_url: Uri = config
            .application
            .base_url
            .parse()
            .context("Failed to parse application base url")?;

        let app_state = AppState {
            db_pool,
            email_client,
            base_url,
            social_links: config.mailing_list.social_links(),
        };

        Ok(Self {
            local_addr,
            listener,
            router: router(app_state),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        tracing::info!("Listening on {}", self.local_addr);
        axum::serve(self.listener, self.router).await
    }
}

pub fn get_connection_pool(config: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy_with(config.with_db())
}

fn router(app_state: AppState) -> Router {
    Router::new()
        .merge(health_check::router())
        .merge(home::router())
        .merge(mailing_list::router())
        .merge(admin::router())
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(RequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(app_state)
}
