use mailing_list::{
    configuration::{get_configuration, DatabaseSettings},
    startup::{get_connection_pool, Application},
    telemetry::{get_subscriber, init_subscriber},
};
use once_cell::sync::Lazy;
use reqwest::{redirect, Client, Response};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::{net::SocketAddr, time::Duration};
use uuid::Uuid;
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    let name = "test";
    let default_env_filter = "info";
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(name.into(), default_env_filter.into(), std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(name.into(), default_env_filter.into(), std::io::sink);
        init_subscriber(subscriber);
    }
});

static FAILED_TO_EXECUTE_REQUEST: &str = "Failed to execute request";

pub struct TestApp {
    pub address: SocketAddr,
    pub db_pool: PgPool,
    pub email_server: MockServer,
    client: Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Lazy::force(&TRACING);

        let mut config = get_configuration().expect("Failed to read configuration");
        config.database.database_name = Uuid::new_v4().to_string();
        config.application.port = 0;

        let db_pool = configure_database(&config.database).await;
        let email_server = MockServer::start().await;
        config.email_client.base_url = email_server.uri();

        let app = Application::build(config)
            .await
            .expect("Failed to build application");
        let address = app.local_addr();

        tokio::spawn(app.run_until_stopped());

        Self {
            address,
            db_pool,
            email_server,
            client: Client::builder()
                .redirect(redirect::Policy::none())
                .build()
                .expect("Failed to build http client"),
        }
    }

    pub async fn get_health_check(&self) -> Response {
        self.client
            .get(self.url("/health_check"))
            .send()
            .await
            .expect(FAILED_TO_EXECUTE_REQUEST)
    }

    pub async fn get_home(&self, query: &[(&str, &str)]) -> Response {
        self.client
            .get(self.url("/"))
            .query(query)
            .send()
            .await
            .expect(FAILED_TO_EXECUTE_REQUEST)
    }

    pub async fn get_mailing_list_api(&self, query: &[(&str, &str)]) -> Response {
        self.client
            .get(self.url("/api/mailing-list"))
            .query(query)
            .send()
            .await
            .expect(FAILED_TO_EXECUTE_REQUEST)
    }

    pub async fn get_admin_mailing_list(&self, query: &[(&str, &str)]) -> Response {
        self.client
            .get(self.url("/admin/mailing-list"))
            .query(query)
            .send()
            .await
            .expect(FAILED_TO_EXECUTE_REQUEST)
    }

    pub async fn subscribe(&self, email: &str) -> Response {
        self.get_mailing_list_api(&[("action", "save"), ("email", email)])
            .await
    }

    pub async fn saved_subscribers(&self) -> Vec<SavedSubscriber> {
        sqlx::query_as::<_, (Uuid, String, String)>("SELECT id, email, status FROM mailing_list")
            .fetch_all(&self.db_pool)
            .await
            .expect("Failed to fetch saved subscribers")
            .into_iter()
            .map(|(id, email, status)| SavedSubscriber { id, email, status })
            .collect()
    }

    /// Confirmation delivery is detached from the request path, so tests
    /// poll the mock email server instead of asserting right away.
    pub async fn confirmation_emails(&self, expected: usize) -> Vec<serde_json::Value> {
        for _ in 0..50 {
            let requests = self
                .email_server
                .received_requests()
                .await
                .unwrap_or_default();

            if requests.len() >= expected {
                return requests
                    .iter()
                    .map(|request| {
                        serde_json::from_slice(&request.body)
                            .expect("Failed to parse confirmation email body")
                    })
                    .collect();
            }

            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        panic!("Expected {expected} confirmation emails to be sent");
    }

    fn url(&self, endpoint: &str) -> String {
        format!("http://{}{endpoint}", self.address)
    }
}

pub struct SavedSubscriber {
    pub id: Uuid,
    pub email: String,
    pub status: String,
}

async fn configure_database(configuration: &DatabaseSettings) -> PgPool {
    let mut conn = PgConnection::connect_with(&configuration.without_db())
        .await
        .expect("Failed to connect to Postgres");

    conn.execute(format!(r#"CREATE DATABASE "{}";"#, configuration.database_name).as_str())
        .await
        .expect("Failed to create database");

    let pool = get_connection_pool(configuration);

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    pool
}
