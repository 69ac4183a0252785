pub mod app_state;
pub mod configuration;
pub mod confirmation;
pub mod domain;
pub mod email_client;
pub mod routes;
pub mod startup;
pub mod telemetry;
mod utils;
