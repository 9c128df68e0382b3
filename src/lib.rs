pub mod configuration;
pub mod domain;
pub mod routes;
pub mod startup;
pub mod store_client;
pub mod telemetry;
pub mod utils;
