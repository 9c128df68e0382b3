use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::configuration::{Settings, StoreSettings};
use crate::routes::{health_check, join_waitlist, submit_contact};
use crate::store_client::StoreClient;
use crate::telemetry::SubmissionRootSpanBuilder;
use crate::utils::json_error_handler;

/// A bound, not yet running, server together with the port it got.
pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let store_client = get_store_client(&configuration.store)?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, store_client)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Only returns once the server has stopped.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_store_client(configuration: &StoreSettings) -> Result<StoreClient, anyhow::Error> {
    StoreClient::new(
        configuration.base_url.clone(),
        configuration.access_key.clone(),
        configuration.timeout(),
    )
}

pub fn run(listener: TcpListener, store_client: StoreClient) -> Result<Server, std::io::Error> {
    // One client for the whole process; every worker shares it through the `Arc`.
    let store_client = Data::new(store_client);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::<SubmissionRootSpanBuilder>::new())
            .app_data(
                web::JsonConfig::default()
                    .content_type_required(false)
                    .error_handler(json_error_handler),
            )
            .route("/health", web::get().to(health_check))
            .route("/api/waitlist", web::post().to(join_waitlist))
            .route("/api/contact", web::post().to(submit_contact))
            .app_data(store_client.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
