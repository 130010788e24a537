use std::{net::SocketAddr, sync::Arc};

use actix_cors::Cors;
use actix_web::{dev::ServerHandle, web, App, HttpServer};
use log::{error, info};

use crate::config::ForwarderConfig;
use crate::controllers::{proxy_controller, system_controller};
use crate::middleware::TracingMiddleware;
use crate::services::{WebhookClient, WebhookClientTrait};

pub struct AppState {
    pub webhook_client: Arc<dyn WebhookClientTrait>,
}

impl AppState {
    pub fn new(config: &ForwarderConfig) -> Result<Self, String> {
        let webhook_client = WebhookClient::new(config)
            .map_err(|e| format!("Failed to create webhook client: {e}"))?;
        Ok(Self {
            webhook_client: Arc::new(webhook_client),
        })
    }
}

const DEFAULT_WORKER_COUNT: usize = 4;

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(proxy_controller::config)
            .configure(system_controller::config),
    );
}

pub struct WebService {
    server_handle: Option<ServerHandle>,
    join_handle: Option<tokio::task::JoinHandle<()>>,
    config: ForwarderConfig,
}

impl WebService {
    pub fn new(config: ForwarderConfig) -> Self {
        Self {
            server_handle: None,
            join_handle: None,
            config,
        }
    }

    /// Bind and start serving in the background.
    ///
    /// Returns the bound address, so port 0 can be used to pick a free port.
    pub async fn start(&mut self, host: &str, port: u16) -> Result<SocketAddr, String> {
        if self.join_handle.is_some() {
            return Err("Web service is already running".to_string());
        }

        let app_state = web::Data::new(AppState::new(&self.config)?);
        info!("Forwarding /api/proxy to {}", self.config.webhook_url);

        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .wrap(TracingMiddleware)
                .wrap(Cors::permissive())
                .configure(app_config)
        })
        .workers(DEFAULT_WORKER_COUNT)
        .disable_signals()
        .bind((host, port))
        .map_err(|e| format!("Failed to bind server: {e}"))?;

        let addr = server
            .addrs()
            .first()
            .copied()
            .ok_or_else(|| "Server bound no address".to_string())?;

        let server = server.run();
        self.server_handle = Some(server.handle());
        self.join_handle = Some(tokio::spawn(async move {
            if let Err(e) = server.await {
                error!("Web server error: {}", e);
            }
        }));

        info!("Web service listening on http://{addr}");
        Ok(addr)
    }

    /// Gracefully stop the server and wait for it to wind down.
    pub async fn stop(&mut self) -> Result<(), String> {
        if let Some(handle) = self.server_handle.take() {
            handle.stop(true).await;
        }

        if let Some(join_handle) = self.join_handle.take() {
            if let Err(e) = join_handle.await {
                error!("Error waiting for server shutdown: {}", e);
                return Err(format!("Error waiting for server shutdown: {e}"));
            }
        }

        info!("Web service stopped successfully");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.join_handle.is_some()
    }
}

impl Drop for WebService {
    fn drop(&mut self) {
        if let Some(handle) = self.server_handle.take() {
            // The stop command is sent when `stop` is called; the returned
            // future only waits for completion.
            drop(handle.stop(false));
        }
    }
}
