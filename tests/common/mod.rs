//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use service_scaffold::config::ServiceConfig;
use service_scaffold::http::{bind, HttpServer};
use service_scaffold::lifecycle::Shutdown;
use service_scaffold::observability::SpanTracer;
use service_scaffold::ServiceProfile;
use tokio::task::JoinHandle;

/// A service running on an ephemeral local port.
pub struct RunningService {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<()>,
}

impl RunningService {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the server task to finish.
    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = tokio::time::timeout(Duration::from_secs(5), self.handle).await;
    }
}

/// Start the HTTP server for `profile` with a short ping delay.
pub async fn start_service(profile: ServiceProfile) -> RunningService {
    let mut config = ServiceConfig::for_profile(profile);
    config.ping.delay_ms = 10;
    start_with_config(config).await
}

/// Start the HTTP server with an explicit configuration.
pub async fn start_with_config(mut config: ServiceConfig) -> RunningService {
    config.listener.bind_address = "127.0.0.1:0".to_string();
    let listener = bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let tracer = Arc::new(SpanTracer::new(config.service_name()));
    let server = HttpServer::new(config, tracer, shutdown.clone());
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    RunningService {
        addr,
        shutdown,
        handle,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
}
