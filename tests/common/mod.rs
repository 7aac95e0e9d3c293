//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use request_echo::config::EchoConfig;
use request_echo::http::HttpServer;
use request_echo::lifecycle::Shutdown;
use tokio::net::TcpListener;

/// Start a server for `config` on an ephemeral port.
///
/// The server stops when the returned `Shutdown` is triggered.
pub async fn start_server(config: EchoConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.signalled();
    let server = HttpServer::new(config).unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, shutdown)
}

/// Client that never reuses connections or goes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
