pub mod error;
pub mod config;
pub mod request;
pub mod client;
pub mod handler;

/*

prompt-gateway: a small HTTP front for a chat-completion API.
A caller posts {context, message}; we forward it as a system/user
message pair, and answer with one flat envelope.

prompt-gateway/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports and serve entry point
│   ├── main.rs         # Binary: logging, config, listener
│   ├── error.rs        # Error type and its HTTP rendering
│   ├── config.rs       # Environment-sourced configuration
│   ├── request.rs      # Prompt, upstream and envelope shapes
│   ├── client.rs       # Outbound completion client
│   └── handler.rs      # Prompt and healthcheck handlers
└── tests/              # Integration tests against a stub upstream

*/

pub use client::UpstreamClient;
pub use config::GatewayConfig;
pub use error::Error;
pub use handler::router;

use std::sync::Arc;
use log::info;

/// Serve the gateway until `shutdown` resolves
pub async fn serve<F>(
  config: GatewayConfig
, shutdown: F
) -> Result<(), Error>
where F: std::future::Future<Output = ()> + Send + 'static
{   let bind_addr = config.bind_addr.clone();
    let client = UpstreamClient::new(Arc::new(config))?;
    let app = router(client);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("prompt-gateway listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
      .with_graceful_shutdown(shutdown)
      .await?;
    Ok(())
}
