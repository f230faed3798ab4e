use log::{error, info};
use prompt_gateway::GatewayConfig;

#[tokio::main]
async fn main()
{   env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or("info")
    ).init();

    let config = GatewayConfig::from_env();
    if let Err(e) = prompt_gateway::serve(config, shutdown_signal()).await
    {   error!("Gateway stopped: {}", e);
        std::process::exit(1);
    }
}

async fn shutdown_signal()
{   if let Err(e) = tokio::signal::ctrl_c().await
    {   error!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
