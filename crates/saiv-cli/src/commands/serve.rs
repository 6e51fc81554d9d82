//! Start the SAIV dashboard server.

use clap::Args;

use saiv_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the backend base URL
    #[arg(long)]
    pub backend_url: Option<String>,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, config_path: &str) -> Result<(), AppError> {
    let mut config = super::load_config(config_path).await?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref url) = args.backend_url {
        config.backend.url = url.clone();
        config.validate()?;
    }

    println!("Starting SAIV dashboard...");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);
    println!("  Backend: {}", config.backend.api_base_url());

    saiv_web::app::run_server(config).await
}
