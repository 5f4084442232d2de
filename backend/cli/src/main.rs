use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use salamgate_agent::{greeting_agent, Runner, SessionStore};
use salamgate_config::Config;
use salamgate_core::GateError;
use salamgate_gateway::{start_server, GatewayState};
use salamgate_provider::ChatCompletionsClient;
use salamgate_tools::{ToolRegistry, WeatherTool};

#[derive(Parser)]
#[command(name = "salamgate")]
#[command(about = "salamgate — web chat gateway for a hosted greeting agent")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the chat gateway server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show current gateway status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials may live in a local .env file.
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    salamgate_logging::init_logger(&config.log_dir, &config.log_level);

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/api/health", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("salamgate is not running on port {}", config.port);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    info!(
        port = config.port,
        bind = %config.bind_address,
        model = %config.model,
        "Starting salamgate gateway"
    );

    // Refuses to serve without a credential.
    let client = ChatCompletionsClient::new(
        config.api_key.clone().unwrap_or_default(),
        config.base_url.clone(),
    )?;

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(WeatherTool));

    let runner = Runner::new(Arc::new(client), Arc::new(registry))
        .with_context_window(config.context_window);

    let state = GatewayState {
        store: SessionStore::new(),
        runner: Arc::new(runner),
        agent: Arc::new(greeting_agent(&config.model)),
    };

    let addr = bind_addr(&config)?;
    start_server(addr, state).await
}

fn bind_addr(config: &Config) -> Result<SocketAddr, GateError> {
    format!("{}:{}", config.bind_address, config.port)
        .parse()
        .map_err(|e| GateError::Config(format!("invalid bind address: {e}")))
}
