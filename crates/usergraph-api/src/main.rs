//! CLI entry point for the usergraph GraphQL server.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use usergraph_api::schema::{build_schema, sdl, UserRepository};
use usergraph_api::server::{serve, shutdown_signal};
use usergraph_core::{AppConfig, UserProps};
use usergraph_graph::{GraphClient, GraphConfig, NodeRepository};

#[derive(Parser)]
#[command(name = "usergraph")]
#[command(about = "GraphQL API for User nodes stored in Neo4j")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file prefix (default: usergraph).
    #[arg(short, long, default_value = "usergraph", global = true)]
    config: String,

    /// Override the listen port from config.
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run the GraphQL HTTP server (default).
    Serve,
    /// Print the GraphQL schema in SDL form and exit.
    Sdl,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.log_json {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt().with_env_filter(filter).init();
    }

    match cli.command.unwrap_or(Command::Serve) {
        Command::Sdl => {
            println!("{}", sdl());
            Ok(())
        }
        Command::Serve => run_server(&cli.config, cli.port).await,
    }
}

async fn run_server(config_prefix: &str, port: Option<u16>) -> anyhow::Result<()> {
    let mut config = AppConfig::load(config_prefix)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    // Connect to Neo4j once; every request shares this client.
    let graph_config = GraphConfig::from(config.neo4j.clone());
    let client = GraphClient::connect(&graph_config).await?;

    let users: UserRepository = Arc::new(NodeRepository::<UserProps>::new(client.clone()));
    let schema = build_schema(users);

    let listener = TcpListener::bind(config.server.bind_address()).await?;
    serve(listener, schema, shutdown_signal()).await?;

    client.close();
    Ok(())
}
