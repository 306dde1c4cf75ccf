//! crudkit CLI - serve the sport API or bootstrap its schema

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crudkit_core::{Database, DbConfig};
use crudkit_server::tracing_setup::{init_tracing, TracingConfig};
use crudkit_server::{run_server, schema, ServerConfig};

#[derive(Parser, Debug)]
#[command(
    name = "crudkit",
    author,
    version,
    about = "Generic CRUD HTTP service over a pooled SQL connection"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Create missing tables and exit
    Migrate(DatabaseArgs),
}

/// Database connection arguments
#[derive(Parser, Debug)]
struct DatabaseArgs {
    /// Database URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://crudkit.db")]
    database_url: String,

    /// Upper bound on pooled connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    max_connections: u32,

    /// Seconds to wait for a free connection
    #[arg(long, env = "DATABASE_ACQUIRE_TIMEOUT_SECS", default_value_t = 30)]
    acquire_timeout_secs: u64,
}

impl DatabaseArgs {
    fn config(&self) -> DbConfig {
        DbConfig::new(&self.database_url)
            .with_max_connections(self.max_connections)
            .with_acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
    }
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b', default_value = "127.0.0.1:3030")]
    bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    cors_permissive: bool,

    /// Skip creating missing tables on startup
    #[arg(long)]
    no_migrate: bool,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => run_serve(args).await?,
        Commands::Migrate(args) => run_migrate(args).await?,
    }
    Ok(())
}

async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting crudkit server on {}", args.bind);

    let db = Database::connect(args.database.config())
        .await
        .context("Failed to open database pool")?;

    if !args.no_migrate {
        schema::apply(&db).await.context("Failed to apply schema")?;
    }

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Blocks until shutdown; the pool is closed on the way out
    run_server(db, config).await.context("Server error")?;
    Ok(())
}

async fn run_migrate(args: DatabaseArgs) -> Result<()> {
    let db = Database::connect(args.config())
        .await
        .context("Failed to open database pool")?;
    let applied = schema::apply(&db).await.context("Failed to apply schema");
    db.close().await;
    applied
}
