use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::ConfigArgs;
use database::{connect, run_migrations};
use std::net::SocketAddr;
use web_server::TokenSigner;

/// The main entry point for the Finboard application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();
    let settings = cli.config.load()?;
    let _guard = configuration::init_tracing(&settings.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => {
            let addr = match args.addr {
                Some(addr) => addr,
                None => settings.server.socket_addr()?,
            };
            web_server::run_server(&settings, addr).await?;
        }
        Commands::Migrate => {
            let db_pool = connect(&settings.database).await?;
            run_migrations(&db_pool).await?;
        }
        Commands::IssueToken(args) => {
            let ttl = args.ttl_minutes.unwrap_or(settings.auth.token_ttl_minutes);
            let signer = TokenSigner::new(&settings.auth.secret_key, ttl)
                .with_context(|| format!("--ttl-minutes {ttl} is not a usable token lifetime"))?;
            let token = signer.issue(args.user_id)?;
            tracing::info!(user_id = args.user_id, ttl_minutes = ttl, "Issued access token.");
            println!("{token}");
        }
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Company financial statements, derived metrics and dashboards over HTTP.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (applies pending migrations first).
    Serve(ServeArgs),
    /// Apply database migrations and exit.
    Migrate,
    /// Print a signed bearer token for a user.
    IssueToken(IssueTokenArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Listen address, overriding `server.host` and `server.port` (e.g. "127.0.0.1:8080").
    #[arg(long)]
    addr: Option<SocketAddr>,
}

#[derive(Parser)]
struct IssueTokenArgs {
    /// The user id the token is issued to.
    #[arg(long)]
    user_id: i64,

    /// Token lifetime in minutes (defaults to `auth.token_ttl_minutes`).
    #[arg(long)]
    ttl_minutes: Option<i64>,
}
