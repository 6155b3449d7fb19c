//! CLI entry point for sanity-site

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sanity-site")]
#[command(author = "Yukang Chen")]
#[command(version)]
#[command(about = "A server-rendered blog and page-builder site backed by Sanity", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to the configured address)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Render the site into the public folder
    #[command(alias = "g")]
    Generate,

    /// List every pre-renderable route
    Routes,

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "sanity_site=debug,info"
    } else {
        "sanity_site=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Serve { port, ip } => {
            let site = sanity_site::Site::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| site.config.server.ip.clone());
            let port = port.unwrap_or(site.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            sanity_site::server::start(&site, &ip, port).await?;
        }

        Commands::Generate => {
            let site = sanity_site::Site::new(&base_dir)?;
            tracing::info!("Generating static files...");
            let count = site.generate().await?;
            println!("Generated {} routes successfully!", count);
        }

        Commands::Routes => {
            let site = sanity_site::Site::new(&base_dir)?;
            site.routes().await?;
        }

        Commands::Clean => {
            let site = sanity_site::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("sanity-site version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
