//! CLI entry point for uralliance-site

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use uralliance_site::Site;

#[derive(Parser)]
#[command(name = "uralliance-site")]
#[command(version)]
#[command(about = "Content API, SEO documents and contact relay for the Uralliance website", long_about = None)]
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
    /// Start the HTTP server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to server.ip)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Write sitemap.xml, robots.txt and rss.xml into the public folder
    #[command(alias = "g")]
    Generate,

    /// List site content
    List {
        /// Type of content to list (blog, services, cases)
        #[arg(default_value = "blog")]
        r#type: String,
    },

    /// Parse all content and report the first malformed document
    Check,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = if cli.debug {
        "uralliance_site=debug,info"
    } else {
        "uralliance_site=info"
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
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    match cli.command {
        Commands::Serve { port, ip } => {
            let site = Site::new(&base_dir)?;
            site.config.print_summary();

            let ip = ip.unwrap_or_else(|| site.config.server.ip.clone());
            let port = port.unwrap_or(site.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            uralliance_site::server::start(&site, &ip, port).await?;
        }

        Commands::Generate => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Generating SEO documents...");
            site.generate()?;
            println!("Generated successfully!");
        }

        Commands::List { r#type } => {
            let site = Site::new(&base_dir)?;
            uralliance_site::commands::list::run(&site, &r#type)?;
        }

        Commands::Check => {
            let site = Site::new(&base_dir)?;
            site.check()?;
        }

        Commands::Version => {
            println!("uralliance-site version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
