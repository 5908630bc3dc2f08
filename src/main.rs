//! CLI entry point for personal-site

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use personal_site::config::RuntimeConfig;
use personal_site::Site;

#[derive(Parser)]
#[command(name = "personal-site")]
#[command(version)]
#[command(about = "Personal website with a Markdown blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Post directory (defaults to content/posts under the base directory)
    #[arg(long, global = true)]
    posts: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    #[command(alias = "s")]
    Serve {
        /// IP address to bind to (overrides ADDR)
        #[arg(short, long)]
        ip: Option<String>,

        /// Port to listen on (overrides ADDR and PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Serve draft and future-dated posts
        #[arg(long)]
        drafts: bool,

        /// Do not reload posts when files change
        #[arg(long)]
        no_watch: bool,
    },

    /// List posts or tags
    List {
        /// Type of content to list (post, tag)
        #[arg(default_value = "post")]
        r#type: String,

        /// Include draft and future-dated posts
        #[arg(long)]
        drafts: bool,
    },

    /// Load every post and report problems
    Check,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let runtime = RuntimeConfig::from_env();

    // Initialize logging
    let filter = if cli.debug {
        "personal_site=debug,info"
    } else {
        "personal_site=info"
    };
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    if runtime.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("reading current directory")?,
    };
    let mut site = Site::new(&base_dir)?;
    if let Some(posts) = &cli.posts {
        site = site.with_posts_dir(posts);
    }

    match cli.command {
        Commands::Serve {
            ip,
            port,
            drafts,
            no_watch,
        } => {
            let mut addr = runtime.bind_addr().with_context(|| {
                format!("invalid listen address {:?}", runtime.addr)
            })?;
            if let Some(ip) = ip {
                let ip = if ip == "localhost" { "127.0.0.1".to_string() } else { ip };
                addr.set_ip(ip.parse().with_context(|| format!("invalid IP {:?}", ip))?);
            }
            if let Some(port) = port {
                addr.set_port(port);
            }

            let show_drafts = drafts || runtime.show_drafts;
            tracing::info!(
                env = ?runtime.env,
                base_url = %runtime.base_url,
                show_drafts,
                "Starting server"
            );
            personal_site::server::start(&site, addr, show_drafts, !no_watch).await?;
        }

        Commands::List { r#type, drafts } => {
            personal_site::commands::list::run(&site, &r#type, drafts || runtime.show_drafts)?;
        }

        Commands::Check => {
            let count = personal_site::commands::check::run(&site)?;
            println!("Checked {} posts in {:?}", count, site.posts_dir);
        }

        Commands::Version => {
            println!("personal-site version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
