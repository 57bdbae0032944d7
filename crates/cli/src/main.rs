//! Hostfront CLI - page templates, page configuration and page lookups.
//!
//! # Usage
//!
//! ```bash
//! # Print the default template for a role
//! hf-cli template cart
//!
//! # Show which slug a role resolves to
//! hf-cli resolve --role homepage
//! hf-cli resolve --role cart --slug promo-2024
//!
//! # Inspect or change the admin's role bindings
//! hf-cli config show
//! hf-cli config set homepage spring-launch
//! hf-cli config unset homepage
//!
//! # Ask the page API about a slug
//! hf-cli fetch about
//! ```
//!
//! # Environment Variables
//!
//! - `PAGE_CONFIG_PATH` - Page configuration document (overridden by `--config`)
//! - `PAGES_API_URL` - Page API base URL, for `fetch`
//! - `PAGES_API_TOKEN` - Service bearer token, for `fetch`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "hf-cli")]
#[command(author, version, about = "Hostfront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the default template for a role as JSON
    Template {
        /// Page role (homepage, shop, cart, checkout, `order_success`, ...)
        role: String,
    },
    /// Show the slug a request would fetch
    Resolve {
        /// Page role
        #[arg(short, long)]
        role: Option<String>,

        /// Explicit slug, overriding configuration
        #[arg(short, long)]
        slug: Option<String>,

        /// Page configuration document
        #[arg(
            long,
            env = "PAGE_CONFIG_PATH",
            default_value = "data/default_page_config.json"
        )]
        config: PathBuf,
    },
    /// Manage role bindings
    Config {
        #[command(subcommand)]
        action: ConfigAction,

        /// Page configuration document
        #[arg(
            long,
            global = true,
            env = "PAGE_CONFIG_PATH",
            default_value = "data/default_page_config.json"
        )]
        config: PathBuf,
    },
    /// Fetch a page from the page API and report the outcome
    Fetch {
        /// Page slug
        slug: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current bindings
    Show,
    /// Bind a role to a slug
    Set {
        /// Page role
        role: String,
        /// Page slug
        slug: String,
    },
    /// Remove a role's binding
    Unset {
        /// Page role
        role: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Template { role } => commands::pages::template(&role)?,
        Commands::Resolve { role, slug, config } => {
            commands::pages::resolve(role.as_deref(), slug.as_deref(), &config)?;
        }
        Commands::Config { action, config } => match action {
            ConfigAction::Show => commands::config::show(&config)?,
            ConfigAction::Set { role, slug } => commands::config::set(&config, &role, &slug)?,
            ConfigAction::Unset { role } => commands::config::unset(&config, &role)?,
        },
        Commands::Fetch { slug } => commands::pages::fetch(&slug).await?,
    }
    Ok(())
}
