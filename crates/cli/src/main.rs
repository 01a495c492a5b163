//! Drippss CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! drippss-cli migrate
//!
//! # Seed a demo catalog
//! drippss-cli seed
//!
//! # Create a staff account
//! drippss-cli account create -e admin@drippss.com -p <password> -n "Admin" -r admin
//!
//! # Grant a role to an existing account
//! drippss-cli account grant -e someone@example.com -r manager
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use drippss_core::AppRole;

mod commands;

#[derive(Parser)]
#[command(name = "drippss-cli")]
#[command(author, version, about = "Drippss CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with a demo catalog
    Seed,
    /// Manage accounts and roles
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Create a new account
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Display name
        #[arg(short, long, default_value = "")]
        name: String,

        /// Role to grant (`admin`, `manager`, `customer`)
        #[arg(short, long, default_value = "customer")]
        role: AppRole,
    },
    /// Grant a role to an existing account
    Grant {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Role to grant (`admin`, `manager`, `customer`)
        #[arg(short, long)]
        role: AppRole,
    },
}

#[tokio::main]
async fn main() {
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Account { action } => match action {
            AccountAction::Create {
                email,
                password,
                name,
                role,
            } => commands::account::create(&email, &password, &name, role).await?,
            AccountAction::Grant { email, role } => {
                commands::account::grant(&email, role).await?;
            }
        },
    }
    Ok(())
}
