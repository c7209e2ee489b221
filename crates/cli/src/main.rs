//! Oakline CLI - database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations (documents + sessions tables)
//! oakline-cli migrate
//!
//! # Seed demo content (pages, products, footer)
//! oakline-cli seed
//!
//! # Seed and push products to the payment provider
//! oakline-cli seed --push
//!
//! # Create an editor account
//! oakline-cli editor create -e editor@example.com -p "a long passphrase"
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "oakline-cli")]
#[command(author, version, about = "Oakline CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed demo content into the document store
    Seed {
        /// Also push seeded products to the payment provider
        #[arg(long)]
        push: bool,
    },
    /// Manage editor accounts
    Editor {
        #[command(subcommand)]
        action: EditorAction,
    },
}

#[derive(Subcommand)]
enum EditorAction {
    /// Create a new editor account
    Create {
        /// Editor email address
        #[arg(short, long)]
        email: String,

        /// Editor password
        #[arg(short, long)]
        password: String,
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
        Commands::Seed { push } => commands::seed::run(push).await?,
        Commands::Editor { action } => match action {
            EditorAction::Create { email, password } => {
                commands::editor::create(&email, &password).await?;
            }
        },
    }
    Ok(())
}
