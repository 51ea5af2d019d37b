use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::{LedgerService, PurchaseForm, SubmitOutcome};
use crate::config::{
    DATABASE_URL_ENV, DEFAULT_BIND, DEFAULT_PORT, DEFAULT_SQLITE_PATH, PORT_ENV, ServerConfig,
    StoreConfig,
};
use crate::domain::{BalanceSummary, Purchase, PurchaseId, format_amount};
use crate::web;

/// Halves - shared purchase ledger
#[derive(Parser, Debug)]
#[command(name = "halves")]
#[command(about = "Track shared purchases and see who owes what")]
#[command(version)]
pub struct Cli {
    /// PostgreSQL connection string; when absent the SQLite file is used
    #[arg(long, env = DATABASE_URL_ENV, hide_env_values = true, global = true)]
    pub database_url: Option<String>,

    /// SQLite database file path
    #[arg(long, default_value = DEFAULT_SQLITE_PATH, global = true)]
    pub sqlite_path: String,

    /// Port for the web server
    #[arg(short, long, env = PORT_ENV, default_value_t = DEFAULT_PORT, global = true)]
    pub port: u16,

    /// Address for the web server
    #[arg(long, default_value = DEFAULT_BIND, global = true)]
    pub bind: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the web interface
    Serve,

    /// Create the purchases table if it does not exist
    Init,

    /// Record a purchase dated today
    Add {
        /// Amount (e.g., "4.50" or "-20" for a refund)
        #[arg(allow_negative_numbers = true)]
        amount: String,

        /// What was bought
        description: String,

        /// joe, kath or joint (default: joint)
        #[arg(short, long)]
        who: Option<String>,
    },

    /// List all purchases, newest first
    List,

    /// Show who owes what
    Balance,

    /// Delete one purchase
    Delete {
        /// Purchase ID
        id: PurchaseId,
    },

    /// Delete every purchase
    Clear,
}

impl Cli {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::resolve(self.database_url.as_deref(), &self.sqlite_path)
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind: self.bind.clone(),
            port: self.port,
        }
    }

    pub async fn run(self) -> Result<()> {
        let store_config = self.store_config();
        tracing::debug!(store = %store_config, "opening store");

        // A store that cannot be initialized is fatal for every command.
        let service = LedgerService::init(&store_config)
            .await
            .with_context(|| format!("Failed to open store: {store_config}"))?;

        match self.command.clone().unwrap_or(Commands::Serve) {
            Commands::Serve => {
                web::serve(service, &self.server_config()).await?;
            }

            Commands::Init => {
                println!("Store initialized: {}", store_config);
            }

            Commands::Add {
                amount,
                description,
                who,
            } => {
                let form = PurchaseForm::new(&description, &amount, who.as_deref());
                match service.submit(&form).await? {
                    SubmitOutcome::Recorded(purchase) => println!(
                        "Recorded purchase #{}: {} {} ({})",
                        purchase.id,
                        format_amount(purchase.amount),
                        purchase.description,
                        purchase.who
                    ),
                    SubmitOutcome::Rejected(rejection) => {
                        anyhow::bail!("Purchase not recorded: {rejection}")
                    }
                }
            }

            Commands::List => {
                let purchases = service.list_purchases().await?;
                print_purchases(&purchases);
            }

            Commands::Balance => {
                let balance = service.balance().await?;
                print_balance(&balance);
            }

            Commands::Delete { id } => {
                service.delete_purchase(id).await?;
                println!("Deleted purchase #{}", id);
            }

            Commands::Clear => {
                service.clear().await?;
                println!("All purchases deleted");
            }
        }

        Ok(())
    }
}

fn print_purchases(purchases: &[Purchase]) {
    if purchases.is_empty() {
        println!("No purchases found.");
        return;
    }

    println!(
        "{:<6} {:<10} {:<30} {:>12} {:<8}",
        "ID", "DATE", "DESCRIPTION", "AMOUNT", "WHO"
    );
    println!("{}", "-".repeat(70));
    for purchase in purchases {
        println!(
            "{:<6} {:<10} {:<30} {:>12} {:<8}",
            purchase.id,
            purchase.date_string(),
            truncate(&purchase.description, 30),
            format_amount(purchase.amount),
            purchase.who
        );
    }
}

fn print_balance(balance: &BalanceSummary) {
    println!("Joe (own):   {:>12}", format_amount(balance.joe_independent));
    println!("Kath (own):  {:>12}", format_amount(balance.kath_independent));
    println!("Joint total: {:>12}", format_amount(balance.joint_total));
    println!("{}", "-".repeat(25));
    println!("Joe owes:    {:>12}", format_amount(balance.joe_owes));
    println!("Kath owes:   {:>12}", format_amount(balance.kath_owes));
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars - 3).collect();
        format!("{kept}...")
    }
}
