use clap::{Parser, Subcommand};
use tracing::info;

use hearts_ledger::{LedgerClient, LedgerConfig};

#[derive(Parser, Debug)]
#[command(name = "hearts", version, about = "Hearts Vault operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the FLAMES label for two names
    Flames {
        name: String,
        crush: String,
        /// Also print the leftover letter count
        #[arg(long)]
        verbose: bool,
    },
    /// Append a name to the ledger file (needs HEARTS_LEDGER_* settings)
    Ledger { name: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hearts_ledger=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Flames {
            name,
            crush,
            verbose,
        } => {
            let label = hearts_flames::compute(&name, &crush);
            if verbose {
                println!("{} ({} letters left)", label, hearts_flames::leftover(&name, &crush));
            } else {
                println!("{}", label);
            }
        }
        Command::Ledger { name } => {
            let client = LedgerClient::new(LedgerConfig::from_env()?)?;
            let outcome = client.append(&name).await?;
            if outcome.created {
                info!("Created {}", client.config().path);
            }
            println!("Saved ({} names)", outcome.lines);
        }
    }

    Ok(())
}
