use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use invlog_gateway::{ContractGateway, HttpContractRpc, NetworkConfig};
use invlog_pipeline::SubmissionPipeline;
use invlog_types::{amount, IssueRequest, ReturnRequest};
use invlog_wallet::{AgentWallet, SessionManager};

#[derive(Parser)]
#[command(version = "0.1.0", about = "Inventory rental client", long_about = None)]
struct Cli {
    /// Signing agent endpoint
    #[arg(long, default_value = "http://localhost:7070")]
    agent_url: String,

    /// Contract RPC endpoint (defaults to the public testnet endpoint)
    #[arg(long)]
    rpc_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect the wallet and show the session status
    Connect,

    /// Look up an item
    GetItem {
        item_id: u64,
    },

    /// Look up a rental
    GetRental {
        rental_id: u64,
    },

    /// Rent an item
    Issue {
        /// Renter address (StrKey)
        renter: String,
        item_id: u64,
        rental_days: u64,
        /// Deposit amount (i128 as a string)
        deposit_amount: String,
    },

    /// Return a rental
    Return {
        rental_id: u64,
        /// Returner address (StrKey)
        returner: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = NetworkConfig::testnet();
    if let Some(rpc_url) = cli.rpc_url {
        config.rpc_url = rpc_url;
    }
    config.validate()?;

    let session = Arc::new(SessionManager::new(
        Arc::new(AgentWallet::new(cli.agent_url)),
        config.expected_network(),
    ));
    let gateway = Arc::new(ContractGateway::new(Arc::new(HttpContractRpc::new(&config))));

    match cli.command {
        Commands::Connect => {
            session.connect().await?;
            println!("{}", session.session().await.status_line());
        }
        Commands::GetItem { item_id } => match gateway.get_item(item_id).await? {
            Some(item) => println!("{}", serde_json::to_string_pretty(&item)?),
            None => println!("item {item_id} not found"),
        },
        Commands::GetRental { rental_id } => match gateway.get_rental(rental_id).await? {
            Some(rental) => println!("{}", serde_json::to_string_pretty(&rental)?),
            None => println!("rental {rental_id} not found"),
        },
        Commands::Issue {
            renter,
            item_id,
            rental_days,
            deposit_amount,
        } => {
            session.connect().await?;
            let pipeline = SubmissionPipeline::new(session, gateway);
            let confirmed = pipeline
                .issue_item(&IssueRequest {
                    renter,
                    item_id,
                    rental_days,
                    deposit_amount: amount::parse_amount(&deposit_amount)?,
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&confirmed)?);
        }
        Commands::Return { rental_id, returner } => {
            session.connect().await?;
            let pipeline = SubmissionPipeline::new(session, gateway);
            let confirmed = pipeline
                .return_item(&ReturnRequest { rental_id, returner })
                .await?;
            println!("{}", serde_json::to_string_pretty(&confirmed)?);
        }
    }

    Ok(())
}
