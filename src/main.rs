//! Command-line front end for the chain client.
//!
//! The private key is read from `CHAIN_CLIENT_PRIVATE_KEY`. Token arguments
//! accept either a contract address or `<chain>/<ticker>` from the token
//! table, e.g. `base/USDC`.

use alloy::primitives::{Address, TxHash};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use chain_client::blockchain::wallet::{Wallet, PRIVATE_KEY_ENV_VAR};
use chain_client::blockchain::ConfirmationStatus;
use chain_client::config::validation::validate_client;
use chain_client::config::{load_config, Config, ConfigError};
use chain_client::observability::init_logging;
use chain_client::{ChainClient, TokenRegistry};

#[derive(Parser)]
#[command(name = "chain-client")]
#[command(about = "Send native and ERC-20 transactions over JSON-RPC", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RPC endpoint, overrides the config file.
    #[arg(short, long)]
    rpc_url: Option<String>,

    /// HTTP proxy as host:port or URL, overrides the config file.
    #[arg(short, long)]
    proxy: Option<String>,

    /// Refuse to run against any other chain.
    #[arg(long)]
    chain_id: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the address derived from the private key
    Address,
    /// List the token table
    Tokens {
        #[arg(long)]
        chain: Option<String>,
    },
    #[command(flatten)]
    Chain(ChainCommand),
}

/// Commands that need a live RPC connection.
#[derive(Subcommand)]
enum ChainCommand {
    /// Pending transaction count
    Nonce {
        #[arg(long)]
        address: Option<Address>,
    },
    /// Native balance in whole units
    Balance {
        #[arg(long)]
        address: Option<Address>,
    },
    /// Token decimals
    Decimals {
        #[arg(long)]
        token: String,
    },
    /// Allowance granted by this account to a spender
    Allowance {
        #[arg(long)]
        token: String,
        #[arg(long)]
        spender: Address,
    },
    /// Token balance in whole units
    TokenBalance {
        #[arg(long)]
        token: String,
        #[arg(long)]
        address: Option<Address>,
    },
    /// Approve a spender
    Approve {
        #[arg(long)]
        token: String,
        #[arg(long)]
        spender: Address,
        #[arg(long)]
        amount: f64,
        /// Seconds to wait for the receipt
        #[arg(long)]
        wait: Option<u64>,
    },
    /// Transfer tokens
    Transfer {
        #[arg(long)]
        token: String,
        #[arg(long)]
        to: Address,
        #[arg(long)]
        amount: f64,
        /// Seconds to wait for the receipt
        #[arg(long)]
        wait: Option<u64>,
    },
    /// Send the native currency
    Send {
        #[arg(long)]
        to: Address,
        #[arg(long)]
        amount: f64,
        /// Seconds to wait for the receipt
        #[arg(long)]
        wait: Option<u64>,
    },
    /// Show the receipt status of a transaction
    Receipt {
        #[arg(long)]
        hash: TxHash,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    apply_overrides(&mut config, &cli)?;

    init_logging(&config.observability);

    let mut registry = TokenRegistry::builtin();
    registry.extend(config.tokens.clone());

    match cli.command {
        Commands::Address => println!("{}", Wallet::from_env()?.address()),
        Commands::Tokens { chain } => print_tokens(&registry, chain.as_deref()),
        Commands::Chain(command) => {
            let private_key = std::env::var(PRIVATE_KEY_ENV_VAR)
                .map_err(|_| format!("Environment variable {} not set", PRIVATE_KEY_ENV_VAR))?;
            let client = ChainClient::connect(config.client, &private_key).await?;
            run(&client, &registry, command).await?;
        }
    }

    Ok(())
}

/// Apply command-line overrides, then re-check the client section.
fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<(), ConfigError> {
    if let Some(url) = &cli.rpc_url {
        config.client.rpc_url = url.clone();
    }
    if let Some(proxy) = &cli.proxy {
        config.client.proxy = Some(proxy.clone());
    }
    if let Some(chain_id) = cli.chain_id {
        config.client.expected_chain_id = Some(chain_id);
    }

    let errors = validate_client(&config.client);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors))
    }
}

async fn run(
    client: &ChainClient,
    registry: &TokenRegistry,
    command: ChainCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        ChainCommand::Nonce { address } => {
            println!("{}", client.get_nonce(address).await?);
        }
        ChainCommand::Balance { address } => {
            println!("{}", client.get_native_balance(address).await?);
        }
        ChainCommand::Decimals { token } => {
            let token = resolve_token(registry, &token)?;
            println!("{}", client.get_decimals(token).await?);
        }
        ChainCommand::Allowance { token, spender } => {
            let token = resolve_token(registry, &token)?;
            println!("{}", client.get_allowance(token, spender).await?);
        }
        ChainCommand::TokenBalance { token, address } => {
            let token = resolve_token(registry, &token)?;
            println!("{}", client.get_token_balance(token, address).await?);
        }
        ChainCommand::Approve { token, spender, amount, wait } => {
            let token = resolve_token(registry, &token)?;
            let tx_hash = client.approve(token, spender, amount).await?;
            report(client, tx_hash, wait).await?;
        }
        ChainCommand::Transfer { token, to, amount, wait } => {
            let token = resolve_token(registry, &token)?;
            let tx_hash = client.transfer_token(token, to, amount).await?;
            report(client, tx_hash, wait).await?;
        }
        ChainCommand::Send { to, amount, wait } => {
            let tx_hash = client.send_native(to, amount).await?;
            report(client, tx_hash, wait).await?;
        }
        ChainCommand::Receipt { hash } => {
            print_status(&client.get_transaction_status(hash).await?);
        }
    }
    Ok(())
}

/// Accept a raw address or a `<chain>/<ticker>` table reference.
fn resolve_token(registry: &TokenRegistry, token: &str) -> Result<Address, String> {
    if let Some((chain, ticker)) = token.split_once('/') {
        return registry
            .find(chain, ticker)
            .map(|t| t.address)
            .ok_or_else(|| format!("Unknown token {} on {}", ticker, chain));
    }
    token
        .parse()
        .map_err(|e| format!("Invalid token address '{}': {}", token, e))
}

async fn report(
    client: &ChainClient,
    tx_hash: TxHash,
    wait: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", tx_hash);
    if let Some(secs) = wait {
        print_status(&client.wait_for_receipt(tx_hash, secs).await?);
    }
    Ok(())
}

fn print_status(status: &ConfirmationStatus) {
    match status {
        ConfirmationStatus::Pending => println!("pending"),
        ConfirmationStatus::Confirmed { block_number } => {
            println!("confirmed in block {}", block_number)
        }
        ConfirmationStatus::Failed(reason) => println!("failed: {}", reason),
    }
}

fn print_tokens(registry: &TokenRegistry, chain: Option<&str>) {
    let chains: Vec<&str> = match chain {
        Some(chain) => vec![chain],
        None => registry.chains(),
    };
    for chain in chains {
        for token in registry.for_chain(chain) {
            println!(
                "{:<10} {:<8} {} ({} decimals)",
                token.chain, token.ticker, token.address, token.decimals
            );
        }
    }
}
