use std::{fs, path::PathBuf};

use casper_types::{AsymmetricType, Key, PublicKey};
use cep47_client::{args::parse_token_id, Cep47Client, Cep47Error, ClientConfig, Meta, TokenId};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(name = "cep47-client", about = "Interact with a CEP-47 NFT contract")]
struct Opts {
    /// Path to the client TOML config.
    #[clap(long, default_value = "cep47-client.toml")]
    config: PathBuf,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Install the contract from its compiled Wasm. Arguments default to
    /// the config's `[install]` table.
    Install {
        #[clap(long)]
        wasm: PathBuf,
        #[clap(long)]
        name: Option<String>,
        #[clap(long)]
        contract_name: Option<String>,
        #[clap(long)]
        symbol: Option<String>,
        /// Collection metadata as `key=value`, repeatable.
        #[clap(long = "meta", value_parser = parse_meta_entry)]
        meta: Vec<(String, String)>,
    },
    Name,
    Symbol,
    Meta,
    TotalSupply,
    BalanceOf {
        #[clap(long)]
        account: String,
    },
    OwnerOf {
        #[clap(long)]
        token_id: String,
    },
    TokenMeta {
        #[clap(long)]
        token_id: String,
    },
    TokenByIndex {
        #[clap(long)]
        owner: String,
        #[clap(long)]
        index: String,
    },
    IndexByToken {
        #[clap(long)]
        owner: String,
        #[clap(long)]
        token_id: String,
    },
    Allowance {
        #[clap(long)]
        owner: String,
        #[clap(long)]
        token_id: String,
    },
    Approve {
        #[clap(long)]
        spender: String,
        #[clap(long = "token-id", required = true)]
        token_ids: Vec<String>,
    },
    /// Mint tokens; `--meta` entries apply to every minted token.
    Mint {
        #[clap(long)]
        recipient: String,
        #[clap(long = "token-id", required = true)]
        token_ids: Vec<String>,
        #[clap(long = "meta", value_parser = parse_meta_entry)]
        meta: Vec<(String, String)>,
    },
    Burn {
        #[clap(long)]
        owner: String,
        #[clap(long = "token-id", required = true)]
        token_ids: Vec<String>,
    },
    Transfer {
        #[clap(long)]
        recipient: String,
        #[clap(long = "token-id", required = true)]
        token_ids: Vec<String>,
    },
    TransferFrom {
        #[clap(long)]
        owner: String,
        #[clap(long)]
        recipient: String,
        #[clap(long = "token-id", required = true)]
        token_ids: Vec<String>,
    },
    UpdateTokenMeta {
        #[clap(long)]
        token_id: String,
        #[clap(long = "meta", value_parser = parse_meta_entry)]
        meta: Vec<(String, String)>,
    },
}

fn parse_meta_entry(entry: &str) -> Result<(String, String), String> {
    entry
        .split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected `key=value`, got `{entry}`"))
}

fn parse_token_ids(token_ids: &[String]) -> Result<Vec<TokenId>, Cep47Error> {
    token_ids.iter().map(|id| parse_token_id(id)).collect()
}

fn parse_public_key(public_key: &str) -> Result<PublicKey, Cep47Error> {
    PublicKey::from_hex(public_key)
        .map_err(|error| Cep47Error::InvalidKey(format!("{public_key}: {error:?}")))
}

/// Accepts a formatted key (`account-hash-…`, `hash-…`) or a hex public key.
fn parse_key(key: &str) -> Result<Key, Cep47Error> {
    match Key::from_formatted_str(key) {
        Ok(key) => Ok(key),
        Err(_) => {
            parse_public_key(key).map(|public_key| Key::Account(public_key.to_account_hash()))
        }
    }
}

fn print_meta(meta: &Meta) -> Result<(), Cep47Error> {
    println!("{}", serde_json::to_string_pretty(meta)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Cep47Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let config = ClientConfig::load(&opts.config)?;

    let mut client = Cep47Client::new(&config.node_address, &config.chain_name);
    if let Some(contract_hash) = config.contract_hash()? {
        client.set_contract_hash(contract_hash, config.contract_package_hash()?);
    }
    let payment_amount = config.payment_amount();

    match opts.command {
        Command::Install {
            wasm,
            name,
            contract_name,
            symbol,
            meta,
        } => {
            let (secret_key, sender) = config.signer()?;
            let mut args = config.install.clone().unwrap_or_default();
            if let Some(name) = name {
                args.name = name;
            }
            if let Some(contract_name) = contract_name {
                args.contract_name = contract_name;
            }
            if let Some(symbol) = symbol {
                args.symbol = symbol;
            }
            args.meta.extend(meta);
            args.ensure_complete()?;
            let deploy_hash = client
                .install(fs::read(wasm)?, &args, payment_amount, &sender, &[secret_key])
                .await?;
            info!(%deploy_hash, "install deploy sent");
            println!("{deploy_hash}");
        }
        Command::Name => println!("{}", client.name().await?),
        Command::Symbol => println!("{}", client.symbol().await?),
        Command::Meta => print_meta(&client.meta().await?)?,
        Command::TotalSupply => println!("{}", client.total_supply().await?),
        Command::BalanceOf { account } => {
            let account = parse_public_key(&account)?;
            println!("{}", client.balance_of(&account).await?);
        }
        Command::OwnerOf { token_id } => {
            println!("{}", client.get_owner_of(parse_token_id(&token_id)?).await?);
        }
        Command::TokenMeta { token_id } => {
            print_meta(&client.get_token_meta(parse_token_id(&token_id)?).await?)?;
        }
        Command::TokenByIndex { owner, index } => {
            let owner = parse_public_key(&owner)?;
            let index = parse_token_id(&index)?;
            println!("{}", client.get_token_by_index(&owner, index).await?);
        }
        Command::IndexByToken { owner, token_id } => {
            let index = client
                .get_index_by_token(parse_key(&owner)?, parse_token_id(&token_id)?)
                .await?;
            println!("{index}");
        }
        Command::Allowance { owner, token_id } => {
            let spender = client
                .get_allowance(parse_key(&owner)?, parse_token_id(&token_id)?)
                .await?;
            println!("{spender}");
        }
        Command::Approve { spender, token_ids } => {
            let (secret_key, sender) = config.signer()?;
            let deploy_hash = client
                .approve(
                    parse_key(&spender)?,
                    &parse_token_ids(&token_ids)?,
                    payment_amount,
                    &sender,
                    &[secret_key],
                )
                .await?;
            println!("{deploy_hash}");
        }
        Command::Mint {
            recipient,
            token_ids,
            meta,
        } => {
            let (secret_key, sender) = config.signer()?;
            let token_ids = parse_token_ids(&token_ids)?;
            let meta: Meta = meta.into_iter().collect();
            let token_metas = vec![meta; token_ids.len()];
            let deploy_hash = client
                .mint(
                    parse_key(&recipient)?,
                    &token_ids,
                    &token_metas,
                    payment_amount,
                    &sender,
                    &[secret_key],
                )
                .await?;
            println!("{deploy_hash}");
        }
        Command::Burn { owner, token_ids } => {
            let (secret_key, sender) = config.signer()?;
            let deploy_hash = client
                .burn(
                    parse_key(&owner)?,
                    &parse_token_ids(&token_ids)?,
                    payment_amount,
                    &sender,
                    &[secret_key],
                )
                .await?;
            println!("{deploy_hash}");
        }
        Command::Transfer {
            recipient,
            token_ids,
        } => {
            let (secret_key, sender) = config.signer()?;
            let deploy_hash = client
                .transfer(
                    parse_key(&recipient)?,
                    &parse_token_ids(&token_ids)?,
                    payment_amount,
                    &sender,
                    &[secret_key],
                )
                .await?;
            println!("{deploy_hash}");
        }
        Command::TransferFrom {
            owner,
            recipient,
            token_ids,
        } => {
            let (secret_key, sender) = config.signer()?;
            let deploy_hash = client
                .transfer_from(
                    parse_key(&owner)?,
                    parse_key(&recipient)?,
                    &parse_token_ids(&token_ids)?,
                    payment_amount,
                    &sender,
                    &[secret_key],
                )
                .await?;
            println!("{deploy_hash}");
        }
        Command::UpdateTokenMeta { token_id, meta } => {
            let (secret_key, sender) = config.signer()?;
            let meta: Meta = meta.into_iter().collect();
            let deploy_hash = client
                .update_token_meta(
                    parse_token_id(&token_id)?,
                    &meta,
                    payment_amount,
                    &sender,
                    &[secret_key],
                )
                .await?;
            println!("{deploy_hash}");
        }
    }

    Ok(())
}
