// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # cosmos-sign
//!
//! Entry point for the `cosmos-sign` binary. Parses CLI arguments,
//! initializes logging, and dispatches to a subcommand:
//!
//! - `address`   print the bech32 address for a mnemonic
//! - `identity`  print the DID fields for a mnemonic
//! - `sign`      sign transaction JSON into an envelope
//! - `broadcast` submit a signed envelope
//! - `account`   fetch an account record
//! - `version`   print build version information
//!
//! Results go to stdout as JSON; logs go to stderr.

mod cli;
mod input;
mod logging;

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::{json, Value};

use cosmos_sign::config::{ClientConfig, ValidationMode, SIGNING_ALGORITHM};
use cosmos_sign::identity::Did;
use cosmos_sign::network::NodeResponse;
use cosmos_sign::transaction::SignedEnvelope;
use cosmos_sign::Cosmos;

use cli::{ChainArgs, Commands, CosmosSignCli, MnemonicArgs};
use logging::LogFormat;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CosmosSignCli::parse();
    logging::init_logging(&cli.log_level, LogFormat::from_str_lossy(&cli.log_format));

    match cli.command {
        Commands::Address(args) => show_address(args),
        Commands::Identity(args) => show_identity(args),
        Commands::Sign(args) => sign_tx(args).await,
        Commands::Broadcast(args) => broadcast(args).await,
        Commands::Account(args) => query_account(args).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Builds the client for the chain selected on the command line.
fn build_client(chain: &ChainArgs) -> Result<Cosmos> {
    let mut builder = ClientConfig::builder(chain.node.as_str(), chain.chain_id.as_str())
        .bech32_prefix(chain.prefix.as_str())
        .request_timeout(Duration::from_secs(chain.timeout_secs))
        .validation(if chain.strict {
            ValidationMode::Strict
        } else {
            ValidationMode::Lenient
        });
    if let Some(key_type) = &chain.pub_key_type {
        builder = builder.pub_key_type(key_type.as_str());
    }
    if let Some(flavor) = chain.flavor {
        builder = builder.chain_flavor(flavor.into());
    }

    let config = builder.build().context("invalid chain configuration")?;
    Cosmos::new(config).context("failed to create client")
}

fn derive(cosmos: Option<&Cosmos>, args: &MnemonicArgs) -> Result<Did> {
    let mnemonic = input::read_mnemonic(args)?;
    let checksum = !args.no_checksum;
    let did = match cosmos {
        Some(c) => c.identity(&mnemonic, checksum),
        None => cosmos_sign::identity::derive_identity(&mnemonic, checksum),
    };
    did.context("failed to derive identity from mnemonic")
}

fn print_json(value: &impl serde::Serialize, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}

/// Prints the node's body, failing the command on a non-2xx status.
fn report(response: NodeResponse) -> Result<()> {
    print_json(&response.body, true)?;
    if !response.is_success() {
        bail!("node answered HTTP {}", response.status);
    }
    Ok(())
}

fn show_address(args: cli::AddressArgs) -> Result<()> {
    let cosmos = build_client(&args.chain)?;
    let did = derive(Some(&cosmos), &args.mnemonic)?;
    let address = cosmos.address_of(&did)?;
    tracing::info!(did = %did.did(), prefix = %args.chain.prefix, "address derived");
    println!("{}", address);
    Ok(())
}

fn show_identity(args: cli::IdentityArgs) -> Result<()> {
    let did = derive(None, &args.mnemonic)?;
    let mut output = serde_json::to_value(did.to_public())?;
    output["pubKey"] = json!(did.public_key_base64());

    if args.show_secret {
        tracing::warn!("printing secret key material to stdout");
        output["signKey"] = json!(did.sign_key_base58().as_str());
        output["encryptionPrivateKey"] = json!(did.encryption_private_key_base58().as_str());
        output["seed"] = json!(did.seed_hex().as_str());
    }

    print_json(&output, true)
}

async fn sign_tx(args: cli::SignArgs) -> Result<()> {
    let cosmos = build_client(&args.chain)?;
    let did = derive(Some(&cosmos), &args.mnemonic)?;
    let tx = input::read_json(args.tx.as_deref())?;

    let msg = cosmos.new_std_msg(tx);
    let envelope = cosmos
        .sign(&msg, &did, args.mode)
        .context("failed to sign transaction")?;
    tracing::info!(did = %did.did(), mode = %args.mode, "transaction signed");

    if args.broadcast {
        let response = cosmos.broadcast(&envelope).await?;
        report(response)
    } else {
        print_json(&envelope, args.pretty)
    }
}

async fn broadcast(args: cli::BroadcastArgs) -> Result<()> {
    let cosmos = build_client(&args.chain)?;
    let document = input::read_json(args.envelope.as_deref())?;
    let envelope: SignedEnvelope =
        serde_json::from_value(document).context("input is not a signed envelope")?;
    if envelope.tx.signatures.is_empty() {
        bail!("envelope carries no signature");
    }

    let response = cosmos.broadcast(&envelope).await?;
    report(response)
}

async fn query_account(args: cli::AccountArgs) -> Result<()> {
    let cosmos = build_client(&args.chain)?;
    let response = cosmos.accounts(&args.address).await?;
    report(response)
}

/// Prints version information to stdout.
fn print_version() {
    let info: Value = json!({
        "cosmos-sign": env!("CARGO_PKG_VERSION"),
        "algorithm": SIGNING_ALGORITHM,
        "rustc": rustc_version(),
    });
    println!("{}", info);
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
