//! # CLI Interface
//!
//! Defines the command-line argument structure for `cosmos-sign` using
//! `clap` derive. Subcommands: `address`, `identity`, `sign`, `broadcast`,
//! `account` and `version`.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use cosmos_sign::config::ChainFlavor;
use cosmos_sign::transaction::BroadcastMode;

/// Offline mnemonic signer for Cosmos REST nodes.
///
/// Derives a deterministic identity from a mnemonic, signs transaction
/// JSON into a broadcast-ready envelope, and optionally submits it.
#[derive(Parser, Debug)]
#[command(
    name = "cosmos-sign",
    about = "Offline mnemonic signer for Cosmos REST nodes",
    version,
    propagate_version = true
)]
pub struct CosmosSignCli {
    /// Default log filter when `RUST_LOG` is not set.
    #[arg(long, global = true, env = "COSMOS_SIGN_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format: `pretty` or `json`. Logs always go to stderr.
    #[arg(long, global = true, env = "COSMOS_SIGN_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the bech32 account address for a mnemonic.
    Address(AddressArgs),
    /// Print the DID fields derived from a mnemonic.
    Identity(IdentityArgs),
    /// Sign transaction JSON and print the envelope.
    Sign(SignArgs),
    /// Submit a signed envelope to the node.
    Broadcast(BroadcastArgs),
    /// Fetch an account record from the node.
    Account(AccountArgs),
    /// Print version information and exit.
    Version,
}

/// Where the mnemonic comes from.
#[derive(Args, Debug, Clone)]
pub struct MnemonicArgs {
    /// The mnemonic phrase. Prefer the environment variable or a file so
    /// it stays out of shell history.
    #[arg(
        long,
        env = "COSMOS_SIGN_MNEMONIC",
        hide_env_values = true,
        conflicts_with = "mnemonic_file"
    )]
    pub mnemonic: Option<String>,

    /// Read the mnemonic from a file. One trailing newline is ignored.
    #[arg(long, env = "COSMOS_SIGN_MNEMONIC_FILE")]
    pub mnemonic_file: Option<PathBuf>,

    /// Skip the BIP-39 checksum check.
    #[arg(long)]
    pub no_checksum: bool,
}

/// Route layout override.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlavorArg {
    Irishub,
    Standard,
}

impl From<FlavorArg> for ChainFlavor {
    fn from(arg: FlavorArg) -> Self {
        match arg {
            FlavorArg::Irishub => ChainFlavor::IrisHub,
            FlavorArg::Standard => ChainFlavor::Standard,
        }
    }
}

/// Which chain and node to target.
#[derive(Args, Debug, Clone)]
pub struct ChainArgs {
    /// Base URL of the node's REST endpoint.
    #[arg(long, env = "COSMOS_SIGN_NODE", default_value = "http://127.0.0.1:1317")]
    pub node: String,

    /// Chain id. Ids containing `irishub` select the IRISnet routes.
    #[arg(long, env = "COSMOS_SIGN_CHAIN_ID", default_value = "cosmoshub-4")]
    pub chain_id: String,

    /// bech32 address prefix.
    #[arg(long, env = "COSMOS_SIGN_PREFIX", default_value = "cosmos")]
    pub prefix: String,

    /// `pub_key.type` literal written into each signature.
    #[arg(long, env = "COSMOS_SIGN_PUB_KEY_TYPE")]
    pub pub_key_type: Option<String>,

    /// Override the route layout inferred from the chain id.
    #[arg(long, value_enum)]
    pub flavor: Option<FlavorArg>,

    /// Refuse to sign transactions missing msgs, fee, account_number or
    /// sequence.
    #[arg(long)]
    pub strict: bool,

    /// HTTP request timeout in seconds.
    #[arg(long, env = "COSMOS_SIGN_TIMEOUT", default_value_t = 30)]
    pub timeout_secs: u64,
}

/// Arguments for the `address` subcommand.
#[derive(Parser, Debug)]
pub struct AddressArgs {
    #[command(flatten)]
    pub mnemonic: MnemonicArgs,

    #[command(flatten)]
    pub chain: ChainArgs,
}

/// Arguments for the `identity` subcommand.
#[derive(Parser, Debug)]
pub struct IdentityArgs {
    #[command(flatten)]
    pub mnemonic: MnemonicArgs,

    /// Also print the sign key and seed. They are secrets.
    #[arg(long)]
    pub show_secret: bool,
}

/// Arguments for the `sign` subcommand.
#[derive(Parser, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub mnemonic: MnemonicArgs,

    #[command(flatten)]
    pub chain: ChainArgs,

    /// Transaction JSON file. Reads stdin when omitted or `-`.
    #[arg(long, short = 't')]
    pub tx: Option<PathBuf>,

    /// Broadcast mode recorded in the envelope: block, sync or async.
    #[arg(long, short = 'm', default_value = "sync")]
    pub mode: BroadcastMode,

    /// Submit the envelope after signing.
    #[arg(long)]
    pub broadcast: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for the `broadcast` subcommand.
#[derive(Parser, Debug)]
pub struct BroadcastArgs {
    #[command(flatten)]
    pub chain: ChainArgs,

    /// Signed envelope file, as printed by `sign`. Reads stdin when
    /// omitted or `-`.
    #[arg(long, short = 'e')]
    pub envelope: Option<PathBuf>,
}

/// Arguments for the `account` subcommand.
#[derive(Parser, Debug)]
pub struct AccountArgs {
    #[command(flatten)]
    pub chain: ChainArgs,

    /// bech32 account address to look up.
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        CosmosSignCli::command().debug_assert();
    }

    #[test]
    fn sign_defaults() {
        let cli = CosmosSignCli::try_parse_from([
            "cosmos-sign",
            "sign",
            "--mnemonic",
            "word word",
            "--tx",
            "tx.json",
        ])
        .unwrap();
        let Commands::Sign(args) = cli.command else {
            panic!("expected sign subcommand");
        };
        assert_eq!(args.mode, BroadcastMode::Sync);
        assert_eq!(args.chain.prefix, "cosmos");
        assert_eq!(args.chain.timeout_secs, 30);
        assert!(!args.chain.strict);
        assert!(!args.broadcast);
    }

    #[test]
    fn mode_and_flavor_parse() {
        let cli = CosmosSignCli::try_parse_from([
            "cosmos-sign",
            "sign",
            "--mnemonic",
            "word",
            "--mode",
            "block",
            "--flavor",
            "irishub",
        ])
        .unwrap();
        let Commands::Sign(args) = cli.command else {
            panic!("expected sign subcommand");
        };
        assert_eq!(args.mode, BroadcastMode::Block);
        assert_eq!(args.chain.flavor.map(ChainFlavor::from), Some(ChainFlavor::IrisHub));
    }

    #[test]
    fn rejects_unknown_mode() {
        let result =
            CosmosSignCli::try_parse_from(["cosmos-sign", "sign", "--mnemonic", "w", "--mode", "commit"]);
        assert!(result.is_err());
    }

    #[test]
    fn mnemonic_sources_conflict() {
        let result = CosmosSignCli::try_parse_from([
            "cosmos-sign",
            "address",
            "--mnemonic",
            "w",
            "--mnemonic-file",
            "m.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn account_requires_address() {
        assert!(CosmosSignCli::try_parse_from(["cosmos-sign", "account"]).is_err());
        let cli = CosmosSignCli::try_parse_from(["cosmos-sign", "account", "cosmos1xyz"]).unwrap();
        assert!(matches!(cli.command, Commands::Account(ref a) if a.address == "cosmos1xyz"));
    }
}
