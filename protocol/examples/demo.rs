//! Offline signing walkthrough.
//!
//! Derives an identity from a mnemonic, prints its DID fields and chain
//! addresses, signs a sample transfer, and verifies the envelope. Nothing
//! touches the network.
//!
//! Run with:
//!   cargo run --example demo

use std::time::Instant;

use serde_json::json;

use cosmos_sign::canonical::canonicalize;
use cosmos_sign::identity::{derive_address, derive_identity};
use cosmos_sign::transaction::{sign, verify_envelope, BroadcastMode};

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

fn section(num: u32, title: &str) {
    println!();
    println!("{BOLD}{num}. {title}{RESET}");
}

fn info(label: &str, value: &str) {
    println!("  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mnemonic = "abandon abandon abandon abandon abandon abandon \
                    abandon abandon abandon abandon abandon about";

    section(1, "Identity");
    let started = Instant::now();
    let did = derive_identity(mnemonic, true)?;
    info("did", &did.to_did_uri());
    info("verifyKey", did.verify_key());
    info("encryptionPublicKey", did.encryption_public_key());
    println!("  {DIM}[derived in {:.2} ms]{RESET}", started.elapsed().as_secs_f64() * 1e3);

    section(2, "Addresses");
    for prefix in ["cosmos", "iaa"] {
        info(prefix, derive_address(&did, prefix)?.as_str());
    }

    section(3, "Sign");
    let sender = derive_address(&did, "cosmos")?;
    let tx = json!({
        "msgs": [{
            "type": "cosmos-sdk/MsgSend",
            "value": {
                "from_address": sender.as_str(),
                "to_address": "cosmos1r5w2f8rssqjsrck8nwrp9n52g029xz643f5ckn",
                "amount": [{"denom": "uatom", "amount": "1000"}]
            }
        }],
        "fee": {"amount": [{"denom": "uatom", "amount": "5000"}], "gas": "200000"},
        "memo": "demo",
        "account_number": "0",
        "sequence": "0"
    });
    info("canonical", canonicalize(&tx).as_str());
    let envelope = sign(&tx, &did, BroadcastMode::Sync)?;
    println!("{}", envelope.to_json_pretty()?);

    section(4, "Verify");
    verify_envelope(&tx, &envelope)?;
    println!("  {GREEN}[OK] signature verifies against the embedded public key{RESET}");

    Ok(())
}
