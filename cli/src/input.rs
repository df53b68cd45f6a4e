//! Reading mnemonics and JSON documents from flags, files or stdin.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use zeroize::Zeroizing;

use crate::cli::MnemonicArgs;

/// Resolve the mnemonic from `--mnemonic` / `COSMOS_SIGN_MNEMONIC` or
/// `--mnemonic-file`.
///
/// The phrase is hashed byte-for-byte, so only a single trailing line
/// ending from a file is removed. Interior whitespace is left alone.
pub fn read_mnemonic(args: &MnemonicArgs) -> Result<Zeroizing<String>> {
    if let Some(mnemonic) = &args.mnemonic {
        return Ok(Zeroizing::new(mnemonic.clone()));
    }
    let Some(path) = &args.mnemonic_file else {
        bail!("no mnemonic given: use --mnemonic, --mnemonic-file or COSMOS_SIGN_MNEMONIC");
    };
    let contents = Zeroizing::new(
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read mnemonic file {}", path.display()))?,
    );
    Ok(Zeroizing::new(strip_line_ending(&contents).to_string()))
}

fn strip_line_ending(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}

/// Read a JSON document from `path`, or from stdin when `path` is `None`
/// or `-`.
pub fn read_json(path: Option<&Path>) -> Result<Value> {
    let text = match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read {}", p.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    serde_json::from_str(&text).context("input is not valid JSON")
}
