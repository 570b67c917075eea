//! # form_to_calldata
//!
//! Rebuilds method arguments from flat form state, coerces them against the
//! contract ABI and prints the resulting calldata.
//!
//! Input is a JSON file shaped like the golden fixtures
//! (`{"abi": [...], "function": "...", "form": {...}}`); without an argument
//! a built-in ERC-20 `transfer` form is used.
//!
//! Run with:
//! ```sh
//! cargo run --bin form_to_calldata -- fixtures/forms/tuple-array-orders.json
//! ```

use anyhow::{Context, Result};
use chainform_core::{transform_form_data_to_method_args, FormFields};
use chainform_evm::ArgCoercer;
use chainform_observability::{init_tracing, LogConfig};
use serde_json::Value;

const DEFAULT_INPUT: &str = r#"{
    "abi": [
        {
            "name": "transfer",
            "type": "function",
            "inputs": [
                {"name": "to",     "type": "address"},
                {"name": "amount", "type": "uint256"}
            ],
            "outputs": [{"name": "", "type": "bool"}],
            "stateMutability": "nonpayable"
        }
    ],
    "function": "transfer",
    "form": {
        "0": "0xd8da6bf26964af9d7eed9e03e53415d37aa96045",
        "1": "1000000",
        "value": null
    }
}"#;

fn main() -> Result<()> {
    init_tracing(&LogConfig {
        level: "debug".into(),
        ..LogConfig::default()
    });

    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => DEFAULT_INPUT.to_string(),
    };
    let doc: Value = serde_json::from_str(&input).context("input is not JSON")?;
    let function = doc["function"].as_str().context("missing \"function\"")?;

    // Re-read the form from the raw text so field order survives.
    let form: FormFields = {
        #[derive(serde::Deserialize)]
        struct FormOnly {
            form: FormFields,
        }
        let only: FormOnly = serde_json::from_str(&input).context("missing \"form\"")?;
        only.form
    };

    tracing::info!(function, fields = form.len(), "loaded form");

    let coercer = ArgCoercer::from_abi_json(&doc["abi"].to_string())?;
    let args = transform_form_data_to_method_args(&form)?;

    println!("ChainForm — form → calldata");
    println!("═══════════════════════════════════════════════════════");
    println!("function : {function}");
    println!("fields   : {}", form.len());
    println!("args     : {}", args.root());

    let calldata = coercer.encode_call(function, args)?;
    println!("calldata : 0x{}", hex::encode(&calldata));
    println!("length   : {} bytes", calldata.len());
    Ok(())
}
