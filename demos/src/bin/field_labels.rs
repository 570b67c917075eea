//! # field_labels
//!
//! Prints the form layout a UI would render for every function of an ABI:
//! one labelled field per input, array inputs expanded into numbered rows,
//! and the range hint for integer inputs.
//!
//! Run with:
//! ```sh
//! cargo run --bin field_labels -- path/to/abi.json
//! ```

use alloy_json_abi::JsonAbi;
use anyhow::{Context, Result};
use chainform_core::{
    field_label, match_array, match_int, transform_for_array_item, ArraySize, MethodInput,
};
use chainform_evm::ArgCoercer;
use chainform_observability::{init_tracing, LogConfig};

const DEFAULT_ABI: &str = r#"[
    {
        "name": "fill",
        "type": "function",
        "inputs": [
            {
                "name": "orders",
                "type": "tuple[2]",
                "internalType": "struct Market.Order[2]",
                "components": [
                    {"name": "maker", "type": "address", "internalType": "address"},
                    {"name": "amount", "type": "uint96", "internalType": "uint96"}
                ]
            },
            {"name": "", "type": "int8", "internalType": "int8"}
        ],
        "outputs": [],
        "stateMutability": "nonpayable"
    }
]"#;

fn main() -> Result<()> {
    init_tracing(&LogConfig::default());

    let abi = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => DEFAULT_ABI.to_string(),
    };
    let abi: JsonAbi = serde_json::from_str(&abi)?;
    let coercer = ArgCoercer::new(abi.clone());

    for func in abi.functions() {
        println!("{}", func.signature());
        for (i, input) in coercer.method_inputs(&func.name)?.iter().enumerate() {
            print_input(input, &i.to_string(), 1);
        }
        println!();
    }
    Ok(())
}

fn print_input(input: &MethodInput, path: &str, depth: usize) {
    let indent = "  ".repeat(depth);
    let mut line = format!("{indent}[{path}] {}", field_label(input, true));
    if let Some(m) = match_int(&input.ty) {
        line.push_str(&format!("  range [{}, {}]", m.min, m.max));
    }
    println!("{line}");

    if let Some(array) = match_array(&input.ty) {
        // Fixed arrays get one row per element; dynamic arrays show one example row.
        let rows = match array.size {
            ArraySize::Fixed(n) => n,
            ArraySize::Dynamic => 1,
        };
        for row in 0..rows {
            let item = transform_for_array_item(input, row);
            print_input(&item, &format!("{path}:{row}"), depth + 1);
        }
    } else if let Some(components) = &input.components {
        for (i, member) in components.iter().enumerate() {
            print_input(member, &format!("{path}:{i}"), depth + 1);
        }
    }
}
