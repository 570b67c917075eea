//! alloy JSON-ABI params → `MethodInput` descriptors.

use alloy_json_abi::{JsonAbi, Param};
use chainform_core::MethodInput;

use crate::error::CoerceError;

/// Convert an alloy `Param` (and its tuple members) into a `MethodInput`.
pub fn to_method_input(param: &Param) -> MethodInput {
    MethodInput {
        name: param.name.clone(),
        ty: param.ty.clone(),
        internal_type: param.internal_type.as_ref().map(ToString::to_string),
        components: (!param.components.is_empty())
            .then(|| param.components.iter().map(to_method_input).collect()),
    }
}

/// Parse an ABI JSON document and return the inputs of `function`.
///
/// For overloaded functions the first declaration wins.
pub fn function_inputs(abi_json: &str, function: &str) -> Result<Vec<MethodInput>, CoerceError> {
    let abi: JsonAbi = serde_json::from_str(abi_json)?;
    let func = abi
        .function(function)
        .and_then(|overloads| overloads.first())
        .ok_or_else(|| CoerceError::FunctionNotFound {
            name: function.to_string(),
        })?;
    Ok(func.inputs.iter().map(to_method_input).collect())
}
