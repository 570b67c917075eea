//! Rebuilt form arguments → alloy `DynSolValue`s.
//!
//! Compound types (arrays, tuples) are built node by node from the argument
//! tree; scalar leaves are handed to `DynSolType::coerce_str`.
//!
//! # Usage
//! ```ignore
//! let coercer = ArgCoercer::from_abi_json(ERC20_ABI)?;
//! let args = transform_form_data_to_method_args(&form)?;
//! let calldata = coercer.encode_call("transfer", args)?;
//! ```

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use alloy_dyn_abi::Specifier;
use alloy_json_abi::{Function, JsonAbi, Param};
use chainform_core::{int_boundaries, ArgValue, MethodArgs, MethodInput, DEFAULT_SEPARATOR};
use num_bigint::BigInt;
use tracing::{debug, trace};

use crate::error::CoerceError;
use crate::input::to_method_input;

/// Coerces form arguments against the functions of one contract ABI.
pub struct ArgCoercer {
    abi: JsonAbi,
}

impl ArgCoercer {
    pub fn new(abi: JsonAbi) -> Self {
        Self { abi }
    }

    /// Create a coercer from a standard Ethereum ABI JSON string.
    pub fn from_abi_json(abi_json: &str) -> Result<Self, CoerceError> {
        Ok(Self::new(serde_json::from_str(abi_json)?))
    }

    /// Find a function by name. With `arity`, an overload taking that many
    /// inputs is preferred.
    pub fn function(&self, name: &str, arity: Option<usize>) -> Result<&Function, CoerceError> {
        let overloads = self
            .abi
            .function(name)
            .filter(|fs| !fs.is_empty())
            .ok_or_else(|| CoerceError::FunctionNotFound { name: name.to_string() })?;

        let by_arity = arity.and_then(|n| overloads.iter().find(|f| f.inputs.len() == n));
        Ok(by_arity.unwrap_or(&overloads[0]))
    }

    /// Input descriptors for building the form of `name`.
    pub fn method_inputs(&self, name: &str) -> Result<Vec<MethodInput>, CoerceError> {
        let func = self.function(name, None)?;
        Ok(func.inputs.iter().map(to_method_input).collect())
    }

    /// Coerce rebuilt form arguments into values for `name`.
    pub fn coerce(&self, name: &str, args: MethodArgs) -> Result<Vec<DynSolValue>, CoerceError> {
        let separator = args.separator();
        let args = args.into_positional()?;
        let func = self.function(name, Some(args.len()))?;
        coerce_params_with(&func.inputs, &args, separator)
    }

    /// Coerce and ABI-encode a call: `selector ++ encoded params`.
    pub fn encode_call(&self, name: &str, args: MethodArgs) -> Result<Vec<u8>, CoerceError> {
        let separator = args.separator();
        let args = args.into_positional()?;
        let func = self.function(name, Some(args.len()))?;
        let values = coerce_params_with(&func.inputs, &args, separator)?;

        let mut calldata = func.selector().to_vec();
        calldata.extend_from_slice(&DynSolValue::Tuple(values).abi_encode_params());
        debug!(function = %func.signature(), bytes = calldata.len(), "encoded call");
        Ok(calldata)
    }
}

/// Coerce positional arguments against a parameter list. Error paths use
/// the default `:` key syntax.
pub fn coerce_params(params: &[Param], args: &[ArgValue]) -> Result<Vec<DynSolValue>, CoerceError> {
    coerce_params_with(params, args, DEFAULT_SEPARATOR)
}

/// [`coerce_params`] with error paths joined by `separator`.
pub fn coerce_params_with(
    params: &[Param],
    args: &[ArgValue],
    separator: char,
) -> Result<Vec<DynSolValue>, CoerceError> {
    if params.len() != args.len() {
        return Err(CoerceError::ArgumentCount {
            expected: params.len(),
            got: args.len(),
        });
    }

    params
        .iter()
        .zip(args)
        .enumerate()
        .map(|(i, (param, arg))| {
            let path = i.to_string();
            let ty = param.resolve().map_err(|e| CoerceError::TypeResolve {
                path: path.clone(),
                ty: param.ty.clone(),
                reason: e.to_string(),
            })?;
            coerce_value(&ty, &param.components, arg, &path, separator)
        })
        .collect()
}

fn coerce_value(
    ty: &DynSolType,
    components: &[Param],
    value: &ArgValue,
    path: &str,
    separator: char,
) -> Result<DynSolValue, CoerceError> {
    trace!(path, ty = %ty, "coercing argument");
    match (ty, value) {
        (DynSolType::Array(inner), ArgValue::List(items)) => {
            let values = coerce_items(inner, components, items, path, separator)?;
            Ok(DynSolValue::Array(values))
        }
        (DynSolType::FixedArray(inner, len), ArgValue::List(items)) => {
            if items.len() != *len {
                return Err(CoerceError::Length {
                    path: path.to_string(),
                    expected: *len,
                    got: items.len(),
                });
            }
            let values = coerce_items(inner, components, items, path, separator)?;
            Ok(DynSolValue::FixedArray(values))
        }
        (DynSolType::Tuple(types), ArgValue::List(items)) => {
            if items.len() != types.len() {
                return Err(CoerceError::Length {
                    path: path.to_string(),
                    expected: types.len(),
                    got: items.len(),
                });
            }
            let values = types
                .iter()
                .zip(items)
                .enumerate()
                .map(|(i, (t, item))| {
                    let members = components.get(i).map_or(&[][..], |c| &c.components[..]);
                    let path = child_path(path, separator, &i.to_string());
                    coerce_value(t, members, item, &path, separator)
                })
                .collect::<Result<_, _>>()?;
            Ok(DynSolValue::Tuple(values))
        }
        (DynSolType::Tuple(types), ArgValue::Map(entries)) => {
            let values = types
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    let member = components.get(i);
                    let key = member
                        .map(|c| c.name.clone())
                        .filter(|n| !n.is_empty())
                        .unwrap_or_else(|| i.to_string());
                    let item = entries.get(&key).ok_or_else(|| CoerceError::MissingField {
                        path: path.to_string(),
                        field: key.clone(),
                    })?;
                    let members = member.map_or(&[][..], |c| &c.components[..]);
                    let path = child_path(path, separator, &key);
                    coerce_value(t, members, item, &path, separator)
                })
                .collect::<Result<_, _>>()?;
            Ok(DynSolValue::Tuple(values))
        }
        (DynSolType::Bool, ArgValue::Bool(b)) => Ok(DynSolValue::Bool(*b)),
        (DynSolType::String, ArgValue::String(s)) => Ok(DynSolValue::String(s.clone())),
        (_, ArgValue::String(s)) => coerce_scalar(ty, s, path),
        _ => Err(CoerceError::TypeMismatch {
            path: path.to_string(),
            expected: ty.to_string(),
            got: describe(value).to_string(),
        }),
    }
}

fn coerce_items(
    inner: &DynSolType,
    components: &[Param],
    items: &[ArgValue],
    path: &str,
    separator: char,
) -> Result<Vec<DynSolValue>, CoerceError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = child_path(path, separator, &i.to_string());
            coerce_value(inner, components, item, &path, separator)
        })
        .collect()
}

fn coerce_scalar(ty: &DynSolType, raw: &str, path: &str) -> Result<DynSolValue, CoerceError> {
    let s = raw.trim();
    match ty {
        DynSolType::Uint(bits) => check_int_range(s, *bits, true, path)?,
        DynSolType::Int(bits) => check_int_range(s, *bits, false, path)?,
        _ => {}
    }
    ty.coerce_str(s).map_err(|e| CoerceError::Coerce {
        path: path.to_string(),
        value: raw.to_string(),
        ty: ty.to_string(),
        reason: e.to_string(),
    })
}

/// Plain decimal literals are checked against the declared width. Anything
/// else (hex, unit suffixes) is left to alloy's coercion.
fn check_int_range(s: &str, bits: usize, is_unsigned: bool, path: &str) -> Result<(), CoerceError> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(());
    }
    let Ok(value) = s.parse::<BigInt>() else {
        return Ok(());
    };
    let (min, max) = int_boundaries(bits as u32, is_unsigned);
    if value < min || value > max {
        return Err(CoerceError::ValueOutOfRange {
            path: path.to_string(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(())
}

fn child_path(parent: &str, separator: char, segment: &str) -> String {
    format!("{parent}{separator}{segment}")
}

fn describe(value: &ArgValue) -> &'static str {
    match value {
        ArgValue::Bool(_) => "bool",
        ArgValue::String(_) => "string",
        ArgValue::List(_) => "list",
        ArgValue::Map(_) => "map",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};
    use chainform_core::{
        transform_form_data_to_method_args, unflatten, FieldValue, FormConfig, FormFields,
    };

    const TOKEN_ABI: &str = r#"[
        {
            "name": "transfer",
            "type": "function",
            "inputs": [
                {"name": "to", "type": "address"},
                {"name": "amount", "type": "uint256"}
            ],
            "outputs": [{"name": "", "type": "bool"}],
            "stateMutability": "nonpayable"
        },
        {
            "name": "setLimits",
            "type": "function",
            "inputs": [
                {"name": "small", "type": "uint8"},
                {"name": "delta", "type": "int16"},
                {"name": "pair", "type": "uint8[2]"},
                {"name": "enabled", "type": "bool"}
            ],
            "outputs": [],
            "stateMutability": "nonpayable"
        },
        {
            "name": "route",
            "type": "function",
            "inputs": [
                {
                    "name": "hop",
                    "type": "tuple",
                    "internalType": "struct Router.Hop",
                    "components": [
                        {"name": "pool", "type": "address"},
                        {"name": "fee", "type": "uint24"}
                    ]
                }
            ],
            "outputs": [],
            "stateMutability": "nonpayable"
        }
    ]"#;

    const RECIPIENT: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

    fn form(pairs: &[(&str, Option<&str>)]) -> MethodArgs {
        let fields: FormFields = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(FieldValue::from)))
            .collect();
        transform_form_data_to_method_args(&fields).unwrap()
    }

    fn coercer() -> ArgCoercer {
        ArgCoercer::from_abi_json(TOKEN_ABI).unwrap()
    }

    #[test]
    fn coerce_transfer() {
        let args = form(&[("0", Some(RECIPIENT)), ("1", Some("1000000"))]);
        let values = coercer().coerce("transfer", args).unwrap();
        let to: Address = RECIPIENT.parse().unwrap();
        assert_eq!(values[0], DynSolValue::Address(to));
        assert_eq!(values[1], DynSolValue::Uint(U256::from(1_000_000u64), 256));
    }

    #[test]
    fn encode_transfer() {
        let args = form(&[("0", Some(RECIPIENT)), ("1", Some("1000000"))]);
        let calldata = coercer().encode_call("transfer", args).unwrap();
        assert_eq!(&calldata[..4], hex::decode("a9059cbb").unwrap().as_slice());
        assert_eq!(calldata.len(), 68);
    }

    #[test]
    fn hex_amounts_are_accepted() {
        let args = form(&[("0", Some(RECIPIENT)), ("1", Some("0xff"))]);
        let values = coercer().coerce("transfer", args).unwrap();
        assert_eq!(values[1], DynSolValue::Uint(U256::from(255u64), 256));
    }

    #[test]
    fn out_of_range_decimal_is_reported() {
        let args = form(&[
            ("0", Some("256")),
            ("1", Some("0")),
            ("2:0", Some("1")),
            ("2:1", Some("2")),
            ("3", Some("true")),
        ]);
        let err = coercer().coerce("setLimits", args).unwrap_err();
        match err {
            CoerceError::ValueOutOfRange { path, max, .. } => {
                assert_eq!(path, "0");
                assert_eq!(max, "255");
            }
            other => panic!("expected ValueOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn negative_signed_value() {
        let args = form(&[
            ("0", Some("7")),
            ("1", Some("-32768")),
            ("2:0", Some("1")),
            ("2:1", Some("2")),
            ("3", Some("false")),
        ]);
        let values = coercer().coerce("setLimits", args).unwrap();
        assert!(matches!(values[1], DynSolValue::Int(_, 16)));
        assert_eq!(values[3], DynSolValue::Bool(false));
    }

    #[test]
    fn fixed_array_length_is_checked() {
        let args = form(&[
            ("0", Some("7")),
            ("1", Some("1")),
            ("2:0", Some("1")),
            ("2:1", None),
            ("3", Some("true")),
        ]);
        let err = coercer().coerce("setLimits", args).unwrap_err();
        assert!(matches!(err, CoerceError::Length { expected: 2, got: 1, .. }), "{err:?}");
    }

    #[test]
    fn tuple_from_positional_members() {
        let args = form(&[("0:0", Some(RECIPIENT)), ("0:1", Some("3000"))]);
        let values = coercer().coerce("route", args).unwrap();
        match &values[0] {
            DynSolValue::Tuple(members) => {
                assert_eq!(members.len(), 2);
                assert_eq!(members[1], DynSolValue::Uint(U256::from(3000u64), 24));
            }
            other => panic!("expected tuple, got {other:?}"),
        }
    }

    #[test]
    fn tuple_from_named_members() {
        let args = form(&[("0:fee", Some("500")), ("0:pool", Some(RECIPIENT))]);
        let values = coercer().coerce("route", args).unwrap();
        let to: Address = RECIPIENT.parse().unwrap();
        assert_eq!(
            values[0],
            DynSolValue::Tuple(vec![
                DynSolValue::Address(to),
                DynSolValue::Uint(U256::from(500u64), 24),
            ])
        );
    }

    #[test]
    fn missing_named_member() {
        let args = form(&[("0:pool", Some(RECIPIENT))]);
        let err = coercer().coerce("route", args).unwrap_err();
        assert!(matches!(err, CoerceError::MissingField { ref field, .. } if field == "fee"));
    }

    #[test]
    fn argument_count_mismatch() {
        let args = form(&[("0", Some(RECIPIENT))]);
        let err = coercer().coerce("transfer", args).unwrap_err();
        assert!(matches!(err, CoerceError::ArgumentCount { expected: 2, got: 1 }));
    }

    #[test]
    fn bad_address_names_the_field() {
        let args = form(&[("0", Some("not-an-address")), ("1", Some("1"))]);
        let err = coercer().coerce("transfer", args).unwrap_err();
        match err {
            CoerceError::Coerce { path, ty, .. } => {
                assert_eq!(path, "0");
                assert_eq!(ty, "address");
            }
            other => panic!("expected Coerce, got {other:?}"),
        }
    }

    #[test]
    fn list_for_scalar_is_a_mismatch() {
        let args = form(&[("0:0", Some(RECIPIENT)), ("1", Some("1"))]);
        let err = coercer().coerce("transfer", args).unwrap_err();
        assert!(matches!(err, CoerceError::TypeMismatch { .. }));
    }

    #[test]
    fn keyed_root_is_not_positional() {
        let args = form(&[("hop:pool", Some(RECIPIENT))]);
        let err = coercer().coerce("route", args).unwrap_err();
        assert!(matches!(err, CoerceError::Form(_)));
    }

    #[test]
    fn filled_native_value_is_not_an_argument() {
        let args = form(&[("0", Some(RECIPIENT)), ("1", Some("5")), ("value", Some("1"))]);
        let calldata = coercer().encode_call("transfer", args).unwrap();
        assert_eq!(calldata.len(), 68);
    }

    #[test]
    fn error_paths_follow_the_form_separator() {
        let fields: FormFields = [
            ("0", Some("7")),
            ("1", Some("1")),
            ("2/0", Some("1")),
            ("2/1", Some("300")),
            ("3", Some("true")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.map(FieldValue::from)))
        .collect();
        let config = FormConfig { separator: '/', ..FormConfig::default() };
        let args = unflatten(&fields, &config).unwrap();
        let err = coercer().coerce("setLimits", args).unwrap_err();
        assert!(
            matches!(err, CoerceError::ValueOutOfRange { ref path, .. } if path == "2/1"),
            "{err:?}"
        );
    }

    #[test]
    fn unknown_function() {
        let err = coercer().coerce("burn", form(&[])).unwrap_err();
        assert!(matches!(err, CoerceError::FunctionNotFound { .. }));
    }
}
