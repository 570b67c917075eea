//! # chainform-evm
//!
//! Connects `chainform-core` to the alloy-rs ABI stack:
//!
//! - [`to_method_input`] turns an alloy JSON-ABI `Param` into a `MethodInput`
//! - [`bounds`] converts integer matches into `DynSolType`s and `U256`/`I256`
//! - [`ArgCoercer`] coerces rebuilt form arguments into `DynSolValue`s and
//!   hands them to alloy for calldata encoding
//!
//! ## Implementation notes
//! - Scalar leaves go through `DynSolType::coerce_str`, so hex, decimal and
//!   unit-suffixed (`"1.5 ether"`) numbers are all accepted
//! - Decimal integers are range-checked against the declared width first,
//!   which gives a clearer error than the coercion overflow
//! - Error paths use the form key syntax (`"0:1:2"`) so a UI can point at
//!   the offending field

pub mod bounds;
pub mod coerce;
pub mod error;
pub mod input;

pub use bounds::{int_sol_type, signed_bounds, unsigned_bounds};
pub use coerce::{coerce_params, coerce_params_with, ArgCoercer};
pub use error::CoerceError;
pub use input::{function_inputs, to_method_input};
