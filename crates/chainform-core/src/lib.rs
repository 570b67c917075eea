//! # chainform-core
//!
//! Glue between a contract method's ABI inputs and the flat state of a web
//! form. Everything in here is a pure function over caller-owned data:
//!
//! - [`match_array`], [`match_int`], [`match_bytes`] recognise ABI type shapes
//! - [`transform_for_array_item`] relabels the per-item rows of an array field
//! - [`field_label`] renders `"name (type)"` labels
//! - [`unflatten`] turns `"0:1:2"`-style form keys back into nested arguments
//!
//! The EVM-specific side (alloy types, coercion into `DynSolValue`) lives in
//! `chainform-evm`.

pub mod config;
pub mod error;
pub mod form;
pub mod label;
pub mod matcher;
pub mod types;

pub use config::FormConfig;
pub use error::FormError;
pub use form::{flatten_args, transform_form_data_to_method_args, unflatten, MethodArgs};
pub use label::{field_label, transform_for_array_item, UNNAMED_ARGUMENT};
pub use matcher::{
    int_boundaries, match_array, match_bytes, match_int, try_match_bytes, try_match_int,
    ArrayMatch, ArraySize, BytesMatch, IntMatch,
};
pub use types::{ArgValue, FieldValue, FormFields, MethodInput, DEFAULT_SEPARATOR};
