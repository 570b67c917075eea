//! Integer matches as alloy types.

use std::str::FromStr;

use alloy_core::dyn_abi::DynSolType;
use alloy_primitives::{I256, U256};
use chainform_core::IntMatch;

/// The `DynSolType` an integer match describes.
pub fn int_sol_type(m: &IntMatch) -> DynSolType {
    let bits = m.bits as usize;
    if m.is_unsigned {
        DynSolType::Uint(bits)
    } else {
        DynSolType::Int(bits)
    }
}

/// `(min, max)` as `U256`. `None` for signed matches or widths above 256.
pub fn unsigned_bounds(m: &IntMatch) -> Option<(U256, U256)> {
    if !m.is_unsigned || m.bits > 256 {
        return None;
    }
    let min = U256::from_str(&m.min.to_string()).ok()?;
    let max = U256::from_str(&m.max.to_string()).ok()?;
    Some((min, max))
}

/// `(min, max)` as `I256`. `None` for unsigned matches or widths above 256.
pub fn signed_bounds(m: &IntMatch) -> Option<(I256, I256)> {
    if m.is_unsigned || m.bits > 256 {
        return None;
    }
    let min = I256::from_str(&m.min.to_string()).ok()?;
    let max = I256::from_str(&m.max.to_string()).ok()?;
    Some((min, max))
}
