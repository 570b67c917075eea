//! ABI type-string matchers.
//!
//! Each matcher answers one question about a type string: "is this an
//! array / integer / bytes type, and if so, what shape?". A type that does
//! not fit the pattern yields `None`, so callers can try the next matcher.
//!
//! The lenient matchers accept any decimal width the pattern allows. The
//! `try_*` variants additionally enforce the widths the ABI actually permits.

use num_bigint::BigInt;
use num_traits::{One, Zero};
use serde::{Serialize, Serializer};

use crate::error::FormError;

/// Widest integer the lenient matcher will compute bounds for.
pub const MAX_LENIENT_BITS: u32 = 8192;

// ─── Arrays ───────────────────────────────────────────────────────────────────

/// Length of an array type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArraySize {
    /// `T[N]`
    Fixed(usize),
    /// `T[]`
    Dynamic,
}

impl ArraySize {
    pub fn fixed(&self) -> Option<usize> {
        match self {
            ArraySize::Fixed(n) => Some(*n),
            ArraySize::Dynamic => None,
        }
    }
}

/// Result of [`match_array`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArrayMatch<'a> {
    /// Everything before the outermost brackets: `uint8[2]` for `uint8[2][3]`
    pub item_type: &'a str,
    pub size: ArraySize,
    /// `true` when `item_type` is itself an array
    pub is_nested: bool,
}

/// Match `<item>[<size>]`, where `<size>` is empty or a decimal literal.
///
/// Only the last bracket pair is consumed; nesting is reported through
/// [`ArrayMatch::is_nested`].
pub fn match_array(ty: &str) -> Option<ArrayMatch<'_>> {
    let body = ty.strip_suffix(']')?;
    let open = body.rfind('[')?;
    let item_type = &body[..open];
    let size = &body[open + 1..];

    if !size.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let size = if size.is_empty() {
        ArraySize::Dynamic
    } else {
        ArraySize::Fixed(size.parse().ok()?)
    };

    Some(ArrayMatch {
        item_type,
        size,
        is_nested: match_array(item_type).is_some(),
    })
}

// ─── Integers ─────────────────────────────────────────────────────────────────

/// Result of [`match_int`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntMatch {
    pub is_unsigned: bool,
    /// Bit width as written in the type, `"256"` when omitted
    pub power: String,
    pub bits: u32,
    #[serde(serialize_with = "serialize_decimal")]
    pub min: BigInt,
    #[serde(serialize_with = "serialize_decimal")]
    pub max: BigInt,
}

impl IntMatch {
    /// `true` if `value` lies within `[min, max]`.
    pub fn contains(&self, value: &BigInt) -> bool {
        &self.min <= value && value <= &self.max
    }

    /// `true` if the width is one the ABI allows (8, 16, .., 256).
    pub fn is_abi_width(&self) -> bool {
        is_abi_int_width(self.bits)
    }
}

fn serialize_decimal<S: Serializer>(value: &BigInt, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(value)
}

/// Split `[u]int<digits>` (case-insensitive) into the unsigned flag and the
/// raw digit suffix, which may be empty.
fn split_int(ty: &str) -> Option<(bool, &str)> {
    let (is_unsigned, rest) = match ty.as_bytes().first() {
        Some(b'u' | b'U') => (true, &ty[1..]),
        _ => (false, ty),
    };
    let head = rest.get(..3)?;
    if !head.eq_ignore_ascii_case("int") {
        return None;
    }
    let digits = &rest[3..];
    digits
        .bytes()
        .all(|b| b.is_ascii_digit())
        .then_some((is_unsigned, digits))
}

/// Match `[u]int[<bits>]` and compute the representable range.
///
/// A missing width means 256. A zero width, or one above
/// [`MAX_LENIENT_BITS`], has no usable range and is treated as no match.
pub fn match_int(ty: &str) -> Option<IntMatch> {
    let (is_unsigned, digits) = split_int(ty)?;
    let power = if digits.is_empty() { "256" } else { digits };
    let bits: u32 = power
        .parse()
        .ok()
        .filter(|b| (1..=MAX_LENIENT_BITS).contains(b))?;
    let (min, max) = int_boundaries(bits, is_unsigned);

    Some(IntMatch {
        is_unsigned,
        power: power.to_string(),
        bits,
        min,
        max,
    })
}

/// Like [`match_int`], but an integer type with a width the ABI does not
/// allow is an error rather than a pass-through.
pub fn try_match_int(ty: &str) -> Result<Option<IntMatch>, FormError> {
    let Some((_, digits)) = split_int(ty) else {
        return Ok(None);
    };
    match match_int(ty) {
        Some(m) if m.is_abi_width() => Ok(Some(m)),
        _ => Err(FormError::InvalidBitWidth {
            ty: ty.to_string(),
            width: digits.to_string(),
        }),
    }
}

fn is_abi_int_width(bits: u32) -> bool {
    bits % 8 == 0 && (8..=256).contains(&bits)
}

/// Two's-complement bounds for a `bits`-wide integer.
///
/// Unsigned: `[0, 2^bits - 1]`. Signed: `[-2^(bits-1), 2^(bits-1) - 1]`.
pub fn int_boundaries(bits: u32, is_unsigned: bool) -> (BigInt, BigInt) {
    let max_unsigned = BigInt::one() << bits;
    if is_unsigned {
        (BigInt::zero(), max_unsigned - BigInt::one())
    } else {
        let half = max_unsigned >> 1u32;
        (-half.clone(), half - BigInt::one())
    }
}

// ─── Bytes ────────────────────────────────────────────────────────────────────

/// Result of [`match_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BytesMatch {
    /// `Some(n)` for `bytesN`, `None` for dynamic `bytes`
    pub size: Option<usize>,
}

impl BytesMatch {
    pub fn is_dynamic(&self) -> bool {
        self.size.is_none()
    }
}

fn split_bytes(ty: &str) -> Option<&str> {
    let head = ty.get(..5)?;
    if !head.eq_ignore_ascii_case("bytes") {
        return None;
    }
    let digits = &ty[5..];
    digits.bytes().all(|b| b.is_ascii_digit()).then_some(digits)
}

/// Match `bytes` or `bytes<N>` (case-insensitive).
pub fn match_bytes(ty: &str) -> Option<BytesMatch> {
    let digits = split_bytes(ty)?;
    let size = if digits.is_empty() {
        None
    } else {
        Some(digits.parse().ok()?)
    };
    Some(BytesMatch { size })
}

/// Like [`match_bytes`], but `bytesN` must have `N` in `1..=32`.
pub fn try_match_bytes(ty: &str) -> Result<Option<BytesMatch>, FormError> {
    let Some(digits) = split_bytes(ty) else {
        return Ok(None);
    };
    match match_bytes(ty) {
        Some(m) if m.size.map_or(true, |n| (1..=32).contains(&n)) => Ok(Some(m)),
        _ => Err(FormError::InvalidBytesSize {
            ty: ty.to_string(),
            size: digits.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(s: &str) -> BigInt {
        s.parse().unwrap()
    }

    #[test]
    fn dynamic_array() {
        let m = match_array("address[]").unwrap();
        assert_eq!(m.item_type, "address");
        assert_eq!(m.size, ArraySize::Dynamic);
        assert!(!m.is_nested);
    }

    #[test]
    fn fixed_array() {
        let m = match_array("bytes32[5]").unwrap();
        assert_eq!(m.item_type, "bytes32");
        assert_eq!(m.size, ArraySize::Fixed(5));
        assert_eq!(m.size.fixed(), Some(5));
    }

    #[test]
    fn nested_array_peels_outer_brackets() {
        let m = match_array("uint8[2][3]").unwrap();
        assert_eq!(m.item_type, "uint8[2]");
        assert_eq!(m.size, ArraySize::Fixed(3));
        assert!(m.is_nested);

        let inner = match_array(m.item_type).unwrap();
        assert_eq!(inner.item_type, "uint8");
        assert!(!inner.is_nested);
    }

    #[test]
    fn tuple_array() {
        let m = match_array("tuple[][]").unwrap();
        assert_eq!(m.item_type, "tuple[]");
        assert_eq!(m.size, ArraySize::Dynamic);
        assert!(m.is_nested);
    }

    #[test]
    fn non_array_types() {
        assert!(match_array("uint256").is_none());
        assert!(match_array("address[x]").is_none());
        assert!(match_array("address[").is_none());
        assert!(match_array("]").is_none());
        assert!(match_array("uint8[99999999999999999999999]").is_none());
    }

    #[test]
    fn uint8_bounds() {
        let m = match_int("uint8").unwrap();
        assert!(m.is_unsigned);
        assert_eq!(m.power, "8");
        assert_eq!(m.min, BigInt::zero());
        assert_eq!(m.max, BigInt::from(255));
    }

    #[test]
    fn int8_bounds() {
        let m = match_int("int8").unwrap();
        assert!(!m.is_unsigned);
        assert_eq!(m.min, BigInt::from(-128));
        assert_eq!(m.max, BigInt::from(127));
    }

    #[test]
    fn bare_int_is_int256() {
        let m = match_int("int").unwrap();
        assert_eq!(m.power, "256");
        assert_eq!(m.bits, 256);
        assert_eq!(
            m.min,
            big("-57896044618658097711785492504343953926634992332820282019728792003956564819968")
        );
        assert_eq!(
            m.max,
            big("57896044618658097711785492504343953926634992332820282019728792003956564819967")
        );
        assert_eq!(match_int("int256").unwrap(), m);
    }

    #[test]
    fn uint256_max_is_exact() {
        let m = match_int("uint256").unwrap();
        assert_eq!(
            m.max,
            big("115792089237316195423570985008687907853269984665640564039457584007913129639935")
        );
        assert_eq!(m.max, (BigInt::one() << 256u32) - BigInt::one());
    }

    #[test]
    fn bounds_invariant_holds_for_every_abi_width() {
        for bits in (8..=256).step_by(8) {
            for unsigned in [true, false] {
                let (min, max) = int_boundaries(bits, unsigned);
                assert!(min <= max);
                let span = &max - &min + BigInt::one();
                assert_eq!(span, BigInt::one() << bits);
            }
        }
    }

    #[test]
    fn int_match_is_case_insensitive() {
        let m = match_int("UINT64").unwrap();
        assert!(m.is_unsigned);
        assert_eq!(m.max, BigInt::from(u64::MAX));
        assert!(match_int("Int16").is_some());
    }

    #[test]
    fn non_int_types() {
        assert!(match_int("address").is_none());
        assert!(match_int("uint8[]").is_none());
        assert!(match_int("uuint8").is_none());
        assert!(match_int("int8x").is_none());
        assert!(match_int("in").is_none());
    }

    #[test]
    fn lenient_widths_pass_through() {
        let m = match_int("uint7").unwrap();
        assert_eq!(m.max, BigInt::from(127));
        assert!(!m.is_abi_width());

        let wide = match_int("uint512").unwrap();
        assert_eq!(wide.max, (BigInt::one() << 512u32) - BigInt::one());

        assert!(match_int("uint0").is_none());
        assert!(match_int("uint99999999999").is_none());
    }

    #[test]
    fn strict_int_rejects_non_abi_widths() {
        assert!(try_match_int("uint256").unwrap().is_some());
        assert!(try_match_int("int").unwrap().is_some());
        assert!(try_match_int("address").unwrap().is_none());
        for bad in ["uint7", "uint0", "int264", "uint99999999999"] {
            let err = try_match_int(bad).unwrap_err();
            assert!(matches!(err, FormError::InvalidBitWidth { .. }), "{bad}: {err:?}");
        }
    }

    #[test]
    fn contains_checks_range() {
        let m = match_int("int8").unwrap();
        assert!(m.contains(&BigInt::from(-128)));
        assert!(m.contains(&BigInt::from(127)));
        assert!(!m.contains(&BigInt::from(128)));
        assert!(!m.contains(&BigInt::from(-129)));
    }

    #[test]
    fn int_match_serializes_bounds_as_decimal() {
        let json = serde_json::to_value(match_int("int8").unwrap()).unwrap();
        assert_eq!(json["min"], "-128");
        assert_eq!(json["max"], "127");
        assert_eq!(json["power"], "8");
    }

    #[test]
    fn bytes_types() {
        assert_eq!(match_bytes("bytes"), Some(BytesMatch { size: None }));
        assert_eq!(match_bytes("bytes32"), Some(BytesMatch { size: Some(32) }));
        assert!(match_bytes("BYTES4").is_some());
        assert!(match_bytes("bytes32[]").is_none());
        assert!(match_bytes("byte").is_none());
    }

    #[test]
    fn strict_bytes_rejects_out_of_range() {
        assert!(try_match_bytes("bytes").unwrap().unwrap().is_dynamic());
        assert!(try_match_bytes("bytes1").unwrap().is_some());
        assert!(try_match_bytes("string").unwrap().is_none());
        assert!(try_match_bytes("bytes0").is_err());
        assert!(try_match_bytes("bytes33").is_err());
    }
}
