//! Exact integer handling for monetary amounts and identifiers.
//!
//! Prices and deposits are 128-bit signed integers end to end and cross
//! the JSON boundary as strings so no precision is lost. Parsing fails on
//! non-numeric or overflowing input instead of truncating.

use crate::error::ValidationError;

/// Parse an i128 amount from its string form.
pub fn parse_amount(s: &str) -> Result<i128, ValidationError> {
    s.trim()
        .parse::<i128>()
        .map_err(|_| ValidationError::InvalidQuantity(format!("{s:?} is not a valid amount")))
}

/// Parse a u64 identifier or duration from its string form.
pub fn parse_id(s: &str) -> Result<u64, ValidationError> {
    s.trim()
        .parse::<u64>()
        .map_err(|_| ValidationError::InvalidQuantity(format!("{s:?} is not a valid identifier")))
}

/// Serde helper carrying i128 amounts as strings on the wire while
/// accepting either a string or a bare number inbound.
pub mod i128_str {
    use std::fmt;

    use serde::de::{self, Deserializer, Unexpected, Visitor};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &i128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i128, D::Error> {
        struct AmountVisitor;

        impl<'de> Visitor<'de> for AmountVisitor {
            type Value = i128;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer amount, as a string or a number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<i128, E> {
                v.trim()
                    .parse::<i128>()
                    .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<i128, E> {
                Ok(v as i128)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<i128, E> {
                Ok(v as i128)
            }

            fn visit_i128<E: de::Error>(self, v: i128) -> Result<i128, E> {
                Ok(v)
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> Result<i128, E> {
                i128::try_from(v)
                    .map_err(|_| E::invalid_value(Unexpected::Other("oversized amount"), &self))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}
