use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Length of a canonical StrKey identifier.
const STRKEY_LEN: usize = 56;

/// Account identifier in the ledger's canonical StrKey form.
///
/// Account addresses are 56-character base-32 strings beginning with `G`.
/// Construction validates the shape; beyond that the value is opaque to
/// this client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Parse an account address, rejecting anything that does not match
    /// the canonical `G...` shape.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if !is_canonical(b'G', s) {
            return Err(ValidationError::InvalidIdentity(
                "expected a 56-character StrKey account address starting with G".to_string(),
            ));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for status lines and logs, e.g. `GDQNY3…`.
    pub fn short(&self) -> String {
        format!("{}…", &self.0[..6])
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Identity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Identity::parse(&s).map_err(de::Error::custom)
    }
}

/// Shape check for contract identifiers (`C...` StrKey form).
pub fn is_contract_id(s: &str) -> bool {
    is_canonical(b'C', s)
}

fn is_canonical(prefix: u8, s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == STRKEY_LEN
        && bytes[0] == prefix
        && bytes[1..]
            .iter()
            .all(|&b| matches!(b, b'A'..=b'Z' | b'2'..=b'7'))
}
