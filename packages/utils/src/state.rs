use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use sha3::{Digest, Keccak256};

/// An EVM account address as it appears in ballots, reward distributions and
/// upfront payment records.
///
/// The inner string is always the canonical form (trimmed, lowercase), so two
/// spellings of the same account (checksummed, all caps, padded) compare equal
/// and collapse to the same map key.
/// Non-hex keys (test accounts like `0xauthor`) are accepted and only canonicalized.
#[derive(Serialize, JsonSchema, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Address(raw.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for `0x` followed by exactly 40 hex characters
    pub fn is_hex(&self) -> bool {
        self.0
            .strip_prefix("0x")
            .map(|body| body.len() == 40 && body.chars().all(|c| c.is_ascii_hexdigit()))
            .unwrap_or(false)
    }

    /// EIP-55 mixed-case checksum encoding.
    /// Addresses that are not 20-byte hex strings are returned in canonical form.
    pub fn to_checksum(&self) -> String {
        if !self.is_hex() {
            return self.0.clone();
        }
        let body = &self.0[2..];
        let hash = hex::encode(Keccak256::digest(body.as_bytes()));

        let mut checksummed = String::with_capacity(42);
        checksummed.push_str("0x");
        for (c, h) in body.chars().zip(hash.chars()) {
            // A letter is uppercased when the matching hash nibble is >= 8
            if c.is_ascii_alphabetic() && h.to_digit(16).unwrap_or(0) >= 8 {
                checksummed.push(c.to_ascii_uppercase());
            } else {
                checksummed.push(c);
            }
        }
        checksummed
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(raw: &str) -> Self {
        Address::new(raw)
    }
}

impl From<String> for Address {
    fn from(raw: String) -> Self {
        Address::new(raw)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Address::new)
    }
}
