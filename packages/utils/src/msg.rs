use std::collections::BTreeMap;
use std::str::FromStr;

use cosmwasm_std::{Decimal, StdError, StdResult, Uint128};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::state::Address;

lazy_static! {
    // A bare `0x…` key directly followed by a colon, i.e. one nobody quoted
    static ref BARE_ADDRESS_KEY: Regex = Regex::new(r"\b(0x[a-fA-F0-9]{40})\b:").unwrap();
}

/// Rewrites the hand-edited JSON stored in project records into strict JSON.
///
/// Project leads paste these maps from docs and chat, so they routinely carry
/// typographic quotes and unquoted address keys:
/// `{“0xabc…”: 60, 0xdef…: 40}` becomes `{"0xabc…": 60, "0xdef…": 40}`.
/// Blank input becomes `{}`.
pub fn normalize_json_map(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "{}".to_string();
    }
    let straight: String = trimmed
        .chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => '"',
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => '\'',
            other => other,
        })
        .collect();
    BARE_ADDRESS_KEY
        .replace_all(&straight, "\"$1\":")
        .into_owned()
}

/// Parses an `address -> number` JSON field (reward distribution, upfront payments).
/// Keys that only differ by case are summed under their canonical address.
pub fn parse_address_map(raw: &str, field: &str) -> StdResult<BTreeMap<Address, f64>> {
    let normalized = normalize_json_map(raw);
    let entries: BTreeMap<String, f64> = serde_json::from_str(&normalized)
        .map_err(|err| StdError::parse_err(field, err))?;

    Ok(sum_by_address(entries))
}

/// `deserialize_with` counterpart of [`parse_address_map`] for maps sent as JSON
/// objects, e.g. voting power or the community circle.
/// Keys that only differ by case are summed rather than overwritten.
pub fn deserialize_address_map<'de, D>(deserializer: D) -> Result<BTreeMap<Address, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    BTreeMap::<String, f64>::deserialize(deserializer).map(sum_by_address)
}

fn sum_by_address(entries: BTreeMap<String, f64>) -> BTreeMap<Address, f64> {
    let mut map: BTreeMap<Address, f64> = BTreeMap::new();
    for (key, value) in entries {
        *map.entry(Address::new(key)).or_insert(0.0) += value;
    }
    map
}

/// Converts a token amount to its 18-decimal integer representation
pub fn to_wei(amount: f64) -> StdResult<Uint128> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(StdError::generic_err(format!(
            "Cannot convert {amount} to an 18 decimals amount"
        )));
    }
    Ok(Decimal::from_str(&format!("{amount:.18}"))?.atomics())
}

/// `0x`-prefixed lowercase hex, as expected by batch transfer calldata
pub fn to_hex_amount(wei: Uint128) -> String {
    format!("{:#x}", wei.u128())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
    const BOB: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";

    #[test]
    fn smart_quotes_and_bare_keys_are_fixed() {
        let raw = format!("{{“{ALICE}”: 60, {BOB}: 40}}");
        let normalized = normalize_json_map(&raw);
        assert_eq!(normalized, format!("{{\"{ALICE}\": 60, \"{BOB}\": 40}}"));
    }

    #[test]
    fn quoted_keys_are_left_alone() {
        let raw = format!("{{\"{ALICE}\":100}}");
        assert_eq!(normalize_json_map(&raw), raw);
    }

    #[test]
    fn blank_fields_are_empty_maps() {
        assert!(parse_address_map("", "rewardDistribution").unwrap().is_empty());
        assert!(parse_address_map("   ", "rewardDistribution").unwrap().is_empty());
        assert!(parse_address_map("{}", "rewardDistribution").unwrap().is_empty());
    }

    #[test]
    fn malformed_fields_are_rejected() {
        let err = parse_address_map("{\"0xabc\": }", "upfrontPayments").unwrap_err();
        assert!(err.to_string().contains("upfrontPayments"));
    }

    #[test]
    fn case_variants_collapse() {
        let raw = format!(
            "{{\"{ALICE}\": 30, \"{}\": 20, {BOB}: 50}}",
            ALICE.to_lowercase()
        );
        let map = parse_address_map(&raw, "rewardDistribution").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&Address::new(ALICE)], 50.0);
        assert_eq!(map[&Address::new(BOB)], 50.0);
    }

    #[derive(Deserialize)]
    struct Weights {
        #[serde(deserialize_with = "deserialize_address_map")]
        weights: BTreeMap<Address, f64>,
    }

    #[test]
    fn case_variants_are_summed_when_deserialized() {
        let raw = format!(
            "{{\"weights\": {{\"{ALICE}\": 2, \"{}\": 1.5, \"{BOB}\": 1}}}}",
            ALICE.to_lowercase()
        );
        let parsed: Weights = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.weights.len(), 2);
        assert_eq!(parsed.weights[&Address::new(ALICE)], 3.5);
        assert_eq!(parsed.weights[&Address::new(BOB)], 1.0);
    }

    #[test]
    fn wei_and_hex() {
        assert_eq!(to_wei(1.0).unwrap(), Uint128::new(1_000_000_000_000_000_000));
        assert_eq!(to_wei(0.5).unwrap(), Uint128::new(500_000_000_000_000_000));
        assert_eq!(to_wei(0.0).unwrap(), Uint128::zero());
        assert!(to_wei(f64::NAN).is_err());
        assert!(to_wei(-1.0).is_err());
        assert_eq!(to_hex_amount(Uint128::new(255)), "0xff");
        assert_eq!(
            to_hex_amount(to_wei(1.0).unwrap()),
            "0xde0b6b3a7640000"
        );
    }
}
