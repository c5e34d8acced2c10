//! Public-key normalization: promotes strings that parse as base-58
//! Solana addresses into typed `Pubkey` leaves, and back. Malformed
//! strings are not errors; they stay strings, which also makes the pass
//! idempotent.

use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;

use crate::sdk::{AddressParse, SdkValue};

/// Attempt to parse a base-58 address. The result is a tagged union, not
/// an error: callers match exhaustively.
pub fn try_parse_address(candidate: String) -> AddressParse {
    match Pubkey::from_str(&candidate) {
        Ok(address) => AddressParse::Address(address),
        Err(_) => AddressParse::Unchanged(candidate),
    }
}

/// Recursively promotes address-shaped string leaves to `Address` leaves.
pub fn deep_strings_to_addresses(value: SdkValue) -> SdkValue {
    match value {
        SdkValue::String(text) => match try_parse_address(text) {
            AddressParse::Address(address) => SdkValue::Address(address),
            AddressParse::Unchanged(text) => SdkValue::String(text),
        },
        SdkValue::Array(items) => {
            SdkValue::Array(items.into_iter().map(deep_strings_to_addresses).collect())
        }
        SdkValue::Record(fields) => SdkValue::Record(
            fields
                .into_iter()
                .map(|(key, field)| (key, deep_strings_to_addresses(field)))
                .collect(),
        ),
        other => other,
    }
}

/// Inverse walk: `Address` leaves become their canonical base-58 strings.
pub fn deep_addresses_to_strings(value: SdkValue) -> SdkValue {
    match value {
        SdkValue::Address(address) => SdkValue::String(address.to_string()),
        SdkValue::Array(items) => {
            SdkValue::Array(items.into_iter().map(deep_addresses_to_strings).collect())
        }
        SdkValue::Record(fields) => SdkValue::Record(
            fields
                .into_iter()
                .map(|(key, field)| (key, deep_addresses_to_strings(field)))
                .collect(),
        ),
        other => other,
    }
}
