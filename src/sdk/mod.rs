//! Boundary types shared with the external swap engine.
//!
//! The engine hands back arbitrarily nested records; [`SdkValue`] is the
//! closed sum type those payloads are modeled as on this side of the
//! boundary. The deep conversion passes in [`crate::convert`] recurse over
//! arrays and records only; every other variant is a leaf. Variants the
//! conversions must never unwrap (token descriptors, amount wrappers,
//! addresses, rationals, big integers, prices, percents) answer `true`
//! from [`SdkValue::is_opaque`].

pub mod engine;
pub mod routes;

use std::collections::BTreeMap;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;
use rust_decimal::Decimal;
use solana_sdk::pubkey::Pubkey;

/// Token descriptor: mint plus the metadata needed to scale raw amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub mint: Pubkey,
    pub decimals: u8,
    pub symbol: Option<String>,
}

impl TokenInfo {
    pub fn new(mint: Pubkey, decimals: u8) -> Self {
        Self { mint, decimals, symbol: None }
    }

    pub fn with_symbol(mint: Pubkey, decimals: u8, symbol: impl Into<String>) -> Self {
        Self { mint, decimals, symbol: Some(symbol.into()) }
    }
}

/// A raw token amount paired with its token's metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAmount {
    pub token: TokenInfo,
    /// Amount in the token's smallest units.
    pub raw: u64,
}

impl TokenAmount {
    pub fn new(token: TokenInfo, raw: u64) -> Self {
        Self { token, raw }
    }

    /// Human-unit value, exact.
    pub fn to_rational(&self) -> BigRational {
        BigRational::new(
            BigInt::from(self.raw),
            BigInt::from(10u8).pow(u32::from(self.token.decimals)),
        )
    }
}

/// A percentage expressed as an exact fraction (`1/100` is one percent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Percent(pub BigRational);

impl Percent {
    pub fn from_basis_points(bps: u64) -> Self {
        Self(BigRational::new(BigInt::from(bps), BigInt::from(10_000u64)))
    }

    pub fn zero() -> Self {
        Self(BigRational::new(BigInt::from(0), BigInt::one()))
    }

    pub fn as_ratio(&self) -> &BigRational {
        &self.0
    }
}

/// A price quoted as an exact fraction of quote units per base unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceValue(pub BigRational);

/// Result of an address parse attempt. Malformed strings are not errors;
/// they stay strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressParse {
    Address(Pubkey),
    Unchanged(String),
}

/// JSON-like tree for SDK payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum SdkValue {
    Null,
    Bool(bool),
    Int(i64),
    String(String),
    Decimal(Decimal),
    Rational(BigRational),
    Address(Pubkey),
    BigInt(BigInt),
    Token(TokenInfo),
    Amount(TokenAmount),
    Price(PriceValue),
    Percent(Percent),
    Array(Vec<SdkValue>),
    Record(BTreeMap<String, SdkValue>),
}

impl SdkValue {
    /// Leaves the deep conversions pass through without looking inside.
    pub fn is_opaque(&self) -> bool {
        matches!(
            self,
            SdkValue::Rational(_)
                | SdkValue::Address(_)
                | SdkValue::BigInt(_)
                | SdkValue::Token(_)
                | SdkValue::Amount(_)
                | SdkValue::Price(_)
                | SdkValue::Percent(_)
        )
    }

    pub fn record(fields: impl IntoIterator<Item = (&'static str, SdkValue)>) -> Self {
        SdkValue::Record(
            fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }
}
