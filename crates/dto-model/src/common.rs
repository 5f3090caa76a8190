//! Shared value types embedded by the resource entities.

use std::fmt;

use chrono::{DateTime, Utc};
use dto_core::{ApiObject, FieldSpec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identity and timestamps common to every stored resource.
///
/// Resources embed this with `#[serde(flatten)]`, so its fields appear at the
/// top level of the resource's JSON.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResourceMeta {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// `false` for objects created with a test API key.
    pub livemode: bool,
}

impl ApiObject for ResourceMeta {
    const TYPE_NAME: &'static str = "ResourceMeta";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::json("id", "id"),
        FieldSpec::json("created_at", "created_at"),
        FieldSpec::json("updated_at", "updated_at"),
        FieldSpec::json("livemode", "livemode"),
    ];
}

/// ISO 4217 currency code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Jpy,
}

impl Currency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usd => "usd",
            Self::Eur => "eur",
            Self::Gbp => "gbp",
            Self::Jpy => "jpy",
        }
    }

    /// Digits after the decimal point in the currency's minor unit.
    #[must_use]
    pub const fn exponent(self) -> u32 {
        match self {
            Self::Jpy => 0,
            Self::Usd | Self::Eur | Self::Gbp => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An amount in the currency's minor unit (cents for USD).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Money {
    pub amount: i64,
    pub currency: Currency,
}

impl ApiObject for Money {
    const TYPE_NAME: &'static str = "Money";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::json("amount", "amount"),
        FieldSpec::json("currency", "currency"),
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Address {
    pub line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    /// ISO 3166-1 alpha-2.
    pub country: String,
}

impl ApiObject for Address {
    const TYPE_NAME: &'static str = "Address";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::json("line1", "line1"),
        FieldSpec::json("line2", "line2"),
        FieldSpec::json("city", "city"),
        FieldSpec::json("region", "region"),
        FieldSpec::json("postal_code", "postalCode"),
        FieldSpec::json("country", "country"),
    ];
}

/// Cursor pagination block returned with every list response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u32,
    pub has_more: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl ApiObject for Pagination {
    const TYPE_NAME: &'static str = "Pagination";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::json("limit", "limit"),
        FieldSpec::json("has_more", "has_more"),
        FieldSpec::json("next_cursor", "next_cursor"),
        FieldSpec::json("total_count", "total_count"),
    ];
}
