use std::collections::{BTreeMap, BTreeSet};

use dto_core::{ApiObject, FieldSpec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{Address, ResourceMeta};
use crate::order::Order;
use crate::resource::Resource;

/// A storefront customer account.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Customer {
    #[serde(flatten)]
    pub meta: ResourceMeta,
    pub email: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shipping_addresses: Vec<Address>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    /// The customer whose referral link created this account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referred_by: Option<Box<Customer>>,
    /// Expanded only when requested with `expand[]=recent_orders`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recent_orders: Vec<Order>,
    /// Client-side cache; never sent.
    #[serde(skip)]
    pub etag: Option<String>,
}

impl ApiObject for Customer {
    const TYPE_NAME: &'static str = "Customer";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::inherit("meta", ResourceMeta::TYPE_NAME, ResourceMeta::FIELDS),
        FieldSpec::json("email", "email"),
        FieldSpec::json("display_name", "displayName"),
        FieldSpec::json("phone", "phone"),
        FieldSpec::json("default_address", "default_address"),
        FieldSpec::json("shipping_addresses", "shipping_addresses"),
        FieldSpec::json("tags", "tags"),
        FieldSpec::json("metadata", "metadata"),
        FieldSpec::json("referred_by", "referred_by"),
        FieldSpec::json("recent_orders", "recent_orders"),
        FieldSpec::exclude("etag"),
    ];
}

impl Resource for Customer {
    const OBJECT: &'static str = "customer";

    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }
}
