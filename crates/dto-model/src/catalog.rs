use std::collections::{BTreeMap, BTreeSet};

use dto_core::{ApiObject, FieldSpec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{Money, ResourceMeta};
use crate::resource::Resource;

/// A sellable catalog item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Product {
    #[serde(flatten)]
    pub meta: ResourceMeta,
    pub sku: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Money,
    pub active: bool,
    /// `None` for untracked inventory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub categories: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl ApiObject for Product {
    const TYPE_NAME: &'static str = "Product";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::inherit("meta", ResourceMeta::TYPE_NAME, ResourceMeta::FIELDS),
        FieldSpec::json("sku", "sku"),
        FieldSpec::json("name", "name"),
        FieldSpec::json("description", "description"),
        FieldSpec::json("price", "price"),
        FieldSpec::json("active", "active"),
        FieldSpec::json("stock", "stock"),
        FieldSpec::json("weight_kg", "weight_kg"),
        FieldSpec::json("images", "images"),
        FieldSpec::json("categories", "categories"),
        FieldSpec::json("attributes", "attributes"),
    ];
}

impl Resource for Product {
    const OBJECT: &'static str = "product";

    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }
}
