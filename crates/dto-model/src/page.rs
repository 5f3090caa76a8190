use dto_core::{ApiObject, FieldSpec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::common::Pagination;
use crate::order::Order;

/// One page of a list endpoint.
///
/// `Page<T>` itself is registered as an open generic; the closed
/// instantiations the client actually returns are objects in their own right.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

const PAGE_FIELDS: &[FieldSpec] = &[
    FieldSpec::json("data", "data"),
    FieldSpec::json("pagination", "pagination"),
];

/// `GET /v1/orders`
pub type ListOrdersResponse = Page<Order>;

/// `GET /v1/products`
pub type ListProductsResponse = Page<Product>;

impl ApiObject for ListOrdersResponse {
    const TYPE_NAME: &'static str = "ListOrdersResponse";
    const FIELDS: &'static [FieldSpec] = PAGE_FIELDS;
}

impl ApiObject for ListProductsResponse {
    const TYPE_NAME: &'static str = "ListProductsResponse";
    const FIELDS: &'static [FieldSpec] = PAGE_FIELDS;
}
