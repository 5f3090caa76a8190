use std::fmt;

use chrono::{DateTime, Utc};
use dto_core::{ApiObject, FieldSpec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{Address, Money, ResourceMeta};
use crate::customer::Customer;
use crate::payment::Payment;
use crate::resource::Resource;

/// Lifecycle of an order.
///
/// ```text
/// pending → paid → fulfilled
///         → canceled
///   paid → refunded
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Paid,
    Fulfilled,
    Canceled,
    Refunded,
}

impl OrderStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Paid, Self::Canceled],
            Self::Paid => &[Self::Fulfilled, Self::Refunded],
            Self::Fulfilled | Self::Canceled | Self::Refunded => &[],
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Fulfilled => "fulfilled",
            Self::Canceled => "canceled",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LineItem {
    pub id: String,
    pub product_id: String,
    pub description: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub total: Money,
}

impl ApiObject for LineItem {
    const TYPE_NAME: &'static str = "LineItem";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::json("id", "id"),
        FieldSpec::json("product_id", "product_id"),
        FieldSpec::json("description", "description"),
        FieldSpec::json("quantity", "quantity"),
        FieldSpec::json("unit_price", "unit_price"),
        FieldSpec::json("total", "total"),
    ];
}

/// An order as returned by `GET /v1/orders/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Order {
    #[serde(flatten)]
    pub meta: ResourceMeta,
    pub number: String,
    pub status: OrderStatus,
    pub customer_id: String,
    /// Expanded customer, present with `expand[]=customer`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Box<Customer>>,
    pub line_items: Vec<LineItem>,
    pub subtotal: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<Money>,
    pub total: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub payments: Vec<Payment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ApiObject for Order {
    const TYPE_NAME: &'static str = "Order";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::inherit("meta", ResourceMeta::TYPE_NAME, ResourceMeta::FIELDS),
        FieldSpec::json("number", "number"),
        FieldSpec::json("status", "status"),
        FieldSpec::json("customer_id", "customer_id"),
        FieldSpec::json("customer", "customer"),
        FieldSpec::json("line_items", "line_items"),
        FieldSpec::json("subtotal", "subtotal"),
        FieldSpec::json("tax", "tax"),
        FieldSpec::json("total", "total"),
        FieldSpec::json("shipping_address", "shipping_address"),
        FieldSpec::json("payments", "payments"),
        FieldSpec::json("placed_at", "placed_at"),
        FieldSpec::json("notes", "notes"),
    ];
}

impl Resource for Order {
    const OBJECT: &'static str = "order";

    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }
}

/// One line of a [`CreateOrderRequest`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LineItemInput {
    pub product_id: String,
    pub quantity: u32,
}

impl ApiObject for LineItemInput {
    const TYPE_NAME: &'static str = "LineItemInput";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::json("product_id", "product_id"),
        FieldSpec::json("quantity", "quantity"),
    ];
}

/// Body of `POST /v1/orders`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub line_items: Vec<LineItemInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    /// Sent as the `Idempotency-Key` header, not in the body.
    #[serde(skip)]
    pub idempotency_key: Option<String>,
}

impl ApiObject for CreateOrderRequest {
    const TYPE_NAME: &'static str = "CreateOrderRequest";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::json("customer_id", "customerId"),
        FieldSpec::json("line_items", "lineItems"),
        FieldSpec::json("shipping_address", "shippingAddress"),
        FieldSpec::json("coupon_code", "couponCode"),
        FieldSpec::exclude("idempotency_key"),
    ];
}
