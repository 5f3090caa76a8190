use chrono::{DateTime, Utc};
use dto_core::{ApiObject, FieldSpec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum EventType {
    #[serde(rename = "order.created")]
    OrderCreated,
    #[serde(rename = "order.paid")]
    OrderPaid,
    #[serde(rename = "order.fulfilled")]
    OrderFulfilled,
    #[serde(rename = "payment.failed")]
    PaymentFailed,
    #[serde(rename = "customer.updated")]
    CustomerUpdated,
}

/// A webhook delivery. `data` holds the affected resource, shaped by
/// `event_type`; it is kept untyped so new event types do not break parsing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub created_at: DateTime<Utc>,
    pub api_version: String,
    pub data: serde_json::Value,
    pub pending_webhooks: u32,
}

impl ApiObject for WebhookEvent {
    const TYPE_NAME: &'static str = "WebhookEvent";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::json("id", "id"),
        FieldSpec::json("event_type", "type"),
        FieldSpec::json("created_at", "created_at"),
        FieldSpec::json("api_version", "api_version"),
        FieldSpec::json("data", "data"),
        FieldSpec::json("pending_webhooks", "pending_webhooks"),
    ];
}
