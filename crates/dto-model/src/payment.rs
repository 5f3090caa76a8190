use chrono::{DateTime, Utc};
use dto_core::{ApiObject, FieldSpec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{Money, ResourceMeta};
use crate::resource::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Discover,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WalletProvider {
    ApplePay,
    GooglePay,
    Paypal,
}

/// How a payment was made. Tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentMethod {
    Card {
        brand: CardBrand,
        last4: String,
        exp_month: u8,
        exp_year: u16,
    },
    BankTransfer {
        bank_name: String,
        account_last4: String,
    },
    Wallet {
        provider: WalletProvider,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        account_email: Option<String>,
    },
}

impl ApiObject for PaymentMethod {
    const TYPE_NAME: &'static str = "PaymentMethod";
    // An enum declares no properties of its own.
    const FIELDS: &'static [FieldSpec] = &[];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Payment {
    #[serde(flatten)]
    pub meta: ResourceMeta,
    pub order_id: String,
    pub status: PaymentStatus,
    pub amount: Money,
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
}

impl ApiObject for Payment {
    const TYPE_NAME: &'static str = "Payment";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::inherit("meta", ResourceMeta::TYPE_NAME, ResourceMeta::FIELDS),
        FieldSpec::json("order_id", "order_id"),
        FieldSpec::json("status", "status"),
        FieldSpec::json("amount", "amount"),
        FieldSpec::json("method", "method"),
        FieldSpec::json("failure_reason", "failure_reason"),
        FieldSpec::json("captured_at", "captured_at"),
    ];
}

impl Resource for Payment {
    const OBJECT: &'static str = "payment";

    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }
}
