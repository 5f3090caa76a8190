//! # dto-model
//!
//! Request and response entities of the storefront API client.
//!
//! Every wire type implements [`dto_core::ApiObject`] and lists each field's
//! directive in its `FIELDS` table. [`manifest`] publishes the exported types
//! so `dtocheck` can discover and verify them.

pub mod catalog;
pub mod client;
pub mod common;
pub mod customer;
pub mod error;
pub mod order;
pub mod page;
pub mod payment;
pub mod resource;
pub mod webhook;

use dto_core::{ManifestError, ModuleManifest};

pub use catalog::Product;
pub use client::ClientOptions;
pub use common::{Address, Currency, Money, Pagination, ResourceMeta};
pub use customer::Customer;
pub use error::{ApiError, ApiErrorKind, ErrorDetail};
pub use order::{CreateOrderRequest, LineItem, LineItemInput, Order, OrderStatus};
pub use page::{ListOrdersResponse, ListProductsResponse, Page};
pub use payment::{CardBrand, Payment, PaymentMethod, PaymentStatus, WalletProvider};
pub use resource::Resource;
pub use webhook::{EventType, WebhookEvent};

/// Module name used to declare this crate as a dependency.
pub const MODULE_NAME: &str = env!("CARGO_PKG_NAME");

/// Every type this crate exports.
///
/// # Errors
///
/// Returns a [`ManifestError`] if the registrations are inconsistent.
pub fn manifest() -> Result<ModuleManifest, ManifestError> {
    ModuleManifest::builder(MODULE_NAME, env!("CARGO_PKG_VERSION"))
        .object::<ResourceMeta>()
        .object::<Money>()
        .object::<Address>()
        .object::<Pagination>()
        .object::<Customer>()
        .object::<Product>()
        .object::<LineItem>()
        .object::<Order>()
        .object::<PaymentMethod>()
        .object::<Payment>()
        .object::<ErrorDetail>()
        .object::<ApiError>()
        .object::<WebhookEvent>()
        .object::<LineItemInput>()
        .object::<CreateOrderRequest>()
        .object::<ListOrdersResponse>()
        .object::<ListProductsResponse>()
        .generic_object("Page", 1)
        .abstract_object("Resource")
        .plain("ClientOptions")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_builds() {
        let manifest = manifest().unwrap();
        assert_eq!(manifest.name(), "dto-model");
        assert_eq!(manifest.types().len(), 20);
        assert!(manifest.find("Page").is_some_and(|t| t.hooks().is_none()));
        assert!(manifest.find("Resource").is_some_and(|t| t.is_abstract()));
    }
}
