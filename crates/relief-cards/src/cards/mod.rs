// SPDX-License-Identifier: Apache-2.0

//! Company-list card kinds.

mod discount;
mod free_product;
mod pickup;
mod service;

use crate::registry::CardRegistry;

pub use discount::DiscountRow;
pub use free_product::FreeProductRow;
pub use pickup::PickupRow;
pub use service::ServiceRow;

pub const FREE_PRODUCT_CARD: &str = "FreeProductCard";
pub const DISCOUNT_CARD: &str = "DiscountCard";
pub const PICKUP_CARD: &str = "PickupCard";
pub const SERVICE_CARD: &str = "ServiceCard";

pub fn register_builtin(registry: &mut CardRegistry) {
    registry
        .register(FREE_PRODUCT_CARD, FreeProductRow::shape(), FreeProductRow::render)
        .register(DISCOUNT_CARD, DiscountRow::shape(), DiscountRow::render)
        .register(PICKUP_CARD, PickupRow::shape(), PickupRow::render)
        .register(SERVICE_CARD, ServiceRow::shape(), ServiceRow::render);
}
