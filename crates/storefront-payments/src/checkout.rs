// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Checkout: price a cart, record a pending sale and open a gateway session.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use storefront_core::types::{
    Buyer, Delivery, NewSale, ProductStatus, SaleLine, TransactionRequest,
};
use storefront_core::{PaymentGateway, StorageAdapter, StorefrontError};

/// One cart line as sent by the storefront. Prices are never trusted from
/// the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub buyer: Buyer,
    pub delivery: Delivery,
    pub items: Vec<CartLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order_id: i64,
    pub reference: String,
    pub authorization_url: String,
    pub total_amount: f64,
    pub currency: String,
}

pub struct CheckoutService {
    storage: Arc<dyn StorageAdapter>,
    gateway: Option<Arc<dyn PaymentGateway>>,
    currency: String,
}

impl CheckoutService {
    /// `gateway` is `None` when no secret key is configured; checkout then
    /// answers `NotConfigured` without touching storage.
    pub fn new(
        storage: Arc<dyn StorageAdapter>,
        gateway: Option<Arc<dyn PaymentGateway>>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            gateway,
            currency: currency.into(),
        }
    }

    pub async fn checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutResponse, StorefrontError> {
        let gateway = self
            .gateway
            .as_ref()
            .ok_or_else(|| StorefrontError::NotConfigured("payments.secret_key".into()))?;

        validate_contact(&request.buyer, &request.delivery)?;
        let lines = self.price_cart(&request.items).await?;
        let total = round_cents(lines.iter().map(SaleLine::subtotal).sum());

        let sale = self
            .storage
            .create_sale(&NewSale {
                reference: format!("SF-{}", uuid::Uuid::new_v4().simple()),
                buyer: request.buyer.clone(),
                delivery: request.delivery.clone(),
                items: lines,
                total_amount: total,
                currency: self.currency.clone(),
            })
            .await?;

        let init = gateway
            .initialize_transaction(&TransactionRequest {
                order_id: sale.id,
                reference: sale.reference.clone(),
                email: sale.buyer.email.clone(),
                amount_minor: to_minor_units(total),
                currency: sale.currency.clone(),
            })
            .await
            .inspect_err(|e| {
                warn!(order_id = sale.id, error = %e, "payment initialization failed; sale left pending");
            })?;

        info!(order_id = sale.id, reference = %sale.reference, total, "checkout started");
        Ok(CheckoutResponse {
            order_id: sale.id,
            reference: sale.reference,
            authorization_url: init.authorization_url,
            total_amount: total,
            currency: sale.currency,
        })
    }

    /// Resolve every cart line against the catalog. Repeated products are
    /// folded into one line.
    async fn price_cart(&self, cart: &[CartLine]) -> Result<Vec<SaleLine>, StorefrontError> {
        if cart.is_empty() {
            return Err(StorefrontError::Validation("cart is empty".into()));
        }

        let mut folded: Vec<CartLine> = Vec::with_capacity(cart.len());
        for line in cart {
            if line.quantity == 0 {
                return Err(StorefrontError::Validation(format!(
                    "quantity for product {} must be positive",
                    line.product_id
                )));
            }
            match folded.iter_mut().find(|l| l.product_id == line.product_id) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
                None => folded.push(line.clone()),
            }
        }

        let mut lines = Vec::with_capacity(folded.len());
        for line in folded {
            let product = self
                .storage
                .get_product(line.product_id)
                .await?
                .ok_or_else(|| {
                    StorefrontError::Validation(format!("product {} does not exist", line.product_id))
                })?;
            if !product.status.is_purchasable() {
                return Err(StorefrontError::Validation(format!(
                    "{} is not available ({})",
                    product.name, product.status
                )));
            }
            if product.status == ProductStatus::Available && product.stock < i64::from(line.quantity)
            {
                return Err(StorefrontError::Validation(format!(
                    "only {} of {} left in stock",
                    product.stock, product.name
                )));
            }
            lines.push(SaleLine {
                product_id: product.id,
                name: product.name,
                quantity: line.quantity,
                unit_price: product.price,
            });
        }
        Ok(lines)
    }
}

fn validate_contact(buyer: &Buyer, delivery: &Delivery) -> Result<(), StorefrontError> {
    if buyer.name.trim().is_empty() {
        return Err(StorefrontError::Validation("buyer name is required".into()));
    }
    let email = buyer.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(StorefrontError::Validation(
            "a valid buyer email is required".into(),
        ));
    }
    if delivery.address.trim().is_empty() || delivery.city.trim().is_empty() {
        return Err(StorefrontError::Validation(
            "delivery address and city are required".into(),
        ));
    }
    Ok(())
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_units_round_half_cents() {
        assert_eq!(to_minor_units(900.0), 90_000);
        assert_eq!(to_minor_units(19.99), 1_999);
        assert_eq!(to_minor_units(0.1 + 0.2), 30);
        assert_eq!(round_cents(0.1 + 0.2), 0.3);
    }

    #[test]
    fn contact_validation() {
        let buyer = Buyer {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: None,
        };
        let delivery = Delivery {
            address: "1 Main St".into(),
            city: "Abuja".into(),
            notes: None,
        };
        assert!(validate_contact(&buyer, &delivery).is_ok());

        let bad_email = Buyer {
            email: "not-an-email".into(),
            ..buyer.clone()
        };
        assert!(validate_contact(&bad_email, &delivery).is_err());

        let no_city = Delivery {
            city: " ".into(),
            ..delivery
        };
        assert!(validate_contact(&buyer, &no_city).is_err());
    }
}
