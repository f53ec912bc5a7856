// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Confirmation email content.

use std::fmt::Write as _;

use lettre::Message;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;

use storefront_core::StorefrontError;
use storefront_core::types::Sale;

pub fn subject(sale: &Sale) -> String {
    format!("Payment received for order #{}", sale.id)
}

/// Plain-text receipt listing each line, the total and the delivery address.
pub fn render_body(sale: &Sale) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "Hi {},", sale.buyer.name);
    let _ = writeln!(body);
    let _ = writeln!(
        body,
        "We have received your payment for order #{} (reference {}).",
        sale.id, sale.reference
    );
    let _ = writeln!(body);
    for line in &sale.items {
        let _ = writeln!(
            body,
            "  {} x {}  {} {:.2}",
            line.quantity,
            line.name,
            sale.currency,
            line.subtotal()
        );
    }
    let _ = writeln!(body);
    let _ = writeln!(body, "Total: {} {:.2}", sale.currency, sale.total_amount);
    let _ = writeln!(body);
    let _ = writeln!(
        body,
        "Delivery to: {}, {}",
        sale.delivery.address, sale.delivery.city
    );
    if let Some(notes) = sale.delivery.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        let _ = writeln!(body, "Notes: {notes}");
    }
    let _ = writeln!(body);
    let _ = writeln!(body, "We will be in touch when your order ships.");
    body
}

/// Build the buyer's confirmation, blind-copying `admin` when set.
pub fn confirmation_message(
    sale: &Sale,
    from: &Mailbox,
    admin: Option<&Mailbox>,
) -> Result<Message, StorefrontError> {
    let to: Mailbox = sale.buyer.email.trim().parse().map_err(|e| {
        StorefrontError::Notification {
            message: format!("invalid buyer address `{}`", sale.buyer.email),
            source: Some(Box::new(e)),
        }
    })?;

    let mut builder = Message::builder()
        .from(from.clone())
        .to(to)
        .subject(subject(sale))
        .header(ContentType::TEXT_PLAIN);
    if let Some(admin) = admin {
        builder = builder.bcc(admin.clone());
    }
    builder
        .body(render_body(sale))
        .map_err(|e| StorefrontError::Notification {
            message: "could not build confirmation email".into(),
            source: Some(Box::new(e)),
        })
}
