// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sales, payment transitions and the archive.

use rusqlite::types::Value;
use rusqlite::{OptionalExtension, Row, params, params_from_iter};
use storefront_core::StorefrontError;
use storefront_core::types::{
    ArchivedSale, Buyer, Delivery, FulfillmentChange, FulfillmentStatus, NewSale, PaymentStatus,
    PaymentTransition, Sale, SaleFilter, SaleLine,
};

use crate::database::{Database, conversion_err, map_tr_err};
use crate::queries::NOW;

const SALE_COLUMNS: &str = "id, reference, buyer_name, buyer_email, buyer_phone, \
                            delivery_address, delivery_city, delivery_notes, items, \
                            total_amount, currency, payment_status, fulfillment_status, \
                            created_at, updated_at";

fn sale_from_row(row: &Row<'_>) -> rusqlite::Result<Sale> {
    let items: String = row.get(8)?;
    let items: Vec<SaleLine> = serde_json::from_str(&items).map_err(|e| conversion_err(8, e))?;
    let payment: String = row.get(11)?;
    let fulfillment: String = row.get(12)?;
    Ok(Sale {
        id: row.get(0)?,
        reference: row.get(1)?,
        buyer: Buyer {
            name: row.get(2)?,
            email: row.get(3)?,
            phone: row.get(4)?,
        },
        delivery: Delivery {
            address: row.get(5)?,
            city: row.get(6)?,
            notes: row.get(7)?,
        },
        items,
        total_amount: row.get(9)?,
        currency: row.get(10)?,
        payment_status: payment.parse().map_err(|e| conversion_err(11, e))?,
        fulfillment_status: fulfillment.parse().map_err(|e| conversion_err(12, e))?,
        created_at: row.get(13)?,
        updated_at: row.get(14)?,
    })
}

fn select_sale(conn: &rusqlite::Connection, id: i64) -> rusqlite::Result<Option<Sale>> {
    conn.query_row(
        &format!("SELECT {SALE_COLUMNS} FROM sales WHERE id = ?1"),
        params![id],
        sale_from_row,
    )
    .optional()
}

/// Insert a pending sale and return the stored row.
pub async fn create_sale(db: &Database, sale: &NewSale) -> Result<Sale, StorefrontError> {
    let items = serde_json::to_string(&sale.items).map_err(|e| StorefrontError::Storage {
        source: Box::new(e),
    })?;
    let sale = sale.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO sales
                     (reference, buyer_name, buyer_email, buyer_phone,
                      delivery_address, delivery_city, delivery_notes,
                      items, total_amount, currency)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    sale.reference,
                    sale.buyer.name,
                    sale.buyer.email,
                    sale.buyer.phone,
                    sale.delivery.address,
                    sale.delivery.city,
                    sale.delivery.notes,
                    items,
                    sale.total_amount,
                    sale.currency,
                ],
            )?;
            let id = conn.last_insert_rowid();
            select_sale(conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
        })
        .await
        .map_err(map_tr_err)
}

/// A live sale by id. Archived sales are not returned.
pub async fn get_sale(db: &Database, id: i64) -> Result<Option<Sale>, StorefrontError> {
    db.connection()
        .call(move |conn| select_sale(conn, id))
        .await
        .map_err(map_tr_err)
}

/// Live sales, newest first, optionally filtered by status.
pub async fn list_sales(db: &Database, filter: SaleFilter) -> Result<Vec<Sale>, StorefrontError> {
    let mut clauses = Vec::new();
    let mut values: Vec<Value> = Vec::new();
    if let Some(status) = filter.payment_status {
        values.push(Value::Text(status.to_string()));
        clauses.push(format!("payment_status = ?{}", values.len()));
    }
    if let Some(status) = filter.fulfillment_status {
        values.push(Value::Text(status.to_string()));
        clauses.push(format!("fulfillment_status = ?{}", values.len()));
    }
    let mut sql = format!("SELECT {SALE_COLUMNS} FROM sales");
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY created_at DESC, id DESC");

    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(values), sale_from_row)?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}

/// Move a sale's payment status to completed.
///
/// The update is conditional on the current status, so a repeated call
/// changes nothing and reports [`PaymentTransition::AlreadyCompleted`].
pub async fn mark_sale_paid(
    db: &Database,
    id: i64,
) -> Result<Option<PaymentTransition>, StorefrontError> {
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                &format!(
                    "UPDATE sales SET payment_status = ?1, updated_at = {NOW}
                     WHERE id = ?2 AND payment_status != ?1"
                ),
                params![PaymentStatus::Completed.to_string(), id],
            )?;
            if changed > 0 {
                return Ok(Some(PaymentTransition::Completed));
            }
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM sales WHERE id = ?1)",
                params![id],
                |row| row.get(0),
            )?;
            Ok(exists.then_some(PaymentTransition::AlreadyCompleted))
        })
        .await
        .map_err(map_tr_err)
}

/// Set a sale's fulfillment status.
///
/// Delivered and cancelled sales are copied into `archived_sales` and removed
/// from `sales` in the same transaction.
pub async fn set_fulfillment(
    db: &Database,
    id: i64,
    status: FulfillmentStatus,
) -> Result<Option<FulfillmentChange>, StorefrontError> {
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let changed = tx.execute(
                &format!(
                    "UPDATE sales SET fulfillment_status = ?1, updated_at = {NOW} WHERE id = ?2"
                ),
                params![status.to_string(), id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            let Some(sale) = select_sale(&tx, id)? else {
                return Ok(None);
            };

            let archived = status.is_terminal();
            if archived {
                tx.execute(
                    &format!(
                        "INSERT INTO archived_sales ({SALE_COLUMNS}, archived_at)
                         SELECT {SALE_COLUMNS}, {NOW} FROM sales WHERE id = ?1"
                    ),
                    params![id],
                )?;
                tx.execute("DELETE FROM sales WHERE id = ?1", params![id])?;
            }
            tx.commit()?;
            Ok(Some(FulfillmentChange { sale, archived }))
        })
        .await
        .map_err(map_tr_err)
}

/// Every archived sale, most recently archived first.
pub async fn list_archived_sales(db: &Database) -> Result<Vec<ArchivedSale>, StorefrontError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SALE_COLUMNS}, archived_at FROM archived_sales
                 ORDER BY archived_at DESC, id DESC"
            ))?;
            let rows = stmt.query_map([], |row| {
                Ok(ArchivedSale {
                    sale: sale_from_row(row)?,
                    archived_at: row.get(15)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}
