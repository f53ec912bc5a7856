// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local catalog reads and inventory writes.

use rusqlite::types::Value;
use rusqlite::{OptionalExtension, Row, params, params_from_iter};
use storefront_core::StorefrontError;
use storefront_core::types::{CatalogFilter, NewProduct, Product, ProductStatus, ProductUpdate};

use crate::database::{Database, FOLD_CASE, conversion_err, map_tr_err};
use crate::queries::NOW;

const PRODUCT_COLUMNS: &str = "id, name, price, original_price, category, condition, image, \
                               stock, status, specs, created_at, updated_at";

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    let status: String = row.get(8)?;
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        price: row.get(2)?,
        original_price: row.get(3)?,
        category: row.get(4)?,
        condition: row.get(5)?,
        image: row.get(6)?,
        stock: row.get(7)?,
        status: status.parse().map_err(|e| conversion_err(8, e))?,
        specs: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

fn select_product(conn: &rusqlite::Connection, id: i64) -> rusqlite::Result<Option<Product>> {
    conn.query_row(
        &format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"),
        params![id],
        product_from_row,
    )
    .optional()
}

/// Escape `%`, `_` and the escape character itself for a `LIKE ... ESCAPE '\'`.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Build the WHERE/ORDER/LIMIT tail and its bound values for a catalog filter.
fn filter_sql(filter: &CatalogFilter) -> (String, Vec<Value>) {
    let mut clauses: Vec<String> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(category) = &filter.category {
        values.push(Value::Text(category.clone()));
        clauses.push(format!("category = ?{}", values.len()));
    }
    if let Some(name) = filter.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        values.push(Value::Text(format!("%{}%", escape_like(&name.to_lowercase()))));
        clauses.push(format!(
            "{FOLD_CASE}(name) LIKE ?{} ESCAPE '\\'",
            values.len()
        ));
    }
    if let Some(min) = filter.min_price {
        values.push(Value::Real(min));
        clauses.push(format!("price >= ?{}", values.len()));
    }
    if let Some(max) = filter.max_price {
        values.push(Value::Real(max));
        clauses.push(format!("price <= ?{}", values.len()));
    }
    if !filter.statuses.is_empty() {
        let placeholders: Vec<String> = filter
            .statuses
            .iter()
            .map(|status| {
                values.push(Value::Text(status.to_string()));
                format!("?{}", values.len())
            })
            .collect();
        clauses.push(format!("status IN ({})", placeholders.join(", ")));
    }

    let mut sql = String::new();
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    values.push(Value::Integer(i64::try_from(filter.limit).unwrap_or(i64::MAX)));
    sql.push_str(&format!(" ORDER BY created_at DESC, id DESC LIMIT ?{}", values.len()));
    values.push(Value::Integer(i64::try_from(filter.offset).unwrap_or(i64::MAX)));
    sql.push_str(&format!(" OFFSET ?{}", values.len()));

    (sql, values)
}

/// Products matching every present filter, newest first.
pub async fn find_products(
    db: &Database,
    filter: &CatalogFilter,
) -> Result<Vec<Product>, StorefrontError> {
    if filter.limit == 0 {
        return Ok(Vec::new());
    }
    let (tail, values) = filter_sql(filter);
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products{tail}");
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(values), product_from_row)?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}

/// A single product by id.
pub async fn get_product(db: &Database, id: i64) -> Result<Option<Product>, StorefrontError> {
    db.connection()
        .call(move |conn| select_product(conn, id))
        .await
        .map_err(map_tr_err)
}

/// Insert a product and return the stored row.
pub async fn create_product(
    db: &Database,
    product: &NewProduct,
) -> Result<Product, StorefrontError> {
    let product = product.clone();
    let status = if product.stock <= 0 && product.status == ProductStatus::Available {
        ProductStatus::SoldOut
    } else {
        product.status
    };
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO products
                     (name, price, original_price, category, condition, image, stock, status, specs)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    product.name,
                    product.price,
                    product.original_price,
                    product.category,
                    product.condition,
                    product.image,
                    product.stock,
                    status.to_string(),
                    product.specs,
                ],
            )?;
            let id = conn.last_insert_rowid();
            select_product(conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
        })
        .await
        .map_err(map_tr_err)
}

/// Status after an edit.
///
/// An available product with no stock becomes sold out. Restocking a sold-out
/// product makes it available again unless the edit names a status.
fn resolve_status(current: &Product, update: &ProductUpdate, stock: i64) -> ProductStatus {
    let status = update.status.unwrap_or(current.status);
    match status {
        ProductStatus::Available if stock <= 0 => ProductStatus::SoldOut,
        ProductStatus::SoldOut if update.status.is_none() && update.stock.is_some() && stock > 0 => {
            ProductStatus::Available
        }
        other => other,
    }
}

/// Apply a partial edit. `None` when the product does not exist.
pub async fn update_product(
    db: &Database,
    id: i64,
    update: &ProductUpdate,
) -> Result<Option<Product>, StorefrontError> {
    let update = update.clone();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let Some(current) = select_product(&tx, id)? else {
                return Ok(None);
            };
            let stock = update.stock.unwrap_or(current.stock);
            let status = resolve_status(&current, &update, stock);
            tx.execute(
                &format!(
                    "UPDATE products
                     SET price = ?1, original_price = ?2, stock = ?3, status = ?4, updated_at = {NOW}
                     WHERE id = ?5"
                ),
                params![
                    update.price.unwrap_or(current.price),
                    update.original_price.unwrap_or(current.original_price),
                    stock,
                    status.to_string(),
                    id,
                ],
            )?;
            let updated = select_product(&tx, id)?;
            tx.commit()?;
            Ok(updated)
        })
        .await
        .map_err(map_tr_err)
}

/// Hard-delete a product. Returns whether a row was removed.
pub async fn delete_product(db: &Database, id: i64) -> Result<bool, StorefrontError> {
    db.connection()
        .call(move |conn| {
            let removed = conn.execute("DELETE FROM products WHERE id = ?1", params![id])?;
            Ok(removed > 0)
        })
        .await
        .map_err(map_tr_err)
}
