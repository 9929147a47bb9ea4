//! Database queries for listing transactions.

use rusqlite::{Connection, Row};
use time::Date;

use crate::{
    Error,
    database_id::{CategoryId, CurrencyId, TransactionId},
};

/// The order transactions are listed in: newest date first, then by the
/// manual sort order, then newest first.
///
/// Expects the transaction table to be aliased as `t`.
pub(crate) const TRANSACTION_ORDER: &str = "t.date DESC, t.sort_order ASC, t.id DESC";

/// The number of transactions shown per page of a category.
pub(crate) const TRANSACTIONS_PER_PAGE: u64 = 50;

/// A transaction joined with the symbol of its currency, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub id: TransactionId,
    pub date: Date,
    pub sort_order: i64,
    pub description: String,
    pub amount: f64,
    pub currency_symbol: String,
}

fn map_transaction_row(row: &Row) -> Result<TransactionRow, rusqlite::Error> {
    Ok(TransactionRow {
        id: row.get(0)?,
        date: row.get(1)?,
        sort_order: row.get(2)?,
        description: row.get(3)?,
        amount: row.get(4)?,
        currency_symbol: row.get(5)?,
    })
}

/// The number of rows to skip to reach `page`, saturating at the largest
/// offset SQLite accepts.
fn page_offset(page: u64) -> i64 {
    i64::try_from(page.saturating_mul(TRANSACTIONS_PER_PAGE)).unwrap_or(i64::MAX)
}

/// Get one page of the transactions in a category.
///
/// `page` is zero-based and holds [TRANSACTIONS_PER_PAGE] transactions.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_category_transactions(
    category_id: CategoryId,
    page: u64,
    connection: &Connection,
) -> Result<Vec<TransactionRow>, Error> {
    let query = format!(
        "SELECT t.id, t.date, t.sort_order, t.description, t.amount, c.symbol
        FROM \"transaction\" t
        INNER JOIN currency c ON t.currency_id = c.id
        WHERE t.category_id = ?1
        ORDER BY {TRANSACTION_ORDER}
        LIMIT ?2 OFFSET ?3"
    );

    connection
        .prepare(&query)?
        .query_map(
            (
                category_id,
                TRANSACTIONS_PER_PAGE as i64,
                page_offset(page),
            ),
            map_transaction_row,
        )?
        .map(|maybe_row| maybe_row.map_err(Error::from))
        .collect()
}

/// Get the transactions without a category dated between `start` and `end`,
/// inclusive.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_uncategorized_transactions(
    start: Date,
    end: Date,
    connection: &Connection,
) -> Result<Vec<TransactionRow>, Error> {
    let query = format!(
        "SELECT t.id, t.date, t.sort_order, t.description, t.amount, c.symbol
        FROM \"transaction\" t
        INNER JOIN currency c ON t.currency_id = c.id
        WHERE t.category_id IS NULL AND t.date BETWEEN ?1 AND ?2
        ORDER BY {TRANSACTION_ORDER}"
    );

    connection
        .prepare(&query)?
        .query_map((start, end), map_transaction_row)?
        .map(|maybe_row| maybe_row.map_err(Error::from))
        .collect()
}

/// Count the transactions in a category.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn count_category_transactions(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<u64, Error> {
    connection
        .query_row(
            "SELECT COUNT(id) FROM \"transaction\" WHERE category_id = ?1",
            [category_id],
            |row| row.get::<_, i64>(0),
        )
        .map(|count| count.max(0) as u64)
        .map_err(Error::from)
}

/// Count the transactions recorded in a currency.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn count_currency_transactions(
    currency_id: CurrencyId,
    connection: &Connection,
) -> Result<u64, Error> {
    connection
        .query_row(
            "SELECT COUNT(id) FROM \"transaction\" WHERE currency_id = ?1",
            [currency_id],
            |row| row.get::<_, i64>(0),
        )
        .map(|count| count.max(0) as u64)
        .map_err(Error::from)
}
