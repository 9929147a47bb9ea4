//! The transaction model and the functions for storing transactions.
//!
//! Transactions are only managed by seeding the database. The web app reads
//! them to list the transactions of a category, the uncategorized
//! transactions and the dependents of a currency.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    database_id::{CategoryId, CurrencyId, TransactionId},
};

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// Where transactions on the same date are placed relative to each other,
    /// lower values first.
    pub sort_order: i64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category of the transaction, e.g. "Groceries".
    pub category_id: Option<CategoryId>,
    /// The currency the amount is recorded in.
    pub currency_id: CurrencyId,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        amount: f64,
        date: Date,
        description: &str,
        currency_id: CurrencyId,
    ) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            sort_order: 0,
            description: description.to_owned(),
            category_id: None,
            currency_id,
        }
    }
}

/// Builder for creating a new [Transaction].
///
/// The function for finalizing the builder is [create_transaction].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionBuilder {
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// The position among the transactions on the same date.
    pub sort_order: i64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category of the transaction.
    pub category_id: Option<CategoryId>,
    /// The currency the amount is recorded in.
    pub currency_id: CurrencyId,
}

impl TransactionBuilder {
    /// Set the position of the transaction among the transactions on the same date.
    pub fn sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Set the category id for the transaction.
    pub fn category_id(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidReference] if the category or currency does not exist,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, date, sort_order, description, category_id, currency_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, amount, date, sort_order, description, category_id, currency_id",
        )?
        .query_row(
            (
                builder.amount,
                builder.date,
                builder.sort_order,
                builder.description,
                builder.category_id,
                builder.currency_id,
            ),
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidReference,
            error => error.into(),
        })?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
#[cfg(test)]
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, amount, date, sort_order, description, category_id, currency_id
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Create the transaction table in the database.
///
/// Deleting a category leaves its transactions without a category, while
/// deleting a currency that transactions are recorded in is refused.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount REAL NOT NULL,
            date TEXT NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0,
            description TEXT NOT NULL,
            category_id INTEGER,
            currency_id INTEGER NOT NULL,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE SET NULL,
            FOREIGN KEY(currency_id) REFERENCES currency(id) ON UPDATE CASCADE ON DELETE RESTRICT
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_category_date ON \"transaction\"(category_id, date);
        CREATE INDEX IF NOT EXISTS idx_transaction_currency ON \"transaction\"(currency_id);",
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        date: row.get(2)?,
        sort_order: row.get(3)?,
        description: row.get(4)?,
        category_id: row.get(5)?,
        currency_id: row.get(6)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        CategoryName, Error, NewCurrency, create_category, create_currency,
        db::initialize,
        transaction::{Transaction, create_transaction, get_transaction},
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn create_test_currency(conn: &Connection) -> i64 {
        create_currency(NewCurrency::new("EUR", "Euro", "€").unwrap(), conn)
            .expect("Could not create currency")
            .id
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let currency_id = create_test_currency(&conn);
        let category = create_category(CategoryName::new_unchecked("Groceries"), &conn)
            .expect("Could not create category");

        let result = create_transaction(
            Transaction::build(12.3, date!(2025 - 10 - 05), "Apples", currency_id)
                .sort_order(2)
                .category_id(Some(category.id)),
            &conn,
        );

        let transaction = result.expect("Could not create transaction");
        assert_eq!(transaction.amount, 12.3);
        assert_eq!(transaction.sort_order, 2);
        assert_eq!(transaction.category_id, Some(category.id));
        assert_eq!(get_transaction(transaction.id, &conn), Ok(transaction));
    }

    #[test]
    fn create_fails_on_invalid_currency_id() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build(123.45, date!(2025 - 10 - 04), "", 42),
            &conn,
        );

        assert_eq!(result, Err(Error::InvalidReference));
    }

    #[test]
    fn create_fails_on_invalid_category_id() {
        let conn = get_test_connection();
        let currency_id = create_test_currency(&conn);

        let result = create_transaction(
            Transaction::build(123.45, date!(2025 - 10 - 04), "", currency_id)
                .category_id(Some(42)),
            &conn,
        );

        assert_eq!(result, Err(Error::InvalidReference));
    }

    #[test]
    fn get_missing_transaction_returns_not_found() {
        let conn = get_test_connection();

        assert_eq!(get_transaction(1, &conn), Err(Error::NotFound));
    }
}
