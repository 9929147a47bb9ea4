//! Database operations for currencies.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    currency::{Currency, CurrencyCode, NewCurrency},
    database_id::CurrencyId,
};

fn map_constraint_error(error: rusqlite::Error, code: &CurrencyCode) -> Error {
    match error {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: _,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
            },
            _,
        ) => Error::DuplicateCurrencyCode(code.to_string()),
        error => error.into(),
    }
}

/// Create a currency and return it with its generated ID.
///
/// # Errors
/// Returns [Error::DuplicateCurrencyCode] if a currency with the same code exists.
pub fn create_currency(currency: NewCurrency, connection: &Connection) -> Result<Currency, Error> {
    connection
        .execute(
            "INSERT INTO currency (code, name, symbol) VALUES (?1, ?2, ?3);",
            (currency.code.as_ref(), &currency.name, &currency.symbol),
        )
        .map_err(|error| map_constraint_error(error, &currency.code))?;

    let id = connection.last_insert_rowid();

    Ok(Currency {
        id,
        code: currency.code,
        name: currency.name,
        symbol: currency.symbol,
    })
}

/// Retrieve a single currency by ID.
pub fn get_currency(currency_id: CurrencyId, connection: &Connection) -> Result<Currency, Error> {
    connection
        .prepare("SELECT id, code, name, symbol FROM currency WHERE id = :id;")?
        .query_row(&[(":id", &currency_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all currencies ordered by code.
pub fn get_all_currencies(connection: &Connection) -> Result<Vec<Currency>, Error> {
    connection
        .prepare("SELECT id, code, name, symbol FROM currency ORDER BY code ASC;")?
        .query_map([], map_row)?
        .map(|maybe_currency| maybe_currency.map_err(|error| error.into()))
        .collect()
}

/// Replace the code, name and symbol of a currency.
///
/// # Errors
/// Returns [Error::UpdateMissingCurrency] if there is no currency with `currency_id`,
/// or [Error::DuplicateCurrencyCode] if another currency already has the code.
pub fn update_currency(
    currency_id: CurrencyId,
    currency: NewCurrency,
    connection: &Connection,
) -> Result<Currency, Error> {
    let rows_affected = connection
        .execute(
            "UPDATE currency SET code = ?1, name = ?2, symbol = ?3 WHERE id = ?4",
            (
                currency.code.as_ref(),
                &currency.name,
                &currency.symbol,
                currency_id,
            ),
        )
        .map_err(|error| map_constraint_error(error, &currency.code))?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCurrency);
    }

    Ok(Currency {
        id: currency_id,
        code: currency.code,
        name: currency.name,
        symbol: currency.symbol,
    })
}

/// Delete a currency by ID.
///
/// # Errors
/// Returns [Error::DeleteMissingCurrency] if there is no currency with `currency_id`,
/// or [Error::HasDependents] if transactions are still recorded in the currency.
pub fn delete_currency(currency_id: CurrencyId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection
        .execute("DELETE FROM currency WHERE id = ?1", [currency_id])
        .map_err(|error| match error {
            // SQLite reports `ON DELETE RESTRICT` as a trigger constraint.
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code:
                        rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
                        | rusqlite::ffi::SQLITE_CONSTRAINT_TRIGGER,
                },
                _,
            ) => Error::HasDependents,
            error => error.into(),
        })?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingCurrency);
    }

    Ok(())
}

/// Initialize the currency table.
pub fn create_currency_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS currency (
            id INTEGER PRIMARY KEY,
            code TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            symbol TEXT NOT NULL
        );",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Currency, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_code: String = row.get(1)?;

    Ok(Currency {
        id,
        code: CurrencyCode::new_unchecked(&raw_code),
        name: row.get(2)?,
        symbol: row.get(3)?,
    })
}
