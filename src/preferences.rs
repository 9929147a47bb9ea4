//! User preferences stored as key/value rows, such as the default currency.

use rusqlite::{Connection, OptionalExtension};

use crate::Error;

const DEFAULT_CURRENCY_KEY: &str = "default_currency";

/// The currency code used when no default currency has been chosen.
pub const FALLBACK_CURRENCY_CODE: &str = "EUR";

/// Create the preference table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_preference_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS preference (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Get the code of the default currency, e.g. "EUR".
///
/// Falls back to [FALLBACK_CURRENCY_CODE] if no default has been set.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_default_currency_code(connection: &Connection) -> Result<String, Error> {
    let code = connection
        .query_row(
            "SELECT value FROM preference WHERE key = ?1",
            [DEFAULT_CURRENCY_KEY],
            |row| row.get(0),
        )
        .optional()?;

    Ok(code.unwrap_or_else(|| FALLBACK_CURRENCY_CODE.to_owned()))
}

/// Save `code` as the default currency code, replacing any previous default.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn set_default_currency_code(code: &str, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO preference (key, value) VALUES (?1, ?2)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        (DEFAULT_CURRENCY_KEY, code),
    )?;

    Ok(())
}
