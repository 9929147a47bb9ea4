//! Currencies that transactions are recorded in.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod form;
mod list;

pub use create::{create_currency_endpoint, get_new_currency_page};
pub use db::{create_currency, create_currency_table, get_all_currencies, get_currency, update_currency};
pub use delete::{delete_currency_endpoint, get_delete_currency_page};
pub use domain::{Currency, CurrencyCode, NewCurrency};
pub use edit::{get_edit_currency_page, update_currency_endpoint};
pub use list::{get_currencies_page, set_default_currency_endpoint};
