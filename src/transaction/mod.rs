//! Transactions recorded in a currency and optionally assigned a category.

mod core;
mod query;
mod uncategorized_page;
mod view;

pub use core::{Transaction, TransactionBuilder, create_transaction, create_transaction_table};
pub use query::{
    TransactionRow, count_category_transactions, count_currency_transactions,
    get_category_transactions,
};
pub(crate) use query::{TRANSACTION_ORDER, TRANSACTIONS_PER_PAGE};
pub use uncategorized_page::get_uncategorized_page;
pub(crate) use view::{format_date, transaction_table};

#[cfg(test)]
pub use core::get_transaction;
