//! HTML rendering for lists of transactions.

use maud::{Markup, html};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_amount};

use super::query::TransactionRow;

/// The ISO 8601 format used for displaying dates and in date query parameters.
pub(crate) const DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");

fn amount_class(amount: f64) -> &'static str {
    if amount < 0.0 {
        "text-red-700 dark:text-red-300"
    } else {
        "text-green-700 dark:text-green-300"
    }
}

/// Format `date` as an ISO 8601 date, e.g. "2024-03-01".
pub(crate) fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

/// A table of transactions in the order given, or `empty_message` if there are none.
pub(crate) fn transaction_table(rows: &[TransactionRow], empty_message: &str) -> Markup {
    html! {
        table class="w-full my-2 text-sm text-left rtl:text-right
            text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                    th scope="col" class="px-6 py-3 text-right" { "Amount" }
                }
            }

            tbody
            {
                @for row in rows {
                    tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
                    {
                        td class=(TABLE_CELL_STYLE)
                        {
                            time datetime=(format_date(row.date)) { (format_date(row.date)) }
                        }
                        td class=(TABLE_CELL_STYLE) { (row.description) }
                        td class={ "px-6 py-4 text-right " (amount_class(row.amount)) }
                        {
                            (format_amount(row.amount, &row.currency_symbol))
                        }
                    }
                }

                @if rows.is_empty() {
                    tr
                    {
                        td colspan="3" data-empty-state="true" class="px-6 py-4 text-center"
                        {
                            (empty_message)
                        }
                    }
                }
            }
        }
    }
}
