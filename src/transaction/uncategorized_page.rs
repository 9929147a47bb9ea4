//! The page listing the transactions that have no category.

use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, Query, State};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, Month};

use crate::{
    AppState, Error, endpoints,
    flash::Flash,
    html::{BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, page},
    navigation::NavBar,
    session::pop_flash,
    timezone::local_today,
};

use super::{
    query::{TransactionRow, get_uncategorized_transactions},
    view::{DATE_FORMAT, format_date, transaction_table},
};

/// The state needed for the uncategorized transactions page.
#[derive(Debug, Clone)]
pub struct UncategorizedPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UncategorizedPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The optional date range of the uncategorized transactions page, as ISO
/// dates, e.g. "2024-03-01".
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// The first and last day of the month that `date` falls in.
fn month_bounds(date: Date) -> (Date, Date) {
    let start = date.replace_day(1).unwrap_or(date);
    let next_month_start = match date.month() {
        Month::December => Date::from_calendar_date(date.year() + 1, Month::January, 1),
        month => Date::from_calendar_date(date.year(), month.next(), 1),
    };
    let end = next_month_start
        .ok()
        .and_then(Date::previous_day)
        .unwrap_or(date);

    (start, end)
}

fn parse_date(value: Option<&str>) -> Option<Date> {
    let value = value?.trim();

    if value.is_empty() {
        return None;
    }

    Date::parse(value, DATE_FORMAT)
        .inspect_err(|error| tracing::warn!("Ignoring invalid date \"{value}\": {error}"))
        .ok()
}

/// Resolve the inclusive date range to list, defaulting to the month of `today`.
///
/// Bounds that are missing or cannot be parsed take their default.
fn resolve_range(query: &DateRangeQuery, today: Date) -> (Date, Date) {
    let (month_start, month_end) = month_bounds(today);

    (
        parse_date(query.start.as_deref()).unwrap_or(month_start),
        parse_date(query.end.as_deref()).unwrap_or(month_end),
    )
}

/// Render the transactions without a category dated within the requested range.
pub async fn get_uncategorized_page(
    State(state): State<UncategorizedPageState>,
    jar: PrivateCookieJar,
    Query(query): Query<DateRangeQuery>,
) -> Result<(PrivateCookieJar, Markup), Error> {
    let today = local_today(&state.local_timezone)?;
    let (start, end) = resolve_range(&query, today);

    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_uncategorized_transactions(start, end, &connection)?
    };

    let (jar, flash) = pop_flash(jar)?;

    Ok((jar, uncategorized_view(start, end, &transactions, flash)))
}

fn uncategorized_view(
    start: Date,
    end: Date,
    transactions: &[TransactionRow],
    flash: Option<Flash>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::UNCATEGORIZED_VIEW).into_html();

    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="relative w-full max-w-4xl overflow-x-auto"
            {
                h1 class="text-xl font-bold mb-4" { "Uncategorized transactions" }

                form
                    method="get"
                    action=(endpoints::UNCATEGORIZED_VIEW)
                    class="flex flex-wrap items-end gap-4 mb-4"
                {
                    div
                    {
                        label for="start" class=(FORM_LABEL_STYLE) { "From" }
                        input
                            id="start"
                            type="date"
                            name="start"
                            value=(format_date(start))
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    div
                    {
                        label for="end" class=(FORM_LABEL_STYLE) { "To" }
                        input
                            id="end"
                            type="date"
                            name="end"
                            value=(format_date(end))
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    div { button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Show" } }
                }

                (transaction_table(transactions, "No uncategorized transactions in this range."))
            }
        }
    };

    page("Uncategorized", nav_bar, flash, &content)
}
