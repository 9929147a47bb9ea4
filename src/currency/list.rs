//! Currencies listing page and the endpoint for choosing the default currency.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    Error,
    app_state::DbState,
    currency::{Currency, get_all_currencies, get_currency},
    database_id::CurrencyId,
    endpoints::{self, format_endpoint},
    flash::Flash,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        link, page,
    },
    navigation::NavBar,
    preferences::{get_default_currency_code, set_default_currency_code},
    session::{load_session, pop_flash, store_session},
};

/// Render the currencies listing page, marking the default currency.
pub async fn get_currencies_page(
    State(state): State<DbState>,
    jar: PrivateCookieJar,
) -> Result<(PrivateCookieJar, Markup), Error> {
    let (currencies, default_code) = {
        let connection = state.lock()?;
        let currencies = get_all_currencies(&connection)
            .inspect_err(|error| tracing::error!("Failed to retrieve currencies: {error}"))?;
        let default_code = get_default_currency_code(&connection)?;
        (currencies, default_code)
    };

    let (jar, flash) = pop_flash(jar)?;

    Ok((jar, currencies_view(&currencies, &default_code, flash)))
}

/// Make a currency the default currency.
pub async fn set_default_currency_endpoint(
    Path(currency_id): Path<CurrencyId>,
    State(state): State<DbState>,
    jar: PrivateCookieJar,
) -> Response {
    let currency = {
        let connection = match state.lock() {
            Ok(connection) => connection,
            Err(error) => return error.into_alert_response(),
        };

        let currency = match get_currency(currency_id, &connection) {
            Ok(currency) => currency,
            Err(error) => return error.into_alert_response(),
        };

        if let Err(error) = set_default_currency_code(currency.code.as_ref(), &connection) {
            tracing::error!("Could not set the default currency to {}: {error}", currency.code);
            return error.into_alert_response();
        }

        currency
    };

    let mut session = load_session(&jar);
    session.flash(Flash::success(format!(
        "{} is now the default currency.",
        currency.name
    )));

    match store_session(jar, &session) {
        Ok(jar) => (
            jar,
            HxRedirect(endpoints::CURRENCIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => error.into_alert_response(),
    }
}

fn currency_row(currency: &Currency, is_default: bool) -> Markup {
    let edit_url = format_endpoint(endpoints::EDIT_CURRENCY_VIEW, currency.id);
    let delete_url = format_endpoint(endpoints::DELETE_CURRENCY_VIEW, currency.id);
    let default_url = format_endpoint(endpoints::DEFAULT_CURRENCY, currency.id);

    html! {
        tr class=(TABLE_ROW_STYLE) data-currency-row="true"
        {
            td class=(TABLE_CELL_STYLE) { (currency.code) }
            td class=(TABLE_CELL_STYLE)
            {
                (currency.name)
                @if is_default {
                    " "
                    span
                        data-default-currency="true"
                        class="text-xs font-medium px-2 py-0.5 rounded
                            bg-blue-100 text-blue-800 dark:bg-blue-900 dark:text-blue-300"
                    {
                        "default"
                    }
                }
            }
            td class=(TABLE_CELL_STYLE) { (currency.symbol) }

            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    (link(&edit_url, "Edit"))
                    (link(&delete_url, "Delete"))

                    @if !is_default {
                        button
                            hx-post=(default_url)
                            hx-target-error="#alert-container"
                            class=(LINK_STYLE)
                        {
                            "Make default"
                        }
                    }
                }
            }
        }
    }
}

fn currencies_view(currencies: &[Currency], default_code: &str, flash: Option<Flash>) -> Markup {
    let new_currency_route = endpoints::NEW_CURRENCY_VIEW;
    let nav_bar = NavBar::new(endpoints::CURRENCIES_VIEW).into_html();

    let content = html!(
        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Currencies" }

                    a href=(new_currency_route) class=(LINK_STYLE)
                    {
                        "Create Currency"
                    }
                }

                table class="w-full text-sm text-left rtl:text-right
                    text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Code" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Symbol" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for currency in currencies {
                            (currency_row(currency, currency.code.as_ref() == default_code))
                        }

                        @if currencies.is_empty() {
                            tr
                            {
                                td
                                    colspan="4"
                                    class="px-6 py-4 text-center
                                        text-gray-500 dark:text-gray-400"
                                {
                                    "No currencies created yet. "
                                    a href=(new_currency_route) class=(LINK_STYLE)
                                    {
                                        "Create your first currency"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    page("Currencies", nav_bar, flash, &content)
}
