//! Currency deletion confirmation page and endpoint.
//!
//! A currency that transactions are recorded in cannot be deleted. Both the
//! confirmation page and the endpoint check for transactions and send the user
//! back to the currency list with an error message instead.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    Error,
    app_state::DbState,
    currency::{Currency, db::delete_currency, domain::DELETE_CURRENCY, get_currency},
    database_id::CurrencyId,
    endpoints::{self, format_endpoint},
    flash::Flash,
    flow::PreviousUrl,
    html::{BUTTON_DELETE_STYLE, BUTTON_SECONDARY_STYLE, FORM_CONTAINER_STYLE, page},
    navigation::NavBar,
    session::{load_session, store_session},
    transaction::count_currency_transactions,
};

fn blocked_delete_flash(currency: &Currency) -> Flash {
    Flash::error(format!(
        "Cannot delete {} ({}) because there are still transactions attached to it.",
        currency.name, currency.code
    ))
}

/// Render the page asking the user to confirm deleting a currency, or go back
/// to the currency list if the currency is still in use.
pub async fn get_delete_currency_page(
    Path(currency_id): Path<CurrencyId>,
    State(state): State<DbState>,
    previous_url: PreviousUrl,
    jar: PrivateCookieJar,
) -> Result<Response, Error> {
    let (currency, transaction_count) = {
        let connection = state.lock()?;
        let currency = get_currency(currency_id, &connection)?;
        let transaction_count = count_currency_transactions(currency_id, &connection)?;
        (currency, transaction_count)
    };

    let mut session = load_session(&jar);

    if transaction_count > 0 {
        tracing::debug!(
            "Refusing to delete currency {currency_id} with {transaction_count} transactions"
        );
        session.flash(blocked_delete_flash(&currency));
        let jar = store_session(jar, &session)?;

        return Ok((jar, Redirect::to(endpoints::CURRENCIES_VIEW)).into_response());
    }

    session
        .flows
        .capture_return_url(DELETE_CURRENCY, previous_url.as_deref());
    let cancel_url = session.flows.completion_target(DELETE_CURRENCY);
    let flash = session.take_flash();
    let jar = store_session(jar, &session)?;

    Ok((jar, delete_currency_view(&currency, &cancel_url, flash)).into_response())
}

/// Delete a currency and send the user back to where they came from.
///
/// Transactions may have been recorded in the currency since the confirmation
/// page was shown, so the check is repeated here.
pub async fn delete_currency_endpoint(
    Path(currency_id): Path<CurrencyId>,
    State(state): State<DbState>,
    jar: PrivateCookieJar,
) -> Response {
    let outcome = {
        let connection = match state.lock() {
            Ok(connection) => connection,
            Err(error) => return error.into_alert_response(),
        };

        let currency = match get_currency(currency_id, &connection) {
            Ok(currency) => currency,
            Err(Error::NotFound) => return Error::DeleteMissingCurrency.into_alert_response(),
            Err(error) => return error.into_alert_response(),
        };

        match count_currency_transactions(currency_id, &connection) {
            Ok(0) => match delete_currency(currency_id, &connection) {
                Ok(()) => DeleteOutcome::Deleted(currency),
                Err(Error::HasDependents) => DeleteOutcome::Blocked(currency),
                Err(error) => {
                    tracing::error!("Could not delete currency {currency_id}: {error}");
                    return error.into_alert_response();
                }
            },
            Ok(_) => DeleteOutcome::Blocked(currency),
            Err(error) => return error.into_alert_response(),
        }
    };

    let mut session = load_session(&jar);
    let target = match outcome {
        DeleteOutcome::Deleted(currency) => {
            session.flash(Flash::success(format!(
                "Currency \"{}\" deleted",
                currency.name
            )));
            session.flows.completion_target_after_delete(
                DELETE_CURRENCY,
                &format!("{}/{currency_id}", endpoints::CURRENCIES_VIEW),
            )
        }
        DeleteOutcome::Blocked(currency) => {
            tracing::debug!("Refusing to delete currency {currency_id} with transactions");
            session.flash(blocked_delete_flash(&currency));
            endpoints::CURRENCIES_VIEW.to_owned()
        }
    };

    match store_session(jar, &session) {
        Ok(jar) => (jar, HxRedirect(target), StatusCode::SEE_OTHER).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

enum DeleteOutcome {
    Deleted(Currency),
    Blocked(Currency),
}

fn delete_currency_view(currency: &Currency, cancel_url: &str, flash: Option<Flash>) -> Markup {
    let nav_bar = NavBar::new(endpoints::DELETE_CURRENCY_VIEW).into_html();
    let delete_endpoint = format_endpoint(endpoints::DELETE_CURRENCY, currency.id);

    let content = html! {
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4"
            {
                "Delete currency \"" (currency.name) "\" (" (currency.code) ")"
            }

            form
                hx-delete=(delete_endpoint)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                p { "No transactions are recorded in this currency." }

                button type="submit" class=(BUTTON_DELETE_STYLE) { "Delete currency" }
            }

            a href=(cancel_url) class=(BUTTON_SECONDARY_STYLE) { "Cancel" }
        }
    };

    page("Delete Currency", nav_bar, flash, &content)
}

#[cfg(test)]
mod delete_currency_page_tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use time::macros::date;

    use crate::{
        NewCurrency,
        currency::{create_currency, domain::DELETE_CURRENCY},
        endpoints::{self, format_endpoint},
        flash::Flash,
        flow::PreviousUrl,
        test_utils::{
            assert_form_submit_button_with_text, assert_hx_endpoint, assert_see_other,
            assert_valid_html, get_test_db_state, get_test_jar, must_get_form,
            parse_html_document, session_from_response,
        },
        transaction::{Transaction, create_transaction},
    };

    use super::get_delete_currency_page;

    #[tokio::test]
    async fn render_page_for_unused_currency() {
        let state = get_test_db_state();
        let currency = create_currency(
            NewCurrency::new("NZD", "New Zealand dollar", "$").unwrap(),
            &state.lock().unwrap(),
        )
        .unwrap();

        let response = get_delete_currency_page(
            Path(currency.id),
            State(state),
            PreviousUrl(Some(endpoints::CURRENCIES_VIEW.to_owned())),
            get_test_jar(),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let session = session_from_response(&response);
        assert_eq!(
            session.flows.return_url(DELETE_CURRENCY),
            Some(endpoints::CURRENCIES_VIEW)
        );

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(
            &form,
            &format_endpoint(endpoints::DELETE_CURRENCY, currency.id),
            "hx-delete",
        );
        assert_form_submit_button_with_text(&form, "Delete currency");
    }

    #[tokio::test]
    async fn currency_with_transactions_redirects_to_index() {
        let state = get_test_db_state();
        let currency = {
            let connection = state.lock().unwrap();
            let currency =
                create_currency(NewCurrency::new("EUR", "Euro", "€").unwrap(), &connection)
                    .unwrap();
            for day in 1..=3 {
                create_transaction(
                    Transaction::build(5.0, date!(2024 - 02 - 01).replace_day(day).unwrap(), "", currency.id),
                    &connection,
                )
                .unwrap();
            }
            currency
        };

        let response = get_delete_currency_page(
            Path(currency.id),
            State(state),
            PreviousUrl(Some("/categories".to_owned())),
            get_test_jar(),
        )
        .await
        .unwrap();

        assert_see_other(&response, endpoints::CURRENCIES_VIEW);
        let session = session_from_response(&response);
        assert_eq!(
            session.flash,
            Some(Flash::error(
                "Cannot delete Euro (EUR) because there are still transactions attached to it."
            ))
        );
        assert_eq!(session.flows.return_url(DELETE_CURRENCY), None);
    }

    #[tokio::test]
    async fn missing_currency_is_not_found() {
        let result = get_delete_currency_page(
            Path(42),
            State(get_test_db_state()),
            PreviousUrl(None),
            get_test_jar(),
        )
        .await;

        assert!(matches!(result, Err(crate::Error::NotFound)));
    }
}
