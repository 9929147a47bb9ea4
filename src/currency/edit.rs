//! Currency editing page and endpoint.

use axum::{
    Form,
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
    currency::{
        domain::{EDIT_CURRENCY, EditCurrencyForm},
        form::{currency_fields, error_message_view},
        get_currency, update_currency,
    },
    database_id::CurrencyId,
    endpoints::{self, format_endpoint},
    flash::Flash,
    flow::{Intent, PreviousUrl},
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, page, repeat_checkbox},
    navigation::NavBar,
    session::{load_session, store_session},
};

/// Render the currency editing page.
pub async fn get_edit_currency_page(
    Path(currency_id): Path<CurrencyId>,
    State(state): State<DbState>,
    previous_url: PreviousUrl,
    jar: PrivateCookieJar,
) -> Result<(PrivateCookieJar, Markup), Error> {
    let currency = get_currency(currency_id, &*state.lock()?)?;

    let mut session = load_session(&jar);
    session
        .flows
        .enter_form(EDIT_CURRENCY, previous_url.as_deref());
    let flash = session.take_flash();
    let jar = store_session(jar, &session)?;

    let form = EditCurrencyForm {
        code: currency.code.to_string(),
        name: currency.name.clone(),
        symbol: currency.symbol.clone(),
        return_to_edit: None,
    };
    let update_endpoint = format_endpoint(endpoints::PUT_CURRENCY, currency_id);
    let content = html! {
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Edit currency \"" (currency.name) "\"" }
            (edit_currency_form_view(&update_endpoint, &form, ""))
        }
    };
    let nav_bar = NavBar::new(endpoints::EDIT_CURRENCY_VIEW).into_html();

    Ok((jar, page("Edit Currency", nav_bar, flash, &content)))
}

/// Handle currency update form submission.
pub async fn update_currency_endpoint(
    Path(currency_id): Path<CurrencyId>,
    State(state): State<DbState>,
    jar: PrivateCookieJar,
    Form(form): Form<EditCurrencyForm>,
) -> Response {
    let update_endpoint = format_endpoint(endpoints::PUT_CURRENCY, currency_id);

    let new_currency = match form.validate() {
        Ok(new_currency) => new_currency,
        Err(error) => {
            return edit_currency_form_view(&update_endpoint, &form, &format!("Error: {error}"))
                .into_response();
        }
    };

    let currency = {
        let connection = match state.lock() {
            Ok(connection) => connection,
            Err(error) => return error.into_alert_response(),
        };

        match update_currency(currency_id, new_currency, &connection) {
            Ok(currency) => currency,
            Err(error) => {
                tracing::error!("Could not update currency {currency_id}: {error}");
                return error.into_alert_response();
            }
        }
    };

    let mut session = load_session(&jar);
    session.flash(Flash::success(format!(
        "Currency \"{}\" updated.",
        currency.name
    )));
    let target = session.flows.resolve_submit(
        EDIT_CURRENCY,
        Intent::from_checkbox(form.return_to_edit.as_deref()),
        &format_endpoint(endpoints::EDIT_CURRENCY_VIEW, currency_id),
    );

    match store_session(jar, &session) {
        Ok(jar) => (jar, HxRedirect(target), StatusCode::SEE_OTHER).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

fn edit_currency_form_view(
    update_endpoint: &str,
    form: &EditCurrencyForm,
    error_message: &str,
) -> Markup {
    let return_to_edit =
        Intent::from_checkbox(form.return_to_edit.as_deref()) == Intent::Repeat;

    html! {
        form
            hx-put=(update_endpoint)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            (currency_fields(&form.code, &form.name, &form.symbol))

            (repeat_checkbox("return_to_edit", "Return here after updating", return_to_edit))

            (error_message_view(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Currency" }
        }
    }
}
