//! Currency creation page and endpoint.

use axum::{
    Form,
    extract::State,
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
        create_currency,
        domain::{CREATE_CURRENCY, NewCurrencyForm},
        form::{currency_fields, error_message_view},
    },
    endpoints,
    flash::Flash,
    flow::{Intent, PreviousUrl},
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, page, repeat_checkbox},
    navigation::NavBar,
    session::{load_session, store_session},
};

/// Render the currency creation page.
///
/// Remembers the page the user came from unless they are creating another
/// currency, in which case the form is filled in with the last submission.
pub async fn get_new_currency_page(
    previous_url: PreviousUrl,
    jar: PrivateCookieJar,
) -> Result<(PrivateCookieJar, Markup), Error> {
    let mut session = load_session(&jar);

    session
        .flows
        .enter_form(CREATE_CURRENCY, previous_url.as_deref());
    let old_input = session.take_input::<NewCurrencyForm>(CREATE_CURRENCY);
    let flash = session.take_flash();

    let jar = store_session(jar, &session)?;

    Ok((jar, new_currency_view(old_input, flash)))
}

/// Handle currency creation form submission.
pub async fn create_currency_endpoint(
    State(state): State<DbState>,
    jar: PrivateCookieJar,
    Form(form): Form<NewCurrencyForm>,
) -> Response {
    let new_currency = match form.validate() {
        Ok(new_currency) => new_currency,
        Err(error) => {
            return new_currency_form_view(&form, &format!("Error: {error}")).into_response();
        }
    };

    let currency = {
        let connection = match state.lock() {
            Ok(connection) => connection,
            Err(error) => return error.into_alert_response(),
        };

        match create_currency(new_currency, &connection) {
            Ok(currency) => currency,
            Err(error) => {
                tracing::error!("Could not create currency: {error}");
                return error.into_alert_response();
            }
        }
    };

    let mut session = load_session(&jar);
    session.flash(Flash::success(format!(
        "Currency \"{}\" created",
        currency.name
    )));

    let intent = Intent::from_checkbox(form.create_another.as_deref());
    let target =
        session
            .flows
            .resolve_submit(CREATE_CURRENCY, intent, endpoints::NEW_CURRENCY_VIEW);

    if intent == Intent::Repeat
        && let Err(error) = session.keep_input(CREATE_CURRENCY, &form)
    {
        return error.into_alert_response();
    }

    match store_session(jar, &session) {
        Ok(jar) => (jar, HxRedirect(target), StatusCode::SEE_OTHER).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

fn new_currency_view(old_input: Option<NewCurrencyForm>, flash: Option<Flash>) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_CURRENCY_VIEW).into_html();
    let form = old_input.unwrap_or(NewCurrencyForm {
        code: String::new(),
        name: String::new(),
        symbol: String::new(),
        create_another: None,
    });

    let content = html! {
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Create a new currency" }
            (new_currency_form_view(&form, ""))
        }
    };

    page("Create Currency", nav_bar, flash, &content)
}

fn new_currency_form_view(form: &NewCurrencyForm, error_message: &str) -> Markup {
    let create_another =
        Intent::from_checkbox(form.create_another.as_deref()) == Intent::Repeat;

    html! {
        form
            hx-post=(endpoints::POST_CURRENCY)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            (currency_fields(&form.code, &form.name, &form.symbol))

            (repeat_checkbox("create_another", "Create another currency after this one", create_another))

            (error_message_view(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Currency" }
        }
    }
}

#[cfg(test)]
mod new_currency_page_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{
        currency::domain::{CREATE_CURRENCY, NewCurrencyForm},
        endpoints,
        flow::{Intent, PreviousUrl},
        session::Session,
        test_utils::{
            assert_form_checkbox, assert_form_input, assert_form_input_with_value,
            assert_form_submit_button, assert_hx_endpoint, assert_valid_html, get_test_jar,
            jar_with_session, must_get_form, parse_html_document, session_from_response,
        },
    };

    use super::get_new_currency_page;

    #[tokio::test]
    async fn render_page() {
        let response = get_new_currency_page(
            PreviousUrl(Some(endpoints::CURRENCIES_VIEW.to_owned())),
            get_test_jar(),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let session = session_from_response(&response);
        assert_eq!(
            session.flows.return_url(CREATE_CURRENCY),
            Some(endpoints::CURRENCIES_VIEW)
        );

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::POST_CURRENCY, "hx-post");
        assert_form_input(&form, "code", "text");
        assert_form_input(&form, "name", "text");
        assert_form_checkbox(&form, "create_another", false);
        assert_form_submit_button(&form);
    }

    #[tokio::test]
    async fn fills_in_old_input_when_creating_another() {
        let mut session = Session::default();
        session.flows.enter_form(CREATE_CURRENCY, Some("/dashboard"));
        session
            .flows
            .resolve_submit(CREATE_CURRENCY, Intent::Repeat, endpoints::NEW_CURRENCY_VIEW);
        let form = NewCurrencyForm {
            code: "NZD".to_owned(),
            name: "New Zealand dollar".to_owned(),
            symbol: "$".to_owned(),
            create_another: Some("1".to_owned()),
        };
        session.keep_input(CREATE_CURRENCY, &form).unwrap();

        let response = get_new_currency_page(
            PreviousUrl(Some(endpoints::NEW_CURRENCY_VIEW.to_owned())),
            jar_with_session(&session),
        )
        .await
        .into_response();

        let session = session_from_response(&response);
        assert_eq!(session.flows.return_url(CREATE_CURRENCY), Some("/dashboard"));

        let html = parse_html_document(response).await;
        let form = must_get_form(&html);
        assert_form_input_with_value(&form, "code", "text", "NZD");
        assert_form_input_with_value(&form, "name", "text", "New Zealand dollar");
        assert_form_checkbox(&form, "create_another", true);
    }
}
