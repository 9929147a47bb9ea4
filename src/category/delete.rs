//! Category deletion confirmation page and endpoint.

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
    category::{Category, db::delete_category, domain::DELETE_CATEGORY, get_category},
    database_id::CategoryId,
    endpoints::{self, format_endpoint},
    flash::Flash,
    flow::PreviousUrl,
    html::{BUTTON_DELETE_STYLE, BUTTON_SECONDARY_STYLE, FORM_CONTAINER_STYLE, page},
    navigation::NavBar,
    session::{load_session, store_session},
    transaction::count_category_transactions,
};

/// Render the page asking the user to confirm deleting a category.
///
/// Always remembers the page the user came from.
pub async fn get_delete_category_page(
    Path(category_id): Path<CategoryId>,
    State(state): State<DbState>,
    previous_url: PreviousUrl,
    jar: PrivateCookieJar,
) -> Result<(PrivateCookieJar, Markup), Error> {
    let (category, transaction_count) = {
        let connection = state.lock()?;
        let category = get_category(category_id, &connection)?;
        let transaction_count = count_category_transactions(category_id, &connection)?;
        (category, transaction_count)
    };

    let mut session = load_session(&jar);
    session
        .flows
        .capture_return_url(DELETE_CATEGORY, previous_url.as_deref());
    let cancel_url = session.flows.completion_target(DELETE_CATEGORY);
    let flash = session.take_flash();
    let jar = store_session(jar, &session)?;

    Ok((
        jar,
        delete_category_view(&category, transaction_count, &cancel_url, flash),
    ))
}

/// Delete a category and send the user back to where they came from.
///
/// Transactions in the category are kept without a category.
pub async fn delete_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<DbState>,
    jar: PrivateCookieJar,
) -> Response {
    let category = {
        let connection = match state.lock() {
            Ok(connection) => connection,
            Err(error) => return error.into_alert_response(),
        };

        let category = match get_category(category_id, &connection) {
            Ok(category) => category,
            Err(Error::NotFound) => return Error::DeleteMissingCategory.into_alert_response(),
            Err(error) => return error.into_alert_response(),
        };

        if let Err(error) = delete_category(category_id, &connection) {
            tracing::error!("Could not delete category {category_id}: {error}");
            return error.into_alert_response();
        }

        category
    };

    let mut session = load_session(&jar);
    session.flash(Flash::success(format!(
        "The category \"{}\" was deleted.",
        category.name
    )));
    let target = session.flows.completion_target_after_delete(
        DELETE_CATEGORY,
        &format_endpoint(endpoints::CATEGORY_VIEW, category_id),
    );

    match store_session(jar, &session) {
        Ok(jar) => (jar, HxRedirect(target), StatusCode::SEE_OTHER).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

fn delete_category_view(
    category: &Category,
    transaction_count: u64,
    cancel_url: &str,
    flash: Option<Flash>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::DELETE_CATEGORY_VIEW).into_html();
    let delete_endpoint = format_endpoint(endpoints::DELETE_CATEGORY, category.id);
    let transaction_message = match transaction_count {
        0 => "No transactions are in this category.".to_owned(),
        1 => "The 1 transaction in this category will be kept without a category.".to_owned(),
        count => format!("The {count} transactions in this category will be kept without a category."),
    };

    let content = html! {
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Delete category \"" (category.name) "\"" }

            form
                hx-delete=(delete_endpoint)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                p data-transaction-count=(transaction_count) { (transaction_message) }

                button type="submit" class=(BUTTON_DELETE_STYLE) { "Delete category" }
            }

            a href=(cancel_url) class=(BUTTON_SECONDARY_STYLE) { "Cancel" }
        }
    };

    page("Delete Category", nav_bar, flash, &content)
}

#[cfg(test)]
mod delete_category_page_tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        NewCurrency,
        category::{CategoryName, create_category, domain::DELETE_CATEGORY},
        create_currency,
        endpoints::{self, format_endpoint},
        flow::PreviousUrl,
        test_utils::{
            assert_form_submit_button_with_text, assert_hx_endpoint, assert_valid_html,
            get_test_db_state, get_test_jar, must_get_form, parse_html_document,
            session_from_response,
        },
        transaction::{Transaction, create_transaction},
    };

    use super::get_delete_category_page;

    #[tokio::test]
    async fn render_page_with_transaction_count() {
        let state = get_test_db_state();
        let category_id = {
            let connection = state.lock().unwrap();
            let currency = NewCurrency::new("EUR", "Euro", "€").unwrap();
            let currency_id = create_currency(currency, &connection).unwrap().id;
            let category_id = create_category(CategoryName::new_unchecked("Rent"), &connection)
                .unwrap()
                .id;
            for _ in 0..2 {
                create_transaction(
                    Transaction::build(1.0, date!(2024 - 01 - 01), "", currency_id)
                        .category_id(Some(category_id)),
                    &connection,
                )
                .unwrap();
            }
            category_id
        };

        let response = get_delete_category_page(
            Path(category_id),
            State(state),
            PreviousUrl(Some("/categories?page=1".to_owned())),
            get_test_jar(),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let session = session_from_response(&response);
        assert_eq!(
            session.flows.return_url(DELETE_CATEGORY),
            Some("/categories?page=1")
        );

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(
            &form,
            &format_endpoint(endpoints::DELETE_CATEGORY, category_id),
            "hx-delete",
        );
        assert_form_submit_button_with_text(&form, "Delete category");
        let count = html
            .select(&Selector::parse("p[data-transaction-count]").unwrap())
            .next()
            .expect("No transaction count found");
        assert_eq!(count.value().attr("data-transaction-count"), Some("2"));
        let cancel = html
            .select(&Selector::parse("a[href='/categories?page=1']").unwrap())
            .next();
        assert!(cancel.is_some(), "want cancel link back to the previous page");
    }

    #[tokio::test]
    async fn missing_category_renders_not_found() {
        let response = get_delete_category_page(
            Path(42),
            State(get_test_db_state()),
            PreviousUrl(None),
            get_test_jar(),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
