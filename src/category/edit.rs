//! Category editing page and endpoint.

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
    category::{
        CategoryName,
        domain::{EDIT_CATEGORY, EditCategoryForm},
        get_category, update_category,
    },
    database_id::CategoryId,
    endpoints::{self, format_endpoint},
    flash::Flash,
    flow::{Intent, PreviousUrl},
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, page, repeat_checkbox, text_input},
    navigation::NavBar,
    session::{load_session, store_session},
};

/// Render the category editing page.
///
/// Remembers the page the user came from unless they chose to return to this
/// form after their last update.
pub async fn get_edit_category_page(
    Path(category_id): Path<CategoryId>,
    State(state): State<DbState>,
    previous_url: PreviousUrl,
    jar: PrivateCookieJar,
) -> Result<(PrivateCookieJar, Markup), Error> {
    let category = get_category(category_id, &*state.lock()?)?;

    let mut session = load_session(&jar);
    session
        .flows
        .enter_form(EDIT_CATEGORY, previous_url.as_deref());
    let flash = session.take_flash();
    let jar = store_session(jar, &session)?;

    let update_endpoint = format_endpoint(endpoints::PUT_CATEGORY, category_id);
    let content = html! {
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Edit category \"" (category.name) "\"" }
            (edit_category_form_view(&update_endpoint, category.name.as_ref(), false, ""))
        }
    };
    let nav_bar = NavBar::new(endpoints::EDIT_CATEGORY_VIEW).into_html();

    Ok((jar, page("Edit Category", nav_bar, flash, &content)))
}

/// Handle category update form submission.
pub async fn update_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<DbState>,
    jar: PrivateCookieJar,
    Form(form): Form<EditCategoryForm>,
) -> Response {
    let update_endpoint = format_endpoint(endpoints::PUT_CATEGORY, category_id);
    let return_to_edit = Intent::from_checkbox(form.return_to_edit.as_deref());

    let name = match CategoryName::new(&form.name) {
        Ok(name) => name,
        Err(error) => {
            return edit_category_form_view(
                &update_endpoint,
                &form.name,
                return_to_edit == Intent::Repeat,
                &format!("Error: {error}"),
            )
            .into_response();
        }
    };

    {
        let connection = match state.lock() {
            Ok(connection) => connection,
            Err(error) => return error.into_alert_response(),
        };

        if let Err(error) = update_category(category_id, name.clone(), &connection) {
            tracing::error!("Could not update category {category_id}: {error}");
            return error.into_alert_response();
        }
    }

    let mut session = load_session(&jar);
    session.flash(Flash::success(format!("Category \"{name}\" updated.")));
    let target = session.flows.resolve_submit(
        EDIT_CATEGORY,
        return_to_edit,
        &format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category_id),
    );

    match store_session(jar, &session) {
        Ok(jar) => (jar, HxRedirect(target), StatusCode::SEE_OTHER).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

fn edit_category_form_view(
    update_endpoint: &str,
    category_name: &str,
    return_to_edit: bool,
    error_message: &str,
) -> Markup {
    html! {
        form
            hx-put=(update_endpoint)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            (text_input("name", "Category Name", category_name, true))

            (repeat_checkbox("return_to_edit", "Return here after updating", return_to_edit))

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Category" }
        }
    }
}

#[cfg(test)]
mod edit_category_page_tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };

    use crate::{
        category::{CategoryName, create_category, domain::EDIT_CATEGORY},
        endpoints::{self, format_endpoint},
        flow::PreviousUrl,
        test_utils::{
            assert_form_checkbox, assert_form_input_with_value, assert_hx_endpoint,
            assert_valid_html, get_test_db_state, get_test_jar, must_get_form,
            parse_html_document, session_from_response,
        },
    };

    use super::get_edit_category_page;

    #[tokio::test]
    async fn render_page() {
        let state = get_test_db_state();
        let category = create_category(CategoryName::new_unchecked("Rent"), &state.lock().unwrap())
            .unwrap();

        let response = get_edit_category_page(
            Path(category.id),
            State(state),
            PreviousUrl(Some("/categories".to_owned())),
            get_test_jar(),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let session = session_from_response(&response);
        assert_eq!(session.flows.return_url(EDIT_CATEGORY), Some("/categories"));

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(
            &form,
            &format_endpoint(endpoints::PUT_CATEGORY, category.id),
            "hx-put",
        );
        assert_form_input_with_value(&form, "name", "text", "Rent");
        assert_form_checkbox(&form, "return_to_edit", false);
    }

    #[tokio::test]
    async fn missing_category_renders_not_found() {
        let state = get_test_db_state();

        let response = get_edit_category_page(
            Path(42),
            State(state),
            PreviousUrl(None),
            get_test_jar(),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
