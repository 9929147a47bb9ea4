//! Category creation page and endpoint.

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
    category::{
        CategoryName, create_category,
        domain::{CREATE_CATEGORY, NewCategoryForm},
    },
    endpoints,
    flash::Flash,
    flow::{Intent, PreviousUrl},
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, page, repeat_checkbox, text_input},
    navigation::NavBar,
    session::{load_session, store_session},
};

/// Render the category creation page.
///
/// Remembers the page the user came from unless they are creating another
/// category, in which case the form is filled in with the last submission.
pub async fn get_new_category_page(
    previous_url: PreviousUrl,
    jar: PrivateCookieJar,
) -> Result<(PrivateCookieJar, Markup), Error> {
    let mut session = load_session(&jar);

    session
        .flows
        .enter_form(CREATE_CATEGORY, previous_url.as_deref());
    let old_input = session.take_input::<NewCategoryForm>(CREATE_CATEGORY);
    let flash = session.take_flash();

    let jar = store_session(jar, &session)?;

    Ok((jar, new_category_view(old_input, flash)))
}

/// Handle category creation form submission.
pub async fn create_category_endpoint(
    State(state): State<DbState>,
    jar: PrivateCookieJar,
    Form(form): Form<NewCategoryForm>,
) -> Response {
    let name = match CategoryName::new(&form.name) {
        Ok(name) => name,
        Err(error) => {
            return new_category_form_view(&form, &format!("Error: {error}")).into_response();
        }
    };

    let category = {
        let connection = match state.lock() {
            Ok(connection) => connection,
            Err(error) => return error.into_alert_response(),
        };

        match create_category(name, &connection) {
            Ok(category) => category,
            Err(error) => {
                tracing::error!("Could not create category: {error}");
                return error.into_alert_response();
            }
        }
    };

    let mut session = load_session(&jar);
    session.flash(Flash::success(format!(
        "New category \"{}\" stored!",
        category.name
    )));

    let intent = Intent::from_checkbox(form.create_another.as_deref());
    let target =
        session
            .flows
            .resolve_submit(CREATE_CATEGORY, intent, endpoints::NEW_CATEGORY_VIEW);

    if intent == Intent::Repeat
        && let Err(error) = session.keep_input(CREATE_CATEGORY, &form)
    {
        return error.into_alert_response();
    }

    match store_session(jar, &session) {
        Ok(jar) => (jar, HxRedirect(target), StatusCode::SEE_OTHER).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

fn new_category_view(old_input: Option<NewCategoryForm>, flash: Option<Flash>) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_CATEGORY_VIEW).into_html();
    let form = old_input.unwrap_or(NewCategoryForm {
        name: String::new(),
        create_another: None,
    });

    let content = html! {
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Create a new category" }
            (new_category_form_view(&form, ""))
        }
    };

    page("Create Category", nav_bar, flash, &content)
}

fn new_category_form_view(form: &NewCategoryForm, error_message: &str) -> Markup {
    let create_another =
        Intent::from_checkbox(form.create_another.as_deref()) == Intent::Repeat;

    html! {
        form
            hx-post=(endpoints::POST_CATEGORY)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            (text_input("name", "Category Name", &form.name, true))

            (repeat_checkbox("create_another", "Create another category after this one", create_another))

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Category" }
        }
    }
}

#[cfg(test)]
mod new_category_page_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{
        category::domain::{CREATE_CATEGORY, NewCategoryForm},
        endpoints,
        flow::{Intent, PreviousUrl},
        session::Session,
        test_utils::{
            assert_content_type, assert_form_checkbox, assert_form_input,
            assert_form_input_with_value, assert_form_submit_button, assert_hx_endpoint,
            assert_valid_html, get_test_jar, jar_with_session, must_get_form,
            parse_html_document, session_from_response,
        },
    };

    use super::get_new_category_page;

    #[tokio::test]
    async fn render_page() {
        let response = get_new_category_page(PreviousUrl(None), get_test_jar())
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::POST_CATEGORY, "hx-post");
        assert_form_input(&form, "name", "text");
        assert_form_checkbox(&form, "create_another", false);
        assert_form_submit_button(&form);
    }

    #[tokio::test]
    async fn records_previous_url() {
        let response = get_new_category_page(
            PreviousUrl(Some("/transactions/uncategorized".to_owned())),
            get_test_jar(),
        )
        .await
        .into_response();

        let session = session_from_response(&response);
        assert_eq!(
            session.flows.return_url(CREATE_CATEGORY),
            Some("/transactions/uncategorized")
        );
    }

    #[tokio::test]
    async fn fills_in_old_input_when_creating_another() {
        let mut session = Session::default();
        session
            .flows
            .enter_form(CREATE_CATEGORY, Some(endpoints::CATEGORIES_VIEW));
        session
            .flows
            .resolve_submit(CREATE_CATEGORY, Intent::Repeat, endpoints::NEW_CATEGORY_VIEW);
        let form = NewCategoryForm {
            name: "Groceries".to_owned(),
            create_another: Some("1".to_owned()),
        };
        session.keep_input(CREATE_CATEGORY, &form).unwrap();

        let response = get_new_category_page(
            PreviousUrl(Some(endpoints::NEW_CATEGORY_VIEW.to_owned())),
            jar_with_session(&session),
        )
        .await
        .into_response();

        let session = session_from_response(&response);
        assert_eq!(
            session.flows.return_url(CREATE_CATEGORY),
            Some(endpoints::CATEGORIES_VIEW)
        );
        assert!(!session.flows.is_repeating(CREATE_CATEGORY));
        assert_eq!(session.old_input, None);

        let html = parse_html_document(response).await;
        let form = must_get_form(&html);
        assert_form_input_with_value(&form, "name", "text", "Groceries");
        assert_form_checkbox(&form, "create_another", true);
    }
}

#[cfg(test)]
mod create_category_endpoint_tests {
    use axum::{Form, extract::State, http::StatusCode, response::IntoResponse};

    use crate::{
        category::{
            Category, CategoryName, create_category_endpoint,
            domain::{CREATE_CATEGORY, NewCategoryForm},
            get_category,
        },
        endpoints,
        flash::Flash,
        flow::PreviousUrl,
        session::Session,
        test_utils::{
            assert_form_error_message, assert_hx_redirect, assert_valid_html, get_test_db_state,
            get_test_jar, jar_with_session, must_get_form, parse_html_fragment,
            session_from_response,
        },
    };

    use super::get_new_category_page;

    fn form(name: &str, create_another: Option<&str>) -> NewCategoryForm {
        NewCategoryForm {
            name: name.to_owned(),
            create_another: create_another.map(str::to_owned),
        }
    }

    fn session_after_entering_from(previous_url: &str) -> Session {
        let mut session = Session::default();
        session.flows.enter_form(CREATE_CATEGORY, Some(previous_url));
        session
    }

    #[tokio::test]
    async fn redirects_to_previous_page() {
        let state = get_test_db_state();
        let jar = jar_with_session(&session_after_entering_from("/categories/7?page=2"));

        let response = create_category_endpoint(State(state.clone()), jar, Form(form("Rent", None)))
            .await
            .into_response();

        assert_hx_redirect(&response, "/categories/7?page=2");
        let session = session_from_response(&response);
        assert_eq!(
            session.flash,
            Some(Flash::success("New category \"Rent\" stored!"))
        );
        assert!(!session.flows.is_repeating(CREATE_CATEGORY));
        assert_eq!(
            get_category(1, &state.lock().unwrap()),
            Ok(Category {
                id: 1,
                name: CategoryName::new_unchecked("Rent")
            })
        );
    }

    #[tokio::test]
    async fn redirects_to_index_without_previous_page() {
        let state = get_test_db_state();

        let response = create_category_endpoint(State(state), get_test_jar(), Form(form("Rent", None)))
            .await
            .into_response();

        assert_hx_redirect(&response, endpoints::CATEGORIES_VIEW);
    }

    #[tokio::test]
    async fn create_another_loops_back_to_form() {
        let state = get_test_db_state();
        let jar = jar_with_session(&session_after_entering_from("/dashboard"));

        let response = create_category_endpoint(
            State(state.clone()),
            jar,
            Form(form("Groceries", Some("1"))),
        )
        .await
        .into_response();

        assert_hx_redirect(&response, endpoints::NEW_CATEGORY_VIEW);
        let mut session = session_from_response(&response);
        assert_eq!(
            session.flash,
            Some(Flash::success("New category \"Groceries\" stored!"))
        );
        assert!(session.flows.is_repeating(CREATE_CATEGORY));
        assert_eq!(
            session.take_input::<NewCategoryForm>(CREATE_CATEGORY),
            Some(form("Groceries", Some("1")))
        );
    }

    #[tokio::test]
    async fn plain_navigation_after_create_another_keeps_return_url() {
        let state = get_test_db_state();
        let jar = jar_with_session(&session_after_entering_from("/dashboard"));
        let response = create_category_endpoint(
            State(state.clone()),
            jar,
            Form(form("Groceries", Some("1"))),
        )
        .await
        .into_response();
        let jar = jar_with_session(&session_from_response(&response));

        let response = get_new_category_page(
            PreviousUrl(Some(endpoints::NEW_CATEGORY_VIEW.to_owned())),
            jar,
        )
        .await
        .into_response();
        let jar = jar_with_session(&session_from_response(&response));
        let response = create_category_endpoint(State(state), jar, Form(form("Rent", None)))
            .await
            .into_response();

        assert_hx_redirect(&response, "/dashboard");
    }

    #[tokio::test]
    async fn checkbox_values_other_than_one_complete_the_flow() {
        let state = get_test_db_state();
        let jar = jar_with_session(&session_after_entering_from("/currencies"));

        let response = create_category_endpoint(State(state), jar, Form(form("Rent", Some("on"))))
            .await
            .into_response();

        assert_hx_redirect(&response, "/currencies");
    }

    #[tokio::test]
    async fn create_fails_on_empty_name() {
        let state = get_test_db_state();

        let response = create_category_endpoint(State(state), get_test_jar(), Form(form(" ", None)))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("set-cookie").is_none());
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Category name cannot be empty");
    }

    #[tokio::test]
    async fn duplicate_name_leaves_flow_untouched() {
        let state = get_test_db_state();
        let jar = jar_with_session(&session_after_entering_from("/dashboard"));
        create_category_endpoint(State(state.clone()), get_test_jar(), Form(form("Rent", None)))
            .await;

        let response =
            create_category_endpoint(State(state), jar, Form(form("Rent", Some("1"))))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get("hx-redirect").is_none());
    }
}
