//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_page,
        get_category_page, get_delete_category_page, get_edit_category_page,
        get_new_category_page, update_category_endpoint,
    },
    currency::{
        create_currency_endpoint, delete_currency_endpoint, get_currencies_page,
        get_delete_currency_page, get_edit_currency_page, get_new_currency_page,
        set_default_currency_endpoint, update_currency_endpoint,
    },
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::get_uncategorized_page,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(endpoints::NEW_CATEGORY_VIEW, get(get_new_category_page))
        .route(endpoints::CATEGORY_VIEW, get(get_category_page))
        .route(endpoints::EDIT_CATEGORY_VIEW, get(get_edit_category_page))
        .route(
            endpoints::DELETE_CATEGORY_VIEW,
            get(get_delete_category_page),
        )
        .route(endpoints::UNCATEGORIZED_VIEW, get(get_uncategorized_page))
        .route(endpoints::CURRENCIES_VIEW, get(get_currencies_page))
        .route(endpoints::NEW_CURRENCY_VIEW, get(get_new_currency_page))
        .route(endpoints::EDIT_CURRENCY_VIEW, get(get_edit_currency_page))
        .route(
            endpoints::DELETE_CURRENCY_VIEW,
            get(get_delete_currency_page),
        )
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    // These routes are called by HTMX and redirect with the HX-Redirect header.
    let api_routes = Router::new()
        .route(endpoints::POST_CATEGORY, post(create_category_endpoint))
        .route(
            endpoints::PUT_CATEGORY,
            put(update_category_endpoint).delete(delete_category_endpoint),
        )
        .route(endpoints::POST_CURRENCY, post(create_currency_endpoint))
        .route(
            endpoints::PUT_CURRENCY,
            put(update_currency_endpoint).delete(delete_currency_endpoint),
        )
        .route(
            endpoints::DEFAULT_CURRENCY,
            post(set_default_currency_endpoint),
        );

    page_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the categories page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::CATEGORIES_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_categories() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::CATEGORIES_VIEW);
    }
}
