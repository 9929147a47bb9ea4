//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/categories/{category_id}', use [format_endpoint].

/// The root route which redirects to the categories page.
pub const ROOT: &str = "/";
/// The page for listing all categories.
pub const CATEGORIES_VIEW: &str = "/categories";
/// The page for creating a new category.
pub const NEW_CATEGORY_VIEW: &str = "/categories/new";
/// The page listing the transactions of a single category.
pub const CATEGORY_VIEW: &str = "/categories/{category_id}";
/// The page for editing an existing category.
pub const EDIT_CATEGORY_VIEW: &str = "/categories/{category_id}/edit";
/// The page for confirming the deletion of a category.
pub const DELETE_CATEGORY_VIEW: &str = "/categories/{category_id}/delete";
/// The page listing transactions that have no category.
pub const UNCATEGORIZED_VIEW: &str = "/transactions/uncategorized";
/// The page for listing all currencies.
pub const CURRENCIES_VIEW: &str = "/currencies";
/// The page for creating a new currency.
pub const NEW_CURRENCY_VIEW: &str = "/currencies/new";
/// The page for editing an existing currency.
pub const EDIT_CURRENCY_VIEW: &str = "/currencies/{currency_id}/edit";
/// The page for confirming the deletion of a currency.
pub const DELETE_CURRENCY_VIEW: &str = "/currencies/{currency_id}/delete";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a category.
pub const POST_CATEGORY: &str = "/api/categories";
/// The route to update a category.
pub const PUT_CATEGORY: &str = "/api/categories/{category_id}";
/// The route to delete a category.
pub const DELETE_CATEGORY: &str = "/api/categories/{category_id}";
/// The route to create a currency.
pub const POST_CURRENCY: &str = "/api/currencies";
/// The route to update a currency.
pub const PUT_CURRENCY: &str = "/api/currencies/{currency_id}";
/// The route to delete a currency.
pub const DELETE_CURRENCY: &str = "/api/currencies/{currency_id}";
/// The route to make a currency the default currency.
pub const DEFAULT_CURRENCY: &str = "/api/currencies/{currency_id}/default";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/categories/{category_id}', '{category_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let param_start = match endpoint_path.find('{') {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
