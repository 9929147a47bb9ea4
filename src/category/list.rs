//! Categories listing page.

use axum::extract::State;
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};

use crate::{
    Error,
    app_state::DbState,
    category::{CategoryWithActivity, get_categories_with_activity},
    endpoints::{self, format_endpoint},
    flash::Flash,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        link, page,
    },
    navigation::NavBar,
    session::pop_flash,
    transaction::format_date,
};

/// Render the categories listing page with the date of each category's most
/// recent transaction.
pub async fn get_categories_page(
    State(state): State<DbState>,
    jar: PrivateCookieJar,
) -> Result<(PrivateCookieJar, Markup), Error> {
    let categories = get_categories_with_activity(&*state.lock()?)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    let (jar, flash) = pop_flash(jar)?;

    Ok((jar, categories_view(&categories, flash)))
}

fn category_row(summary: &CategoryWithActivity) -> Markup {
    let category = &summary.category;
    let show_url = format_endpoint(endpoints::CATEGORY_VIEW, category.id);
    let edit_url = format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category.id);
    let delete_url = format_endpoint(endpoints::DELETE_CATEGORY_VIEW, category.id);

    html! {
        tr class=(TABLE_ROW_STYLE) data-category-row="true"
        {
            td class=(TABLE_CELL_STYLE) { (link(&show_url, category.name.as_ref())) }

            td class=(TABLE_CELL_STYLE)
            {
                @if let Some(date) = summary.last_activity {
                    time datetime=(format_date(date)) { (format_date(date)) }
                } @else {
                    span class="text-gray-400 dark:text-gray-500" { "Never" }
                }
            }

            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    (link(&edit_url, "Edit"))
                    (link(&delete_url, "Delete"))
                }
            }
        }
    }
}

fn categories_view(categories: &[CategoryWithActivity], flash: Option<Flash>) -> Markup {
    let new_category_route = endpoints::NEW_CATEGORY_VIEW;
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let content = html!(
        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Categories" }

                    a href=(new_category_route) class=(LINK_STYLE)
                    {
                        "Create Category"
                    }
                }

                table class="w-full text-sm text-left rtl:text-right
                    text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Last activity" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for summary in categories {
                            (category_row(summary))
                        }

                        @if categories.is_empty() {
                            tr
                            {
                                td
                                    colspan="3"
                                    class="px-6 py-4 text-center
                                        text-gray-500 dark:text-gray-400"
                                {
                                    "No categories created yet. "
                                    a href=(new_category_route) class=(LINK_STYLE)
                                    {
                                        "Create your first category"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    page("Categories", nav_bar, flash, &content)
}
