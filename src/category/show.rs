//! The page listing the transactions of a single category.

use axum::extract::{Path, Query, State};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    app_state::DbState,
    category::{Category, get_category},
    database_id::CategoryId,
    endpoints::{self, format_endpoint},
    flash::Flash,
    html::{PAGE_CONTAINER_STYLE, link, page},
    navigation::NavBar,
    session::pop_flash,
    transaction::{
        TRANSACTIONS_PER_PAGE, TransactionRow, count_category_transactions,
        get_category_transactions, transaction_table,
    },
};

/// The page of transactions to show, zero-based.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// The requested page, where a missing, negative or malformed page is the first page.
    fn page(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|page| page.trim().parse::<i64>().ok())
            .map_or(0, |page| page.max(0) as u64)
    }
}

/// Render one page of a category's transactions, newest first.
pub async fn get_category_page(
    Path(category_id): Path<CategoryId>,
    State(state): State<DbState>,
    Query(query): Query<PageQuery>,
    jar: PrivateCookieJar,
) -> Result<(PrivateCookieJar, Markup), Error> {
    let page_number = query.page();

    let (category, transactions, transaction_count) = {
        let connection = state.lock()?;
        let category = get_category(category_id, &connection)?;
        let transactions = get_category_transactions(category_id, page_number, &connection)?;
        let transaction_count = count_category_transactions(category_id, &connection)?;

        (category, transactions, transaction_count)
    };

    let (jar, flash) = pop_flash(jar)?;

    Ok((
        jar,
        category_view(&category, &transactions, page_number, transaction_count, flash),
    ))
}

fn category_view(
    category: &Category,
    transactions: &[TransactionRow],
    page_number: u64,
    transaction_count: u64,
    flash: Option<Flash>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORY_VIEW).into_html();
    let category_url = format_endpoint(endpoints::CATEGORY_VIEW, category.id);
    let page_count = transaction_count.div_ceil(TRANSACTIONS_PER_PAGE);
    let previous_page = (page_number > 0).then(|| page_number - 1);
    let next_page = (page_number + 1 < page_count).then_some(page_number + 1);

    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="relative w-full max-w-4xl overflow-x-auto"
            {
                header class="flex justify-between flex-wrap items-end mb-4"
                {
                    h1 class="text-xl font-bold" { (category.name) }

                    div class="flex gap-4"
                    {
                        (link(&format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category.id), "Edit"))
                        (link(&format_endpoint(endpoints::DELETE_CATEGORY_VIEW, category.id), "Delete"))
                    }
                }

                (transaction_table(transactions, "No transactions in this category."))

                nav class="flex justify-between my-4" aria-label="Pagination"
                {
                    @if let Some(previous_page) = previous_page {
                        (link(&format!("{category_url}?page={previous_page}"), "Newer"))
                    } @else {
                        span {}
                    }

                    @if let Some(next_page) = next_page {
                        (link(&format!("{category_url}?page={next_page}"), "Older"))
                    }
                }
            }
        }
    };

    page(category.name.as_ref(), nav_bar, flash, &content)
}
