//! Category management for grouping transactions.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;
mod show;

pub use create::{create_category_endpoint, get_new_category_page};
pub use db::{
    create_category, create_category_table, get_categories_with_activity, get_category,
    update_category,
};
pub use delete::{delete_category_endpoint, get_delete_category_page};
pub use domain::{Category, CategoryName, CategoryWithActivity};
pub use edit::{get_edit_category_page, update_category_endpoint};
pub use list::get_categories_page;
pub use show::get_category_page;
