//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    database_id::CategoryId,
    flow::{FlowKey, FormAction, ResourceKind},
};

pub(crate) const CREATE_CATEGORY: FlowKey = FlowKey::new(ResourceKind::Category, FormAction::Create);
pub(crate) const EDIT_CATEGORY: FlowKey = FlowKey::new(ResourceKind::Category, FormAction::Edit);
pub(crate) const DELETE_CATEGORY: FlowKey = FlowKey::new(ResourceKind::Category, FormAction::Delete);

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category for grouping transactions, e.g. "Groceries", "Rent".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
}

/// A category with the date of its most recent transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryWithActivity {
    pub category: Category,
    /// `None` if the category has no transactions.
    pub last_activity: Option<Date>,
}

/// Form data for creating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategoryForm {
    pub name: String,
    /// "1" to come back to the form after saving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_another: Option<String>,
}

/// Form data for editing a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCategoryForm {
    pub name: String,
    /// "1" to come back to the form after saving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_to_edit: Option<String>,
}
