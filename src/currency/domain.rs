//! Core currency domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::CurrencyId,
    flow::{FlowKey, FormAction, ResourceKind},
};

pub(crate) const CREATE_CURRENCY: FlowKey = FlowKey::new(ResourceKind::Currency, FormAction::Create);
pub(crate) const EDIT_CURRENCY: FlowKey = FlowKey::new(ResourceKind::Currency, FormAction::Edit);
pub(crate) const DELETE_CURRENCY: FlowKey = FlowKey::new(ResourceKind::Currency, FormAction::Delete);

/// A validated currency code, e.g. "EUR".
///
/// Codes are trimmed and upper-cased so that "eur" and "EUR" are the same currency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Create a currency code.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCurrencyCode] if `code` is an empty string.
    pub fn new(code: &str) -> Result<Self, Error> {
        let code = code.trim();

        if code.is_empty() {
            Err(Error::EmptyCurrencyCode)
        } else {
            Ok(Self(code.to_uppercase()))
        }
    }

    /// Create a currency code without validation.
    ///
    /// The caller should ensure that the string is a non-empty, upper-case code.
    pub fn new_unchecked(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyCode::new(s)
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The validated fields of a currency that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCurrency {
    /// The unique, uppercase code, e.g. "EUR".
    pub code: CurrencyCode,
    /// The display name, e.g. "Euro".
    pub name: String,
    /// The symbol shown before amounts, e.g. "€".
    pub symbol: String,
}

impl NewCurrency {
    /// Validate the fields of a currency.
    ///
    /// An empty symbol is replaced by the code.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyCurrencyCode] or [Error::EmptyCurrencyName] if the
    /// code or name is blank.
    pub fn new(code: &str, name: &str, symbol: &str) -> Result<Self, Error> {
        let code = CurrencyCode::new(code)?;
        let name = name.trim();

        if name.is_empty() {
            return Err(Error::EmptyCurrencyName);
        }

        let symbol = match symbol.trim() {
            "" => code.to_string(),
            symbol => symbol.to_owned(),
        };

        Ok(Self {
            code,
            name: name.to_owned(),
            symbol,
        })
    }
}

/// A currency that transactions are recorded in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Currency {
    pub id: CurrencyId,
    pub code: CurrencyCode,
    pub name: String,
    pub symbol: String,
}

/// Form data for creating a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCurrencyForm {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    /// "1" to come back to the form after saving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_another: Option<String>,
}

impl NewCurrencyForm {
    pub(crate) fn validate(&self) -> Result<NewCurrency, Error> {
        NewCurrency::new(&self.code, &self.name, &self.symbol)
    }
}

/// Form data for editing a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCurrencyForm {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    /// "1" to come back to the form after saving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_to_edit: Option<String>,
}

impl EditCurrencyForm {
    pub(crate) fn validate(&self) -> Result<NewCurrency, Error> {
        NewCurrency::new(&self.code, &self.name, &self.symbol)
    }
}
