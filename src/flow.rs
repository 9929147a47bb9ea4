//! Remembers where a create, edit or delete flow should send the user once it
//! completes.
//!
//! Entering a form records the page the user came from as the flow's return
//! URL. Submitting the form either completes the flow, redirecting back to
//! that URL, or loops back into the same form ("create another" or "return
//! to edit"). A loop sets the flow's repeat flag so that re-entering the form
//! keeps the original return URL instead of recording the form itself.
//!
//! The repeat flag is consumed by the next form entry, whether it was set or
//! not, so a later plain navigation to the form starts a fresh flow.

use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use axum::{
    extract::FromRequestParts,
    http::{Uri, header::REFERER, request::Parts},
};
use serde::{Deserialize, Serialize};

use crate::endpoints;

/// The kind of entity a flow operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    /// Transaction categories, e.g. "Groceries".
    Category,
    /// Currencies that transactions are recorded in, e.g. "EUR".
    Currency,
}

impl ResourceKind {
    /// The page listing all entities of this kind.
    ///
    /// Used as the redirect target when a flow has no return URL.
    pub fn index_endpoint(self) -> &'static str {
        match self {
            ResourceKind::Category => endpoints::CATEGORIES_VIEW,
            ResourceKind::Currency => endpoints::CURRENCIES_VIEW,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Category => "category",
            ResourceKind::Currency => "currency",
        }
    }
}

/// The action a flow performs on an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormAction {
    /// Create a new entity.
    Create,
    /// Edit an existing entity.
    Edit,
    /// Delete an existing entity.
    Delete,
}

impl FormAction {
    fn as_str(self) -> &'static str {
        match self {
            FormAction::Create => "create",
            FormAction::Edit => "edit",
            FormAction::Delete => "delete",
        }
    }
}

/// Identifies the flow state for one resource kind and action.
///
/// Serialized as `"<resource>.<action>"`, e.g. `"category.create"`, so that it
/// can be used as a JSON object key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct FlowKey {
    /// The kind of entity.
    pub resource: ResourceKind,
    /// The action performed on the entity.
    pub action: FormAction,
}

impl FlowKey {
    /// Create a key for `action` on `resource`.
    pub const fn new(resource: ResourceKind, action: FormAction) -> Self {
        Self { resource, action }
    }
}

impl Display for FlowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.resource.as_str(), self.action.as_str())
    }
}

impl From<FlowKey> for String {
    fn from(key: FlowKey) -> Self {
        key.to_string()
    }
}

/// The error returned when parsing a malformed [FlowKey].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid flow key \"{0}\"")]
pub struct InvalidFlowKey(String);

impl FromStr for FlowKey {
    type Err = InvalidFlowKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (resource, action) = s
            .split_once('.')
            .ok_or_else(|| InvalidFlowKey(s.to_owned()))?;

        let resource = match resource {
            "category" => ResourceKind::Category,
            "currency" => ResourceKind::Currency,
            _ => return Err(InvalidFlowKey(s.to_owned())),
        };

        let action = match action {
            "create" => FormAction::Create,
            "edit" => FormAction::Edit,
            "delete" => FormAction::Delete,
            _ => return Err(InvalidFlowKey(s.to_owned())),
        };

        Ok(Self { resource, action })
    }
}

impl TryFrom<String> for FlowKey {
    type Error = InvalidFlowKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The navigation state of a single flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowState {
    /// Where to send the user once the flow completes.
    ///
    /// `None` if the form was entered without a referring page.
    pub return_url: Option<String>,

    /// Whether the last submission looped back into the same form.
    #[serde(default)]
    pub repeat: bool,
}

/// What the user asked for when submitting a create or edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Finish the flow and go back to where the user came from.
    Complete,
    /// Go back to the same form, i.e. "create another" or "return to edit".
    Repeat,
}

impl Intent {
    /// Interpret the value of a "create another"/"return to edit" checkbox.
    ///
    /// Only a value that parses to the integer 1 asks for a repeat.
    pub fn from_checkbox(value: Option<&str>) -> Self {
        match value.map(|value| value.trim().parse::<i64>()) {
            Some(Ok(1)) => Intent::Repeat,
            _ => Intent::Complete,
        }
    }
}

/// The navigation state for every flow in a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flows(BTreeMap<FlowKey, FlowState>);

impl Flows {
    /// Record that the user opened the form for `key`, coming from
    /// `previous_url`.
    ///
    /// The return URL is only overwritten when the previous submission did not
    /// loop back into this form. The repeat flag is cleared either way.
    pub fn enter_form(&mut self, key: FlowKey, previous_url: Option<&str>) {
        let state = self.0.entry(key).or_default();

        if state.repeat {
            tracing::debug!("{key}: continuing flow, keeping return URL {:?}", state.return_url);
        } else {
            state.return_url = previous_url.map(str::to_owned);
            tracing::debug!("{key}: starting flow, return URL {:?}", state.return_url);
        }

        state.repeat = false;
    }

    /// Record `previous_url` as the return URL for `key` unconditionally.
    ///
    /// Used by delete confirmation pages, which have no repeat variant.
    pub fn capture_return_url(&mut self, key: FlowKey, previous_url: Option<&str>) {
        let state = self.0.entry(key).or_default();
        state.return_url = previous_url.map(str::to_owned);
        state.repeat = false;
        tracing::debug!("{key}: captured return URL {:?}", state.return_url);
    }

    /// Decide where to redirect after a successful submission for `key`.
    ///
    /// [Intent::Repeat] marks the flow as looping and returns `form_url`.
    /// [Intent::Complete] returns the flow's return URL, or the resource's index
    /// page if none was recorded.
    pub fn resolve_submit(&mut self, key: FlowKey, intent: Intent, form_url: &str) -> String {
        match intent {
            Intent::Repeat => {
                self.0.entry(key).or_default().repeat = true;
                form_url.to_owned()
            }
            Intent::Complete => self.completion_target(key),
        }
    }

    /// The page to send the user to once the flow for `key` completes.
    pub fn completion_target(&self, key: FlowKey) -> String {
        self.return_url(key)
            .unwrap_or_else(|| key.resource.index_endpoint())
            .to_owned()
    }

    /// The page to send the user to once the delete flow for `key` has removed
    /// the entity at `deleted_url`.
    ///
    /// A return URL that points at the deleted entity, e.g. its edit page, no
    /// longer exists and is replaced by the resource's index page.
    pub fn completion_target_after_delete(&self, key: FlowKey, deleted_url: &str) -> String {
        let target = self.completion_target(key);
        let deleted_url = deleted_url.trim_end_matches('/');
        let points_at_deleted = target
            .strip_prefix(deleted_url)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?', '#']));

        if points_at_deleted {
            tracing::debug!("{key}: return URL {target} was deleted, using the index page");
            key.resource.index_endpoint().to_owned()
        } else {
            target
        }
    }

    /// The recorded return URL for `key`, if any.
    pub fn return_url(&self, key: FlowKey) -> Option<&str> {
        self.0
            .get(&key)
            .and_then(|state| state.return_url.as_deref())
    }

    /// Whether the flow for `key` is in the middle of a "do again" loop.
    pub fn is_repeating(&self, key: FlowKey) -> bool {
        self.0.get(&key).is_some_and(|state| state.repeat)
    }
}

/// The page the user was on before the current request, taken from the
/// `Referer` header.
///
/// Only the path and query of the referrer are kept so that redirects never
/// leave the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviousUrl(pub Option<String>);

impl PreviousUrl {
    /// Reduce a referrer to its path and query.
    pub fn from_referer(referer: &str) -> Self {
        let path_and_query = referer
            .parse::<Uri>()
            .ok()
            .and_then(|uri| uri.path_and_query().map(|path| path.as_str().to_owned()))
            .filter(|path| path.starts_with('/') && !path.starts_with("//"));

        Self(path_and_query)
    }

    /// The previous page, if known.
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for PreviousUrl
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let previous_url = parts
            .headers
            .get(REFERER)
            .and_then(|value| value.to_str().ok())
            .map(PreviousUrl::from_referer)
            .unwrap_or(PreviousUrl(None));

        Ok(previous_url)
    }
}
