//! One-shot notifications that are stored in the session and displayed by the
//! next rendered page.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::alert::{Alert, AlertKind};

/// A message to show the user on the next page they see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: AlertKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            message: message.into(),
        }
    }
}

/// Render the pending flash message, if any, above the page content.
pub fn flash_view(flash: Option<Flash>) -> Markup {
    html! {
        @if let Some(flash) = flash {
            div id="flash" class="w-full max-w-md mx-auto px-4 pt-4"
            {
                (Alert { kind: flash.kind, message: flash.message, details: String::new() }.into_html())
            }
        }
    }
}
