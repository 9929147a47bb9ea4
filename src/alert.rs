//! Alert system for displaying success and error messages to users.
//!
//! Alerts are used both for flash messages rendered at the top of a page and
//! for error fragments returned to HTMX requests, which are swapped into the
//! `#alert-container` element.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};

/// Alert message types for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Success,
    Error,
}

/// A message with optional details, styled according to its [AlertKind].
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub details: String,
}

impl Alert {
    /// Create a new error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self {
            kind: AlertKind::Error,
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    pub fn into_html(self) -> Markup {
        let (container_style, icon) = match self.kind {
            AlertKind::Success => (
                "flex items-start gap-3 p-4 mb-4 text-sm text-green-800 \
                rounded-lg bg-green-50 dark:bg-gray-800 dark:text-green-400",
                "✓",
            ),
            AlertKind::Error => (
                "flex items-start gap-3 p-4 mb-4 text-sm text-red-800 \
                rounded-lg bg-red-50 dark:bg-gray-800 dark:text-red-400",
                "!",
            ),
        };
        let (role, kind_name) = match self.kind {
            AlertKind::Success => ("status", "success"),
            AlertKind::Error => ("alert", "error"),
        };

        html!(
            div
                class=(container_style)
                role=(role)
                data-alert-kind=(kind_name)
            {
                span class="font-bold" aria-hidden="true" { (icon) }

                div
                {
                    p class="font-medium" { (self.message) }

                    @if !self.details.is_empty() {
                        p { (self.details) }
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::{Alert, AlertKind};

    #[test]
    fn error_alert_renders_message_and_details() {
        let html = Html::parse_fragment(
            &Alert::error("Could not delete", "It is still in use.")
                .into_html()
                .into_string(),
        );

        let alert = html
            .select(&Selector::parse("div[role=alert]").unwrap())
            .next()
            .expect("No alert found");
        let text = alert.text().collect::<String>();
        assert!(text.contains("Could not delete"));
        assert!(text.contains("It is still in use."));
        assert_eq!(alert.value().attr("data-alert-kind"), Some("error"));
    }

    #[test]
    fn success_alert_omits_empty_details() {
        let alert = Alert {
            kind: AlertKind::Success,
            message: "Saved".to_owned(),
            details: String::new(),
        };
        let html = Html::parse_fragment(&alert.into_html().into_string());

        let paragraphs = html.select(&Selector::parse("p").unwrap()).count();
        assert_eq!(paragraphs, 1);
    }
}
