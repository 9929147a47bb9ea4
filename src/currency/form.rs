//! The input fields shared by the create and edit currency forms.

use maud::{Markup, html};

use crate::html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, text_input};

pub(super) fn currency_fields(code: &str, name: &str, symbol: &str) -> Markup {
    html! {
        (text_input("code", "Code", code, true))
        (text_input("name", "Name", name, false))

        div
        {
            label for="symbol" class=(FORM_LABEL_STYLE) { "Symbol" }

            input
                id="symbol"
                type="text"
                name="symbol"
                placeholder="Defaults to the code"
                value=(symbol)
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

pub(super) fn error_message_view(error_message: &str) -> Markup {
    html! {
        @if !error_message.is_empty() {
            p class="text-red-600 dark:text-red-400"
            {
                (error_message)
            }
        }
    }
}
