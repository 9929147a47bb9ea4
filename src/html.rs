use maud::{DOCTYPE, Markup, html};

use numfmt::{Formatter, Precision};

use crate::flash::{Flash, flash_view};

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_DELETE_STYLE: &str = "w-full px-4 py-2 bg-red-600 \
    dark:bg-red-700 hover:enabled:bg-red-700 hover:enabled:dark:bg-red-800 \
    text-white rounded";

pub const BUTTON_SECONDARY_STYLE: &str = "w-full py-2.5 px-5 mb-2 \
    text-sm font-medium text-gray-900 bg-white rounded border border-gray-200 \
    hover:bg-gray-100 hover:text-blue-700 focus:z-10 dark:bg-gray-800 \
    dark:text-gray-400 dark:border-gray-600 dark:hover:text-white \
    dark:hover:bg-gray-700 text-center";

// Form styles
pub const FORM_CONTAINER_STYLE: &str = "flex flex-col items-center px-6 py-8 \
    mx-auto lg:py-0 max-w-md text-gray-900 dark:text-white";
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";
pub const FORM_CHECKBOX_STYLE: &str = "w-4 h-4 text-blue-600 bg-gray-100 \
    border-gray-300 rounded focus:ring-blue-500 dark:focus:ring-blue-600 \
    dark:ring-offset-gray-800 dark:bg-gray-700 dark:border-gray-600";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Pocketbook" }
                link rel="icon" type="image/png" href="/static/favicon-32x32.png" sizes="32x32";
                link href="/static/main.css" rel="stylesheet";

                script src="/static/htmx-2.0.8-min.js" integrity="sha384-/TgkGk7p307TH7EXJDuUlgG3Ce1UVolAOFopFekQkkXihi5u/6OCvVKyz1W+idaz" {}
                script src="/static/htmx-ext-response-targets-2.0.4.js" integrity="sha384-T41oglUPvXLGBVyRdZsVRxNWnOOqCynaPubjUVjxhsjFTKrFJGEMm3/0KGmNQ+Pg" {}
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)

                // Alert container for out-of-band swaps
                div
                    id="alert-container"
                    class="w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

/// A full page with the navigation bar, the pending flash message and `content`.
pub fn page(title: &str, nav_bar: Markup, flash: Option<Flash>, content: &Markup) -> Markup {
    let content = html! {
        (nav_bar)
        (flash_view(flash))
        (content)
    };

    base(title, &content)
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Homepage"
                    }
                }
            }
        }
    );

    base(title, &content)
}

/// A labelled text input for a create or edit form.
pub fn text_input(name: &str, label: &str, value: &str, autofocus: bool) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            input
                id=(name)
                type="text"
                name=(name)
                placeholder=(label)
                value=(value)
                required
                autofocus[autofocus]
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

/// The checkbox that asks to come back to the same form after submitting,
/// e.g. "create another".
pub fn repeat_checkbox(name: &str, label: &str, checked: bool) -> Markup {
    html! {
        div class="flex items-center gap-2"
        {
            input
                id=(name)
                type="checkbox"
                name=(name)
                value="1"
                checked[checked]
                class=(FORM_CHECKBOX_STYLE);

            label for=(name) class="text-sm font-medium text-gray-900 dark:text-gray-300"
            {
                (label)
            }
        }
    }
}

/// Format `amount` with two decimal places and the currency `symbol`.
///
/// Amounts are rounded to the nearest cent first, so an amount that rounds to
/// zero is shown as zero.
pub fn format_amount(amount: f64, symbol: &str) -> String {
    let amount = (amount * 100.0).round() / 100.0;

    if amount == 0.0 {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return format!("{symbol}0.00");
    }

    let prefix = if amount < 0.0 {
        format!("-{symbol}")
    } else {
        symbol.to_owned()
    };

    // numfmt uses scientific notation for numbers below one.
    if amount.abs() < 1.0 {
        return format!("{prefix}{:.2}", amount.abs());
    }

    let formatted_number = match Formatter::currency(&prefix) {
        Ok(formatter) => formatter
            .precision(Precision::Decimals(2))
            .fmt_string(amount.abs()),
        Err(_) => format!("{prefix}{:.2}", amount.abs()),
    };

    // numfmt omits the last trailing zero, so we must add it ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    match formatted_number.rfind('.') {
        Some(dot) if formatted_number.len() - dot == 2 => format!("{formatted_number}0"),
        Some(_) => formatted_number,
        None => format!("{formatted_number}.00"),
    }
}

/// A link with blue text.
pub fn link(url: &str, text: &str) -> Markup {
    html! (
        a href=(url) class=(LINK_STYLE) { (text) }
    )
}

#[cfg(test)]
mod format_amount_tests {
    use super::format_amount;

    #[test]
    fn pads_to_two_decimal_places() {
        let formatted = format_amount(1234.5, "$");

        assert!(formatted.starts_with('$'), "got {formatted}");
        assert!(formatted.ends_with(".50"), "got {formatted}");
    }

    #[test]
    fn prefixes_negative_amount_with_minus_sign() {
        let formatted = format_amount(-12.34, "€");

        assert!(formatted.starts_with("-€"), "got {formatted}");
        assert!(formatted.ends_with("12.34"), "got {formatted}");
    }

    #[test]
    fn formats_zero() {
        assert_eq!(format_amount(0.0, "£"), "£0.00");
        assert_eq!(format_amount(0.0, "€"), "€0.00");
        assert_eq!(format_amount(-0.0, "$"), "$0.00");
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(format_amount(0.001, "€"), "€0.00");
        assert_eq!(format_amount(-0.004, "€"), "€0.00");
        assert_eq!(format_amount(0.05, "€"), "€0.05");
        assert_eq!(format_amount(-0.5, "$"), "-$0.50");
    }
}
