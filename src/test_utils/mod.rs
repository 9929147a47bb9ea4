#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod session;

pub(crate) use form::{
    assert_form_checkbox, assert_form_error_message, assert_form_input,
    assert_form_input_with_value, assert_form_submit_button, assert_form_submit_button_with_text,
    assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment, select_text};
pub(crate) use http::{assert_content_type, assert_hx_redirect, assert_see_other};
pub(crate) use session::{get_test_db_state, get_test_jar, jar_with_session, session_from_response};
