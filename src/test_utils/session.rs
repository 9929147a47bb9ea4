use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
    },
    response::Response,
};
use axum_extra::extract::{PrivateCookieJar, cookie::Cookie};
use rusqlite::Connection;

use crate::{
    app_state::{DbState, create_cookie_key},
    db::initialize,
    session::{Session, load_session, store_session},
};

const TEST_SECRET: &str = "foobar";

pub(crate) fn get_test_db_state() -> DbState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");

    DbState {
        db_connection: Arc::new(Mutex::new(connection)),
    }
}

pub(crate) fn get_test_jar() -> PrivateCookieJar {
    PrivateCookieJar::new(create_cookie_key(TEST_SECRET))
}

pub(crate) fn jar_with_session(session: &Session) -> PrivateCookieJar {
    store_session(get_test_jar(), session).expect("Could not store session")
}

/// Decode the session that `response` sets, or an empty session if it sets none.
#[track_caller]
pub(crate) fn session_from_response(response: &Response<Body>) -> Session {
    let mut headers = HeaderMap::new();

    for value in response.headers().get_all(SET_COOKIE) {
        let value = value.to_str().expect("Could not convert to str").to_owned();
        let cookie = Cookie::parse(value).expect("Could not parse cookie");
        let header = HeaderValue::from_str(&format!("{}={}", cookie.name(), cookie.value()))
            .expect("Could not create cookie header");
        headers.append(COOKIE, header);
    }

    load_session(&PrivateCookieJar::from_headers(
        &headers,
        create_cookie_key(TEST_SECRET),
    ))
}
