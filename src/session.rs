//! Session state carried between requests in a private cookie.
//!
//! The whole [Session] is serialized as JSON into a single cookie that is
//! encrypted and signed with the app's cookie key. Handlers load it from the
//! request's cookie jar, pass it by mutable reference to the operations that
//! need it and store it back into the jar returned with the response.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use serde::{Deserialize, Serialize};

use crate::{Error, flash::Flash, flow::FlowKey, flow::Flows};

pub(crate) const COOKIE_SESSION: &str = "session";

/// The submitted fields of a "create another" submission, used to fill in the
/// form again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OldInput {
    /// The flow whose form the fields belong to.
    pub flow: FlowKey,
    /// The url-encoded form fields.
    pub fields: String,
}

/// The per-browser state that survives across requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub flows: Flows,
    #[serde(default)]
    pub flash: Option<Flash>,
    #[serde(default)]
    pub old_input: Option<OldInput>,
}

impl Session {
    /// Replace the pending flash message.
    ///
    /// Only one message is kept per request, the last one set wins.
    pub fn flash(&mut self, flash: Flash) {
        self.flash = Some(flash);
    }

    /// Remove and return the pending flash message for display.
    pub fn take_flash(&mut self) -> Option<Flash> {
        self.flash.take()
    }

    /// Keep the fields of `form` so the form for `flow` can be filled in again.
    ///
    /// # Errors
    ///
    /// Returns an [Error::JSONSerializationError] if `form` cannot be url-encoded.
    pub fn keep_input<T: Serialize>(&mut self, flow: FlowKey, form: &T) -> Result<(), Error> {
        let fields = serde_urlencoded::to_string(form)
            .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

        self.old_input = Some(OldInput { flow, fields });

        Ok(())
    }

    /// Remove and decode the kept form fields if they belong to `flow`.
    ///
    /// Fields kept for another flow are left untouched. Fields that can no
    /// longer be decoded are discarded.
    pub fn take_input<T: for<'de> Deserialize<'de>>(&mut self, flow: FlowKey) -> Option<T> {
        if self.old_input.as_ref()?.flow != flow {
            return None;
        }

        let old_input = self.old_input.take()?;

        serde_urlencoded::from_str(&old_input.fields)
            .inspect_err(|error| tracing::warn!("Discarding old input for {flow}: {error}"))
            .ok()
    }
}

/// Read the session from `jar`.
///
/// A missing cookie, or one that cannot be decoded, gives an empty session.
pub fn load_session(jar: &PrivateCookieJar) -> Session {
    match jar.get(COOKIE_SESSION) {
        Some(cookie) => serde_json::from_str(cookie.value())
            .inspect_err(|error| {
                tracing::warn!("Could not decode session cookie, starting a new session: {error}")
            })
            .unwrap_or_default(),
        None => Session::default(),
    }
}

/// Write `session` into `jar`, replacing any previous session cookie.
///
/// The cookie has no expiry, so the session ends when the browser is closed.
///
/// # Errors
///
/// Returns an [Error::JSONSerializationError] if the session cannot be serialized.
pub fn store_session(jar: PrivateCookieJar, session: &Session) -> Result<PrivateCookieJar, Error> {
    let value = serde_json::to_string(session)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

    Ok(jar.add(
        Cookie::build((COOKIE_SESSION, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(true),
    ))
}

/// Remove the pending flash message from the session in `jar`, for pages that
/// only display the message and leave the rest of the session alone.
///
/// # Errors
///
/// Returns an [Error::JSONSerializationError] if the session cannot be serialized.
pub fn pop_flash(jar: PrivateCookieJar) -> Result<(PrivateCookieJar, Option<Flash>), Error> {
    let mut session = load_session(&jar);

    match session.take_flash() {
        Some(flash) => Ok((store_session(jar, &session)?, Some(flash))),
        None => Ok((jar, None)),
    }
}
