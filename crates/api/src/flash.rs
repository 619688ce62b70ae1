//! One-shot status messages carried across a redirect.
//!
//! A mutation stores its outcome in the `flash` cookie and redirects to the
//! list page, which shows the message once and removes the cookie.

use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use url::form_urlencoded;

/// Name of the cookie carrying the pending message.
pub const FLASH_COOKIE: &str = "flash";

/// Severity of a flash message, used as its CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Danger,
}

impl FlashKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "success" => Some(Self::Success),
            "danger" => Some(Self::Danger),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Danger,
            message: message.into(),
        }
    }

    /// Cookie-safe encoding: `kind=…&message=…`, percent-encoded.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("kind", self.kind.as_str())
            .append_pair("message", &self.message)
            .finish()
    }

    /// Inverse of [`Flash::encode`]. Unknown kinds or a missing message yield `None`.
    pub fn decode(raw: &str) -> Option<Self> {
        let mut kind = None;
        let mut message = None;
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "kind" => kind = FlashKind::parse(&value),
                "message" => message = Some(value.into_owned()),
                _ => {}
            }
        }
        Some(Self {
            kind: kind?,
            message: message?,
        })
    }
}

/// Store `flash` in the jar and redirect (303) to `to`.
pub fn redirect_with_flash(jar: CookieJar, flash: Flash, to: &str) -> (CookieJar, Redirect) {
    let cookie = Cookie::build((FLASH_COOKIE, flash.encode()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    (jar.add(cookie), Redirect::to(to))
}

/// Remove the pending message from the jar, returning it if there was one.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let flash = Flash::decode(cookie.value());
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flash)
}
