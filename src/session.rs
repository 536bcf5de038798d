//! Session and flash-message cookies.
//!
//! Both live in the private (signed + encrypted) jar keyed from the
//! configured secret. The session is a single `admin_session` flag; flash
//! messages are a one-shot cookie taken (read and removed) by the next
//! rendered page after a redirect.

use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

const SESSION_COOKIE: &str = "admin_session";
const FLASH_COOKIE: &str = "flash";

/// Lifetime of the admin session cookie; the browser drops it afterwards
/// and the next request is treated as anonymous.
const SESSION_TTL: Duration = Duration::hours(12);

/// A one-time user-facing status message. `level` is one of `success`,
/// `danger`, `warning`, `info` and only affects presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub level: String,
    pub message: String,
}

pub fn is_admin(jar: &PrivateCookieJar) -> bool {
    jar.get(SESSION_COOKIE).is_some_and(|c| c.value() == "1")
}

pub fn log_in(jar: PrivateCookieJar) -> PrivateCookieJar {
    let mut cookie = build_cookie(SESSION_COOKIE, "1".to_string());
    cookie.set_max_age(SESSION_TTL);
    jar.add(cookie)
}

pub fn log_out(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(clear_cookie(SESSION_COOKIE))
}

/// Queue a flash message for the next rendered page.
pub fn flash(jar: PrivateCookieJar, level: &str, message: &str) -> PrivateCookieJar {
    let payload = serde_json::to_string(&Flash {
        level: level.to_string(),
        message: message.to_string(),
    })
    .unwrap_or_default();
    jar.add(build_cookie(FLASH_COOKIE, payload))
}

/// Take the pending flash message, if any, clearing it from the jar so it
/// renders at most once.
pub fn take_flash(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<Flash>) {
    let pending = jar
        .get(FLASH_COOKIE)
        .and_then(|c| serde_json::from_str(c.value()).ok());
    let jar = jar.remove(clear_cookie(FLASH_COOKIE));
    (jar, pending)
}

fn build_cookie(name: &str, value: String) -> Cookie<'static> {
    Cookie::build(Cookie::new(name.to_string(), value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn clear_cookie(name: &str) -> Cookie<'static> {
    Cookie::build(Cookie::new(name.to_string(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
