use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Key, PrivateCookieJar};

use crate::session;

/// Guard for admin-prefixed management routes.
///
/// Present only when the browser session carries the admin flag. Rejection
/// is a redirect to the login page, never an authorization error status, so
/// anonymous visitors land on the login form instead of a 4xx page.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = match PrivateCookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(infallible) => match infallible {},
        };
        if session::is_admin(&jar) {
            Ok(Self)
        } else {
            Err(Redirect::to("/admin").into_response())
        }
    }
}
