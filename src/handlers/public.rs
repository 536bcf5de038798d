use axum::Form;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;
use tracing::info;

use crate::error::VitrineError;
use crate::router::VitrineState;
use crate::{pages, session};

/// GET / -> cover photo plus the full product list.
pub async fn home(
    State(state): State<VitrineState>,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, VitrineError> {
    let (jar, flash) = session::take_flash(jar);
    let cover_photo = state.storage.cover_photo().await?;
    let products = state.storage.list_products().await?;
    Ok((jar, pages::home(&cover_photo, &products, flash.as_ref())))
}

/// GET /products
pub async fn products_page(
    State(state): State<VitrineState>,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, VitrineError> {
    let (jar, flash) = session::take_flash(jar);
    let products = state.storage.list_products().await?;
    Ok((jar, pages::products(&products, flash.as_ref())))
}

/// GET /contact
pub async fn contact_page(jar: PrivateCookieJar) -> impl IntoResponse {
    let (jar, flash) = session::take_flash(jar);
    (jar, pages::contact(flash.as_ref()))
}

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// POST /contact -> acknowledge and redirect. Nothing is persisted and no
/// email is sent; the submission is only logged.
pub async fn contact_submit(jar: PrivateCookieJar, Form(form): Form<ContactForm>) -> impl IntoResponse {
    info!(
        name = %form.name,
        email = %form.email,
        message_len = form.message.len(),
        "contact form submission (not persisted)"
    );
    let jar = session::flash(
        jar,
        "success",
        "Thank you for contacting us! We'll get back to you soon.",
    );
    (jar, Redirect::to("/contact"))
}
