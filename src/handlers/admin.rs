use axum::Form;
use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::CONFIG;
use crate::db::ProductForm;
use crate::error::VitrineError;
use crate::middleware::AdminSession;
use crate::router::VitrineState;
use crate::service::upload;
use crate::{pages, session};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// GET /admin
pub async fn login_page(jar: PrivateCookieJar) -> impl IntoResponse {
    let (jar, flash) = session::take_flash(jar);
    (jar, pages::admin_login(flash.as_ref()))
}

/// POST /admin -> set the session flag on success, bounce back on failure.
pub async fn login(
    State(state): State<VitrineState>,
    jar: PrivateCookieJar,
    Form(form): Form<LoginForm>,
) -> impl IntoResponse {
    if state.auth.authenticate(&form.username, &form.password) {
        info!(username = %form.username, "admin login");
        let jar = session::flash(session::log_in(jar), "success", "Logged in successfully.");
        (jar, Redirect::to("/admin/dashboard"))
    } else {
        warn!(username = %form.username, "failed admin login");
        let jar = session::flash(jar, "danger", "Invalid credentials.");
        (jar, Redirect::to("/admin"))
    }
}

/// GET /admin/logout
pub async fn logout(jar: PrivateCookieJar) -> impl IntoResponse {
    let jar = session::flash(session::log_out(jar), "info", "You have been logged out.");
    (jar, Redirect::to("/"))
}

/// GET /admin/dashboard
pub async fn dashboard(
    _admin: AdminSession,
    State(state): State<VitrineState>,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, VitrineError> {
    let (jar, flash) = session::take_flash(jar);
    let products = state.storage.list_products().await?;
    let cover_photo = state.storage.cover_photo().await?;
    Ok((
        jar,
        pages::admin_dashboard(&cover_photo, &products, flash.as_ref()),
    ))
}

/// GET /admin/product/new
pub async fn new_product_page(_admin: AdminSession, jar: PrivateCookieJar) -> impl IntoResponse {
    let (jar, flash) = session::take_flash(jar);
    (jar, pages::product_form(None, flash.as_ref()))
}

/// GET /admin/product/edit/{id} -> form prefilled from the stored row.
pub async fn edit_product_page(
    _admin: AdminSession,
    State(state): State<VitrineState>,
    Path(id): Path<i64>,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, VitrineError> {
    let (jar, flash) = session::take_flash(jar);
    let product = state.storage.get_product(id).await?;
    Ok((jar, pages::product_form(product.as_ref(), flash.as_ref())))
}

/// POST /admin/product/new
pub async fn create_product(
    _admin: AdminSession,
    State(state): State<VitrineState>,
    headers: HeaderMap,
    jar: PrivateCookieJar,
    multipart: Multipart,
) -> Response {
    save_product(&state, &headers, jar, None, multipart).await
}

/// POST /admin/product/edit/{id}
pub async fn update_product(
    _admin: AdminSession,
    State(state): State<VitrineState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    jar: PrivateCookieJar,
    multipart: Multipart,
) -> Response {
    save_product(&state, &headers, jar, Some(id), multipart).await
}

/// POST /admin/product/delete/{id}
pub async fn delete_product(
    _admin: AdminSession,
    State(state): State<VitrineState>,
    Path(id): Path<i64>,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, VitrineError> {
    state.storage.delete_product(id).await?;
    info!(id, "product deleted");
    let jar = session::flash(jar, "warning", "Product deleted successfully!");
    Ok((jar, Redirect::to("/admin/dashboard")))
}

/// POST /admin/cover_photo -> store the upload and point the settings
/// singleton at it.
pub async fn update_cover_photo(
    _admin: AdminSession,
    State(state): State<VitrineState>,
    headers: HeaderMap,
    jar: PrivateCookieJar,
    mut multipart: Multipart,
) -> Response {
    let upload = match read_cover_field(&mut multipart).await {
        Ok(upload) => upload,
        Err(err) => return upload_failure(jar, &headers, "/admin/dashboard", err),
    };

    let jar = match upload {
        None => session::flash(jar, "warning", "No file selected for upload."),
        Some((filename, _)) if !upload::allowed_file(&filename) => session::flash(
            jar,
            "danger",
            "Invalid file type for cover photo. Allowed: png, jpg, jpeg, gif.",
        ),
        Some((filename, data)) => {
            match store_cover_photo(&state, &filename, &data).await {
                Ok(()) => session::flash(jar, "success", "Cover photo updated!"),
                // The file may already be on disk at this point; it is left
                // orphaned (no compensating cleanup).
                Err(err) => {
                    warn!(error = %err, "cover photo update failed");
                    session::flash(jar, "danger", &format!("Error uploading cover photo: {err}"))
                }
            }
        }
    };
    (jar, Redirect::to("/admin/dashboard")).into_response()
}

async fn store_cover_photo(
    state: &VitrineState,
    filename: &str,
    data: &[u8],
) -> Result<(), VitrineError> {
    let path = upload::save_image(&state.static_dir, filename, data).await?;
    state.storage.set_cover_photo(&path).await?;
    info!(path, "cover photo updated");
    Ok(())
}

async fn read_cover_field(
    multipart: &mut Multipart,
) -> Result<Option<(String, Bytes)>, VitrineError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("cover_photo") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            continue;
        }
        let data = field.bytes().await?;
        return Ok(Some((filename, data)));
    }
    Ok(None)
}

/// Shared create/edit path. `product_id` is `None` for creation.
async fn save_product(
    state: &VitrineState,
    headers: &HeaderMap,
    jar: PrivateCookieJar,
    product_id: Option<i64>,
    mut multipart: Multipart,
) -> Response {
    let form_url = match product_id {
        Some(id) => format!("/admin/product/edit/{id}"),
        None => "/admin/product/new".to_string(),
    };

    let form = match read_product_form(&mut multipart, state).await {
        Ok(form) => form,
        Err(err) => return upload_failure(jar, headers, &form_url, err),
    };

    match product_id {
        Some(id) => match state.storage.update_product(id, &form).await {
            Ok(()) => {
                info!(id, name = %form.name, "product updated");
                let jar = session::flash(jar, "success", "Product updated successfully!");
                (jar, Redirect::to("/admin/dashboard")).into_response()
            }
            Err(err @ VitrineError::InvalidPrice(_)) => {
                let jar = session::flash(jar, "danger", &err.flash_text());
                (jar, Redirect::to(&form_url)).into_response()
            }
            Err(err) => err.into_response(),
        },
        // Creation failures of any kind become a flash message; an uploaded
        // image already written to disk stays orphaned.
        None => match state.storage.create_product(&form).await {
            Ok(id) => {
                info!(id, name = %form.name, "product created");
                let jar = session::flash(jar, "success", "Product created successfully!");
                (jar, Redirect::to("/admin/dashboard")).into_response()
            }
            Err(err) => {
                warn!(error = %err, "product creation failed");
                let jar = session::flash(
                    jar,
                    "danger",
                    &format!("Error while creating the product: {err}"),
                );
                (jar, Redirect::to("/admin/dashboard")).into_response()
            }
        },
    }
}

/// Collect the product form fields, storing the image (when one was
/// supplied) via the upload handler. An absent image leaves `image_path`
/// unset so edits keep the stored path.
async fn read_product_form(
    multipart: &mut Multipart,
    state: &VitrineState,
) -> Result<ProductForm, VitrineError> {
    let mut form = ProductForm::default();
    while let Some(field) = multipart.next_field().await? {
        match field.name().unwrap_or_default() {
            "name" => form.name = field.text().await?,
            "description" => form.description = field.text().await?,
            "price" => form.price = field.text().await?,
            "url" => {
                let value = field.text().await?;
                form.url = (!value.is_empty()).then_some(value);
            }
            "image" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                if filename.is_empty() {
                    continue;
                }
                if !upload::allowed_file(&filename) {
                    return Err(VitrineError::UnsupportedImageType(filename));
                }
                let data = field.bytes().await?;
                form.image_path =
                    Some(upload::save_image(&state.static_dir, &filename, &data).await?);
            }
            _ => {}
        }
    }
    Ok(form)
}

/// Map a failed multipart read to the user-facing response: an over-limit
/// body becomes a 413 pointing back at the originating page, validation
/// failures become flash + redirect, anything else falls through.
fn upload_failure(
    jar: PrivateCookieJar,
    headers: &HeaderMap,
    form_url: &str,
    err: VitrineError,
) -> Response {
    match err {
        VitrineError::Multipart(ref e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            payload_too_large(jar, headers)
        }
        VitrineError::UnsupportedImageType(_) => {
            let jar = session::flash(jar, "danger", &err.flash_text());
            (jar, Redirect::to(form_url)).into_response()
        }
        err => err.into_response(),
    }
}

/// 413 with a Location back to the page the upload came from, mirroring the
/// transport-boundary rejection of oversized bodies.
fn payload_too_large(jar: PrivateCookieJar, headers: &HeaderMap) -> Response {
    let back = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("/admin/dashboard")
        .to_string();
    let limit_mib = CONFIG.max_upload_bytes / (1024 * 1024);
    let message = format!("File is too large. Max {limit_mib}MB.");
    let jar = session::flash(jar, "danger", &message);
    (
        StatusCode::PAYLOAD_TOO_LARGE,
        jar,
        [(header::LOCATION, back)],
        Html(format!("<!doctype html><p>{message}</p>")),
    )
        .into_response()
}
