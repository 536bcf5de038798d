use axum::extract::{DefaultBodyLimit, FromRef};
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::cookie::Key;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::CONFIG;
use crate::db::CatalogStorage;
use crate::handlers::{admin, public};
use crate::service::AdminCredentials;

#[derive(Clone)]
pub struct VitrineState {
    pub storage: CatalogStorage,
    pub auth: Arc<AdminCredentials>,
    pub static_dir: PathBuf,
    key: Key,
}

impl VitrineState {
    pub fn new(
        storage: CatalogStorage,
        auth: AdminCredentials,
        key: Key,
        static_dir: PathBuf,
    ) -> Self {
        Self {
            storage,
            auth: Arc::new(auth),
            static_dir,
            key,
        }
    }
}

// Lets PrivateCookieJar (and the AdminSession guard) pull the signing key
// straight out of the router state.
impl FromRef<VitrineState> for Key {
    fn from_ref(state: &VitrineState) -> Key {
        state.key.clone()
    }
}

pub fn vitrine_router(state: VitrineState) -> Router {
    Router::new()
        .route("/", get(public::home))
        .route("/products", get(public::products_page))
        .route(
            "/contact",
            get(public::contact_page).post(public::contact_submit),
        )
        .route("/admin", get(admin::login_page).post(admin::login))
        .route("/admin/dashboard", get(admin::dashboard))
        .route("/admin/logout", get(admin::logout))
        .route(
            "/admin/product/new",
            get(admin::new_product_page).post(admin::create_product),
        )
        .route(
            "/admin/product/edit/{id}",
            get(admin::edit_product_page).post(admin::update_product),
        )
        .route("/admin/product/delete/{id}", post(admin::delete_product))
        .route("/admin/cover_photo", post(admin::update_cover_photo))
        .layer(DefaultBodyLimit::max(CONFIG.max_upload_bytes))
        .with_state(state)
}
