//! SQL DDL for initializing the catalog database.
//! SQLite-first design; evolution is strictly additive (see `sqlite.rs`).

/// Default cover photo, used to seed `settings` and as a read-time fallback.
pub const DEFAULT_COVER_PHOTO: &str = "img/default_cover.jpg";

/// SQLite schema:
/// - `products`: one row per catalog entry, `image_path`/`url` optional
/// - `settings`: a singleton row holding the cover photo path
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    price REAL NOT NULL,
    image_path TEXT NULL,
    url TEXT NULL
);

CREATE TABLE IF NOT EXISTS settings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    cover_photo_path TEXT NULL
);
"#;
