use crate::db::models::{Product, ProductForm};
use crate::db::schema::{DEFAULT_COVER_PHOTO, SQLITE_INIT};
use crate::error::VitrineError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

/// Open (creating if missing) the SQLite database behind `database_url`.
/// The enclosing instance directory is created first; SQLite will create
/// the file but not its parents.
pub async fn connect(database_url: &str) -> Result<SqlitePool, VitrineError> {
    if let Some(path) = database_url.strip_prefix("sqlite:")
        && let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct CatalogStorage {
    pool: SqlitePool,
}

impl CatalogStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL, seed the settings
    /// singleton, and apply the additive `url` column migration. Safe to run
    /// any number of times.
    pub async fn init_schema(&self) -> Result<(), VitrineError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }

        // Seed the singleton settings row only when the table is empty, so
        // repeated initialization never produces a second row.
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM settings")
            .fetch_one(&self.pool)
            .await?;
        if count == 0 {
            sqlx::query("INSERT INTO settings (cover_photo_path) VALUES (?)")
                .bind(DEFAULT_COVER_PHOTO)
                .execute(&self.pool)
                .await?;
        }

        // Additive migration: older databases predate the `url` column.
        let columns = sqlx::query("PRAGMA table_info(products)")
            .fetch_all(&self.pool)
            .await?;
        let has_url = columns
            .iter()
            .any(|row| row.try_get::<String, _>("name").is_ok_and(|n| n == "url"));
        if !has_url {
            sqlx::query("ALTER TABLE products ADD COLUMN url TEXT")
                .execute(&self.pool)
                .await?;
        }

        Ok(())
    }

    /// Full-table read in physical order; explicit ordering is out of scope.
    pub async fn list_products(&self) -> Result<Vec<Product>, VitrineError> {
        let rows = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, image_path, url FROM products",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_product(&self, id: i64) -> Result<Option<Product>, VitrineError> {
        let row = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, image_path, url FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert a new product. Rejects a non-numeric price before any row is
    /// written. Returns the new row id.
    pub async fn create_product(&self, form: &ProductForm) -> Result<i64, VitrineError> {
        let price = parse_price(&form.price)?;
        let result = sqlx::query(
            "INSERT INTO products (name, description, price, image_path, url) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&form.name)
        .bind(&form.description)
        .bind(price)
        .bind(&form.image_path)
        .bind(&form.url)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Update a product in place. An absent `image_path` keeps the stored
    /// value, so editing without a new upload never clears the image.
    pub async fn update_product(&self, id: i64, form: &ProductForm) -> Result<(), VitrineError> {
        let price = parse_price(&form.price)?;
        sqlx::query(
            "UPDATE products SET name = ?, description = ?, price = ?, \
             image_path = COALESCE(?, image_path), url = ? WHERE id = ?",
        )
        .bind(&form.name)
        .bind(&form.description)
        .bind(price)
        .bind(&form.image_path)
        .bind(&form.url)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), VitrineError> {
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Current cover photo path, falling back to the bundled default when
    /// the singleton row is absent or holds an empty value.
    pub async fn cover_photo(&self) -> Result<String, VitrineError> {
        let row: Option<(Option<String>,)> =
            sqlx::query_as("SELECT cover_photo_path FROM settings LIMIT 1")
                .fetch_optional(&self.pool)
                .await?;
        Ok(match row {
            Some((Some(path),)) if !path.is_empty() => path,
            _ => DEFAULT_COVER_PHOTO.to_string(),
        })
    }

    pub async fn set_cover_photo(&self, path: &str) -> Result<(), VitrineError> {
        sqlx::query("UPDATE settings SET cover_photo_path = ?")
            .bind(path)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn parse_price(raw: &str) -> Result<f64, VitrineError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| VitrineError::InvalidPrice(raw.to_string()))
}
