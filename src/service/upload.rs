use crate::error::VitrineError;
use chrono::Utc;
use std::path::Path;

/// Recognized image extensions, matched case-insensitively. Extension
/// checking is the only validation performed; file content is never sniffed.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Check if the uploaded file has an allowed extension.
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ALLOWED_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)))
}

/// Reduce a declared filename to a safe basename: strip any path
/// components, then keep only alphanumerics, `.`, `-` and `_`.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

/// Validate and store an uploaded image beneath `<static_dir>/img`.
///
/// The stored name is the sanitized original prefixed with the current Unix
/// timestamp, which keeps names unique across seconds. Two uploads of the
/// same filename within one second can still collide; accepted edge case.
/// Returns the relative path (`img/<ts>_<name>`) to persist in the database.
pub async fn save_image(
    static_dir: &Path,
    declared_name: &str,
    data: &[u8],
) -> Result<String, VitrineError> {
    if !allowed_file(declared_name) {
        return Err(VitrineError::UnsupportedImageType(declared_name.to_string()));
    }

    let unique_name = format!("{}_{}", Utc::now().timestamp(), sanitize_filename(declared_name));
    let save_dir = static_dir.join("img");
    tokio::fs::create_dir_all(&save_dir).await?;
    tokio::fs::write(save_dir.join(&unique_name), data).await?;
    Ok(format!("img/{unique_name}"))
}
