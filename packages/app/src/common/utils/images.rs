/// Derive a storage file extension for an image, trying the MIME subtype,
/// then the picked file name, then `"jpg"`. The result is sanitized to
/// lowercase alphanumerics so it is always safe inside a storage path.
pub fn image_extension(mime_type: Option<&str>, file_name: Option<&str>) -> String {
    let from_mime = mime_type
        .and_then(|m| m.split('/').nth(1))
        .and_then(|sub| sub.split(';').next())
        .unwrap_or("");

    let from_name = file_name
        .and_then(|n| n.rsplit('.').next())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let picked = if !from_mime.is_empty() {
        from_mime.to_string()
    } else if !from_name.is_empty() {
        from_name
    } else {
        "jpg".to_string()
    };

    let sanitized: String = picked
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();

    if sanitized.is_empty() {
        "jpg".to_string()
    } else {
        sanitized
    }
}
