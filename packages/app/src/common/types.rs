use serde::{Deserialize, Serialize};

/// An image picked on the device, ready for object storage.
///
/// `file_name` and `mime_type` are whatever the picker reported; both feed
/// the storage extension fallback chain (mime subtype, then file name, then
/// `"jpg"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoAttachment {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
}

impl PhotoAttachment {
    /// Content type sent to object storage.
    pub fn content_type(&self) -> &str {
        self.mime_type.as_deref().unwrap_or("image/jpeg")
    }
}
