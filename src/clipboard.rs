//! Clipboard payloads and image extraction for paste.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::Result;

/// One item of a paste event: declared MIME type plus raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardItem {
    mime: String,
    bytes: Vec<u8>,
}

impl ClipboardItem {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// An item whose type will be sniffed from its contents.
    pub fn untyped(bytes: Vec<u8>) -> Self {
        Self::new(String::new(), bytes)
    }

    /// Read a file, declaring the type guessed from its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let mime = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_default();
        Ok(Self::new(mime, bytes))
    }

    /// The declared type, or the type sniffed from the bytes when none was declared.
    pub fn mime(&self) -> Option<String> {
        if self.mime.is_empty() {
            infer::get(&self.bytes).map(|kind| kind.mime_type().to_string())
        } else {
            Some(self.mime.clone())
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime().is_some_and(|m| m.starts_with("image/"))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `data:<mime>;base64,<payload>`
    pub fn to_data_uri(&self) -> String {
        let mime = self
            .mime()
            .unwrap_or_else(|| "application/octet-stream".to_string());
        format!("data:{mime};base64,{}", STANDARD.encode(&self.bytes))
    }
}

/// Data URI of the first image item; later items are ignored.
pub fn first_image_data_uri(items: &[ClipboardItem]) -> Option<String> {
    items
        .iter()
        .find(|item| item.is_image())
        .map(ClipboardItem::to_data_uri)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::io::Write;

    // 8-byte PNG signature followed by the start of an IHDR chunk.
    const PNG_BYTES: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52,
    ];

    #[test]
    fn test_declared_type_wins() {
        let item = ClipboardItem::new("image/gif", b"abc".to_vec());
        assert_eq!(item.mime().as_deref(), Some("image/gif"));
        assert_eq!(item.to_data_uri(), "data:image/gif;base64,YWJj");
    }

    #[test]
    fn test_sniffed_type() {
        let item = ClipboardItem::untyped(PNG_BYTES.to_vec());
        assert_eq!(item.mime().as_deref(), Some("image/png"));
        assert!(item.is_image());
    }

    #[test]
    fn test_unknown_bytes_are_not_images() {
        let item = ClipboardItem::untyped(b"plain words".to_vec());
        assert!(!item.is_image());
    }

    #[test]
    fn test_first_image_selected() {
        let items = vec![
            ClipboardItem::new("text/plain", b"hello".to_vec()),
            ClipboardItem::new("image/png", b"first".to_vec()),
            ClipboardItem::new("image/jpeg", b"second".to_vec()),
        ];
        let uri = first_image_data_uri(&items).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(first_image_data_uri(&items[..1]), None);
    }

    #[test]
    fn test_from_file_guesses_type() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(PNG_BYTES).unwrap();

        let item = ClipboardItem::from_file(file.path()).unwrap();

        assert_eq!(item.mime().as_deref(), Some("image/png"));
        assert_eq!(item.bytes(), PNG_BYTES);
    }
}
