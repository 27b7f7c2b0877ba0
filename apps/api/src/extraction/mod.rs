//! Document text extraction: the boundary between uploaded bytes and the scoring core.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>` so the backend can be swapped in tests.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type '{0}'. Only PDF and TXT files are supported")]
    UnsupportedFormat(String),

    #[error("Could not read text from document: {0}")]
    Unreadable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractionError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "txt" => Ok(DocumentKind::PlainText),
            _ => Err(ExtractionError::UnsupportedFormat(file_name.to_string())),
        }
    }
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ExtractionError>;
}

/// PDF via `pdf-extract`, plain text as lossy UTF-8.
pub struct DocumentTextExtractor;

#[async_trait]
impl TextExtractor for DocumentTextExtractor {
    async fn extract(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ExtractionError> {
        let kind = DocumentKind::from_file_name(file_name)?;
        debug!("Extracting {} bytes from {file_name} as {kind:?}", bytes.len());

        match kind {
            DocumentKind::PlainText => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            DocumentKind::Pdf => tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text_from_mem(&bytes)
                    .map_err(|e| ExtractionError::Unreadable(e.to_string()))
            })
            .await
            .map_err(|e| ExtractionError::Unreadable(e.to_string()))?,
        }
    }
}
