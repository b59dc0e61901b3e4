//! PDF handler. Uses pdf-extract to pull the text of every page.

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::documents::{read_document, DocumentError, DocumentHandler};

pub struct PdfHandler;

impl PdfHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentHandler for PdfHandler {
    fn supported_extensions(&self) -> &[&'static str] {
        &[".pdf"]
    }

    async fn extract_text(&self, path: &Path) -> Result<String, DocumentError> {
        debug!("Extracting PDF: {:?}", path);
        let bytes = read_document(path).await?;

        // pdf-extract is CPU bound and may panic on malformed content streams.
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| {
                DocumentError::InvalidFormat(format!(
                    "Invalid PDF file: {} ({e})",
                    path.display()
                ))
            })?
            .map_err(|e| {
                DocumentError::InvalidFormat(format!("Invalid PDF file: {} ({e})", path.display()))
            })?;

        info!(
            "Parsed PDF document {}: {} characters extracted",
            path.display(),
            text.len()
        );
        Ok(text)
    }
}
