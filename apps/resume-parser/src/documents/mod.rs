//! Document handlers — turn a resume file into plain text.
//!
//! The parsing framework scans its handler list in order and asks each one
//! whether it supports the file's extension. Handlers own their extension
//! list, so two handlers may overlap and the list order decides.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub mod pdf;
pub mod word;

pub use pdf::PdfHandler;
pub use word::WordHandler;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("{0}")]
    InvalidFormat(String),

    #[error("{0}")]
    Io(String),
}

#[async_trait]
pub trait DocumentHandler: Send + Sync {
    /// Extensions this handler accepts, lowercase with a leading dot (e.g. `".pdf"`).
    fn supported_extensions(&self) -> &[&'static str];

    /// Case-insensitive match of the path's extension against `supported_extensions`.
    fn supports_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.supported_extensions()
                    .iter()
                    .any(|supported| supported.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }

    async fn extract_text(&self, path: &Path) -> Result<String, DocumentError>;
}

/// The handler list used when the caller does not supply one: PDF first, then Word.
pub fn default_handlers() -> Vec<Arc<dyn DocumentHandler>> {
    vec![Arc::new(PdfHandler::new()), Arc::new(WordHandler::new())]
}

/// Checks that `path` is an existing, non-empty regular file.
pub(crate) async fn validate_file(path: &Path) -> Result<(), DocumentError> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(DocumentError::FileNotFound(path.display().to_string()))
        }
        Err(e) => {
            return Err(DocumentError::Io(format!(
                "Error reading file {}: {e}",
                path.display()
            )))
        }
    };

    if !metadata.is_file() {
        return Err(DocumentError::InvalidFormat(format!(
            "Path is not a file: {}",
            path.display()
        )));
    }

    if metadata.len() == 0 {
        return Err(DocumentError::InvalidFormat(format!(
            "File is empty: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Validates and reads the whole file.
pub(crate) async fn read_document(path: &Path) -> Result<Vec<u8>, DocumentError> {
    validate_file(path).await?;

    tokio::fs::read(path).await.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DocumentError::FileNotFound(path.display().to_string()),
        _ => DocumentError::Io(format!("Error reading file {}: {e}", path.display())),
    })
}
