//! Resume parser framework — the caller-facing entry point.
//!
//! `parse_resume` picks the first handler (in list order) that accepts the
//! file's extension, extracts its text and hands it to the `ResumeExtractor`.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::documents::{default_handlers, DocumentHandler};
use crate::errors::ResumeError;
use crate::extractors::ResumeExtractor;
use crate::models::ResumeRecord;

pub struct ResumeParserFramework {
    handlers: Vec<Arc<dyn DocumentHandler>>,
    extractor: ResumeExtractor,
}

impl ResumeParserFramework {
    /// Framework with the default handlers: PDF, then Word.
    pub fn new(extractor: ResumeExtractor) -> Self {
        Self {
            handlers: default_handlers(),
            extractor,
        }
    }

    /// Framework with an explicit, ordered handler list.
    /// Fails with `ConfigurationError` if `handlers` is empty.
    pub fn with_handlers(
        extractor: ResumeExtractor,
        handlers: Vec<Arc<dyn DocumentHandler>>,
    ) -> Result<Self, ResumeError> {
        if handlers.is_empty() {
            return Err(ResumeError::ConfigurationError(
                "Document handler list cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            handlers,
            extractor,
        })
    }

    /// Union of every handler's extensions, deduplicated, in handler order.
    pub fn supported_extensions(&self) -> Vec<&'static str> {
        let mut extensions: Vec<&'static str> = Vec::new();
        for ext in self
            .handlers
            .iter()
            .flat_map(|h| h.supported_extensions().iter().copied())
        {
            if !extensions.contains(&ext) {
                extensions.push(ext);
            }
        }
        extensions
    }

    fn select_handler(&self, path: &Path) -> Result<&dyn DocumentHandler, ResumeError> {
        self.handlers
            .iter()
            .find(|h| h.supports_extension(path))
            .map(|h| h.as_ref())
            .ok_or_else(|| {
                ResumeError::UnsupportedFormat(format!(
                    "{} (supported extensions: {})",
                    path.display(),
                    self.supported_extensions().join(", ")
                ))
            })
    }

    /// Parses one resume file into a `ResumeRecord`.
    /// Any failure aborts the call; no partial record is returned.
    pub async fn parse_resume(&self, file_path: impl AsRef<Path>) -> Result<ResumeRecord, ResumeError> {
        let path = file_path.as_ref();
        let handler = self.select_handler(path)?;
        debug!(
            "Selected handler {:?} for {}",
            handler.supported_extensions(),
            path.display()
        );

        let text = handler.extract_text(path).await?;
        let record = self.extractor.extract(&text).await?;

        info!(
            "Parsed resume {}: name found: {}, email found: {}, {} skills",
            path.display(),
            !record.name.is_empty(),
            !record.email.is_empty(),
            record.skills.len()
        );
        Ok(record)
    }
}
