//! Resume extractor — fans the document text out to every registered field
//! extractor and folds the answers into one `ResumeRecord`.

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, info};

use crate::errors::ResumeError;
use crate::extractors::{
    standard_registry, validate_text, ExtractorRegistry, EMAIL_FIELD, NAME_FIELD, SKILLS_FIELD,
};
use crate::llm_client::LlmClient;
use crate::models::{FieldValue, ResumeRecord};

pub struct ResumeExtractor {
    extractors: ExtractorRegistry,
    llm: Arc<dyn LlmClient>,
}

impl ResumeExtractor {
    /// Fails with `ConfigurationError` if `extractors` is empty.
    pub fn new(extractors: ExtractorRegistry, llm: Arc<dyn LlmClient>) -> Result<Self, ResumeError> {
        if extractors.is_empty() {
            return Err(ResumeError::ConfigurationError(
                "Extractor registry cannot be empty".to_string(),
            ));
        }
        Ok(Self { extractors, llm })
    }

    /// Orchestrator with the `name`, `email` and `skills` extractors.
    pub fn standard(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            extractors: standard_registry(),
            llm,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.extractors.keys().map(String::as_str)
    }

    /// Runs every extractor concurrently over `text`.
    ///
    /// The first extractor error aborts the whole run; the remaining in-flight
    /// extractions are dropped and no partial record is returned.
    pub async fn extract(&self, text: &str) -> Result<ResumeRecord, ResumeError> {
        validate_text(text)?;

        info!(
            "Extracting {} fields from {} characters of resume text",
            self.extractors.len(),
            text.len()
        );

        let llm = self.llm.as_ref();
        let results = try_join_all(self.extractors.iter().map(|(field, extractor)| async move {
            let value = extractor.extract(text, llm).await?;
            Ok::<_, ResumeError>((field.as_str(), value))
        }))
        .await?;

        Ok(assemble(results))
    }
}

/// Whitelists the three record slots; results of any other field are discarded.
fn assemble<'a>(results: impl IntoIterator<Item = (&'a str, Option<FieldValue>)>) -> ResumeRecord {
    let mut record = ResumeRecord::default();

    for (field, value) in results {
        let Some(value) = value else {
            debug!("No value found for field '{}'", field);
            continue;
        };
        match field {
            NAME_FIELD => record.name = value.into_text(),
            EMAIL_FIELD => record.email = value.into_text(),
            SKILLS_FIELD => record.skills = value.into_list(),
            other => debug!("Discarding value of unmapped field '{}'", other),
        }
    }

    record
}
