//! Field extractors — one LLM round trip per resume field.
//!
//! Each extractor embeds the full document text in its own prompt and turns
//! the model's answer into a `FieldValue`. An empty answer is `Ok(None)`,
//! not an error; the orchestrator fills in the default.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::ResumeError;
use crate::llm_client::{GenerationOptions, LlmClient};
use crate::models::FieldValue;

pub mod email;
pub mod name;
pub mod orchestrator;
pub mod prompts;
pub mod skills;

pub use email::EmailExtractor;
pub use name::NameExtractor;
pub use orchestrator::ResumeExtractor;
pub use skills::SkillsExtractor;

pub const NAME_FIELD: &str = "name";
pub const EMAIL_FIELD: &str = "email";
pub const SKILLS_FIELD: &str = "skills";

/// Field name → extractor. Keys are unique; iteration order does not affect the result.
pub type ExtractorRegistry = BTreeMap<String, Arc<dyn FieldExtractor>>;

#[async_trait]
pub trait FieldExtractor: Send + Sync {
    /// Derives one field from `text` with exactly one call to `llm`.
    /// Blank `text` fails with `InvalidInput` before the LLM is called.
    async fn extract(
        &self,
        text: &str,
        llm: &dyn LlmClient,
    ) -> Result<Option<FieldValue>, ResumeError>;
}

/// The registry the CLI uses: `name`, `email`, `skills`.
pub fn standard_registry() -> ExtractorRegistry {
    let mut registry: ExtractorRegistry = BTreeMap::new();
    registry.insert(NAME_FIELD.to_string(), Arc::new(NameExtractor));
    registry.insert(EMAIL_FIELD.to_string(), Arc::new(EmailExtractor));
    registry.insert(SKILLS_FIELD.to_string(), Arc::new(SkillsExtractor));
    registry
}

pub fn validate_text(text: &str) -> Result<(), ResumeError> {
    if text.trim().is_empty() {
        return Err(ResumeError::InvalidInput(
            "Text cannot be empty or whitespace only".to_string(),
        ));
    }
    Ok(())
}

/// Sends `prompt` with default generation options.
/// Returns the trimmed answer, or `None` when the model answered with nothing.
pub(crate) async fn ask(llm: &dyn LlmClient, prompt: &str) -> Result<Option<String>, ResumeError> {
    let response = llm
        .generate_response(prompt, &GenerationOptions::default())
        .await?;
    let answer = response.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}
