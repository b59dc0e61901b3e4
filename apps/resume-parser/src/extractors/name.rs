use async_trait::async_trait;
use tracing::debug;

use crate::errors::ResumeError;
use crate::extractors::prompts::name_prompt;
use crate::extractors::{ask, validate_text, FieldExtractor};
use crate::llm_client::LlmClient;
use crate::models::FieldValue;

/// Candidate's full name, as written in the resume.
pub struct NameExtractor;

#[async_trait]
impl FieldExtractor for NameExtractor {
    async fn extract(
        &self,
        text: &str,
        llm: &dyn LlmClient,
    ) -> Result<Option<FieldValue>, ResumeError> {
        validate_text(text)?;
        let answer = ask(llm, &name_prompt(text)).await?;
        debug!("Name extraction found a value: {}", answer.is_some());
        Ok(answer.map(FieldValue::Text))
    }
}
