use async_trait::async_trait;
use tracing::debug;

use crate::errors::ResumeError;
use crate::extractors::prompts::email_prompt;
use crate::extractors::{ask, validate_text, FieldExtractor};
use crate::llm_client::LlmClient;
use crate::models::FieldValue;

/// Candidate's email address. The answer is not validated as an address.
pub struct EmailExtractor;

#[async_trait]
impl FieldExtractor for EmailExtractor {
    async fn extract(
        &self,
        text: &str,
        llm: &dyn LlmClient,
    ) -> Result<Option<FieldValue>, ResumeError> {
        validate_text(text)?;
        let answer = ask(llm, &email_prompt(text)).await?;
        debug!("Email extraction found a value: {}", answer.is_some());
        Ok(answer.map(FieldValue::Text))
    }
}
