use async_trait::async_trait;
use tracing::debug;

use crate::errors::ResumeError;
use crate::extractors::prompts::skills_prompt;
use crate::extractors::{ask, validate_text, FieldExtractor};
use crate::llm_client::LlmClient;
use crate::models::FieldValue;

/// Candidate's skills, asked for as one comma-separated line.
pub struct SkillsExtractor;

#[async_trait]
impl FieldExtractor for SkillsExtractor {
    async fn extract(
        &self,
        text: &str,
        llm: &dyn LlmClient,
    ) -> Result<Option<FieldValue>, ResumeError> {
        validate_text(text)?;
        let skills = ask(llm, &skills_prompt(text))
            .await?
            .map(|answer| parse_skills(&answer));
        debug!(
            "Skills extraction found {} skills",
            skills.as_ref().map_or(0, Vec::len)
        );
        Ok(skills.map(FieldValue::List))
    }
}

/// Splits on commas and trims each piece. Pieces left empty by stray
/// commas are kept, so `"Python,,Java,"` has four entries.
pub fn parse_skills(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(|skill| skill.trim().to_string())
        .collect()
}
