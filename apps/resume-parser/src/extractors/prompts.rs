// Field extraction prompt templates.
// One instruction per field; the resume text is appended verbatim by `with_resume_text`.

use crate::llm_client::prompts::{with_resume_text, PLAIN_OUTPUT};

pub const NAME_INSTRUCTION: &str = "Extract the name of the candidate from the text. \
    Return only the name,";

pub const EMAIL_INSTRUCTION: &str = "Extract the email address from the text. \
    Return only the email address,";

pub const SKILLS_INSTRUCTION: &str = "Extract the skills of the candidate from the text. \
    Return only the skills separated by commas with no spaces,";

/// Literal example that pins down the comma-separated skills format.
pub const SKILLS_FORMAT_EXAMPLE: &str =
    "Here is an example of the expected format: 'Python,Java,SQL'";

pub fn name_prompt(text: &str) -> String {
    with_resume_text(&format!("{NAME_INSTRUCTION} {PLAIN_OUTPUT}"), text)
}

pub fn email_prompt(text: &str) -> String {
    with_resume_text(&format!("{EMAIL_INSTRUCTION} {PLAIN_OUTPUT}"), text)
}

pub fn skills_prompt(text: &str) -> String {
    with_resume_text(
        &format!("{SKILLS_INSTRUCTION} {PLAIN_OUTPUT} {SKILLS_FORMAT_EXAMPLE}"),
        text,
    )
}
