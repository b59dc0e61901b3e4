// Shared prompt fragments.
// Each component that issues LLM calls defines its own prompts.rs alongside it;
// this file only holds the pieces every extraction prompt shares.

/// Opening sentence of every resume extraction prompt.
pub const RESUME_PREAMBLE: &str = "You will be provided the text of a resume.";

/// Closing instruction that keeps the model from decorating its answer.
pub const PLAIN_OUTPUT: &str = "no other text or formatting.";

/// Label that introduces the embedded document text.
pub const RESUME_TEXT_LABEL: &str = "Resume text:";

/// Appends the document text, verbatim, after the instruction block.
pub fn with_resume_text(instruction: &str, text: &str) -> String {
    format!("{RESUME_PREAMBLE} {instruction}\n{RESUME_TEXT_LABEL}\n{text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_resume_text_embeds_text_verbatim() {
        let text = "  Jane Roe\n\tjane@example.com  ";
        let prompt = with_resume_text("Extract the name.", text);
        assert!(prompt.starts_with(RESUME_PREAMBLE));
        assert!(prompt.ends_with(text));
        assert!(prompt.contains("Extract the name.\nResume text:\n"));
    }
}
