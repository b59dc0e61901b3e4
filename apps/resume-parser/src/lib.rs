//! Resume parser: pulls a candidate's name, email and skills out of PDF and
//! Word resumes by pairing document text extraction with one LLM prompt per field.
//!
//! ```no_run
//! use std::sync::Arc;
//! use resume_parser::{GeminiClient, GeminiSettings, ResumeExtractor, ResumeParserFramework};
//!
//! # async fn run() -> Result<(), resume_parser::ResumeError> {
//! let llm = Arc::new(GeminiClient::new(GeminiSettings::default())?);
//! let framework = ResumeParserFramework::new(ResumeExtractor::standard(llm));
//! let record = framework.parse_resume("resume.pdf").await?;
//! println!("{} <{}>: {:?}", record.name, record.email, record.skills);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod documents;
pub mod errors;
pub mod extractors;
pub mod framework;
pub mod llm_client;
pub mod models;

#[cfg(test)]
mod testing;

pub use documents::{DocumentHandler, PdfHandler, WordHandler};
pub use errors::ResumeError;
pub use extractors::{ExtractorRegistry, FieldExtractor, ResumeExtractor};
pub use framework::ResumeParserFramework;
pub use llm_client::{GeminiClient, GeminiSettings, GenerationOptions, LlmClient};
pub use models::{FieldValue, ResumeRecord};
