//! Test doubles and fixture builders shared by the unit tests.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::documents::{DocumentError, DocumentHandler};
use crate::llm_client::{validate_prompt, GenerationOptions, LlmClient, LlmError};

#[derive(Debug, Clone, Copy)]
pub enum StubFailure {
    Network,
    Authentication,
    Provider,
}

impl StubFailure {
    fn into_error(self) -> LlmError {
        match self {
            StubFailure::Network => LlmError::Network("connection refused".to_string()),
            StubFailure::Authentication => LlmError::Authentication("API key not valid".to_string()),
            StubFailure::Provider => LlmError::Api {
                status: 500,
                message: "model overloaded".to_string(),
            },
        }
    }
}

enum Reply {
    Text(String),
    Fail(StubFailure),
}

/// Deterministic LLM: the first rule whose needle occurs in the prompt wins,
/// otherwise the default response is returned. Failure rules are checked first.
pub struct StubLlm {
    rules: Vec<(String, Reply)>,
    default_response: String,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl StubLlm {
    pub fn new(default_response: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            default_response: default_response.into(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn respond_to(mut self, needle: &str, response: &str) -> Self {
        self.rules
            .push((needle.to_string(), Reply::Text(response.to_string())));
        self
    }

    pub fn fail_on(mut self, needle: &str, failure: StubFailure) -> Self {
        self.rules
            .insert(0, (needle.to_string(), Reply::Fail(failure)));
        self
    }

    /// Answers the three standard resume prompts.
    pub fn resume(name: &str, email: &str, skills: &str) -> Self {
        Self::new("")
            .respond_to("Extract the name", name)
            .respond_to("Extract the email address", email)
            .respond_to("Extract the skills", skills)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for StubLlm {
    async fn generate_response(
        &self,
        prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, LlmError> {
        validate_prompt(prompt)?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        for (needle, reply) in &self.rules {
            if prompt.contains(needle.as_str()) {
                return match reply {
                    Reply::Text(text) => Ok(text.clone()),
                    Reply::Fail(failure) => Err(failure.into_error()),
                };
            }
        }
        Ok(self.default_response.clone())
    }
}

/// Handler that never touches the disk.
pub struct StubHandler {
    extensions: &'static [&'static str],
    outcome: Result<String, fn(&Path) -> DocumentError>,
    seen: Mutex<Vec<PathBuf>>,
}

impl StubHandler {
    pub fn returning(extensions: &'static [&'static str], text: &str) -> Self {
        Self {
            extensions,
            outcome: Ok(text.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(
        extensions: &'static [&'static str],
        error: fn(&Path) -> DocumentError,
    ) -> Self {
        Self {
            extensions,
            outcome: Err(error),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<PathBuf> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentHandler for StubHandler {
    fn supported_extensions(&self) -> &[&'static str] {
        self.extensions
    }

    async fn extract_text(&self, path: &Path) -> Result<String, DocumentError> {
        self.seen.lock().unwrap().push(path.to_path_buf());
        match &self.outcome {
            Ok(text) => Ok(text.clone()),
            Err(make_error) => Err(make_error(path)),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// .docx fixtures
// ────────────────────────────────────────────────────────────────────────────

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn paragraph(text: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:pStyle w:val="Normal"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        xml_escape(text)
    )
}

pub fn table(rows: &[&[&str]]) -> String {
    let mut xml = String::from(r#"<w:tbl><w:tblPr><w:tblW w:w="0" w:type="auto"/></w:tblPr>"#);
    for row in rows {
        xml.push_str("<w:tr>");
        for cell in *row {
            xml.push_str(r#"<w:tc><w:tcPr><w:tcW w:w="4500" w:type="dxa"/></w:tcPr>"#);
            xml.push_str(&paragraph(cell));
            xml.push_str("</w:tc>");
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

pub fn docx_body(blocks: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
        blocks.concat()
    )
}

pub fn write_docx(path: &Path, document_xml: &str) {
    let file = std::fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0"?><Types/>"#).unwrap();
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document_xml.as_bytes()).unwrap();
    zip.finish().unwrap();
}
