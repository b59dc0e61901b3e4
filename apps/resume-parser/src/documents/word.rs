//! Word (.docx) handler.
//!
//! A .docx file is a zip archive; the body lives in `word/document.xml`.
//! Output layout: body paragraphs first (blank ones dropped), then, if the
//! document has tables, a blank line and one `cell | cell` line per row.
//!
//! The markup scan is flat: tables nested inside table cells and text boxes
//! (`w:txbxContent`) inside a paragraph are not supported. A nested table
//! closes the outer one at its first `</w:tbl>`, and a text box paragraph
//! closes its host paragraph, dropping the host's trailing runs.

use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::{Captures, Regex};
use tracing::{debug, info};
use zip::ZipArchive;

use crate::documents::{read_document, DocumentError, DocumentHandler};

const DOCUMENT_XML: &str = "word/document.xml";

pub struct WordHandler;

impl WordHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WordHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentHandler for WordHandler {
    fn supported_extensions(&self) -> &[&'static str] {
        &[".docx"]
    }

    async fn extract_text(&self, path: &Path) -> Result<String, DocumentError> {
        info!("Parsing Word document: {}", path.display());
        let bytes = read_document(path).await?;
        let source = path.display().to_string();

        let extracted = tokio::task::spawn_blocking(move || {
            let xml = read_document_xml(bytes, &source)?;
            Ok::<_, DocumentError>(docx_text(&xml))
        })
        .await
        .map_err(|e| {
            DocumentError::Io(format!(
                "Error reading Word document: {} ({e})",
                path.display()
            ))
        })??;

        info!(
            "Parsed Word document {}: {} paragraphs, {} table rows, {} characters extracted",
            path.display(),
            extracted.paragraphs,
            extracted.table_rows,
            extracted.text.len()
        );
        Ok(extracted.text)
    }
}

fn read_document_xml(bytes: Vec<u8>, source: &str) -> Result<String, DocumentError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| invalid_docx(source, e))?;
    let mut entry = archive
        .by_name(DOCUMENT_XML)
        .map_err(|e| invalid_docx(source, e))?;

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| invalid_docx(source, e))?;
    debug!("Read {} bytes of {} from {}", xml.len(), DOCUMENT_XML, source);
    Ok(xml)
}

fn invalid_docx(source: &str, err: impl std::fmt::Display) -> DocumentError {
    DocumentError::InvalidFormat(format!("Invalid Word document: {source} ({err})"))
}

#[derive(Debug, Default, PartialEq)]
struct ExtractedDocx {
    text: String,
    paragraphs: usize,
    table_rows: usize,
}

fn docx_text(xml: &str) -> ExtractedDocx {
    let tables = table_re();
    let body = tables.replace_all(xml, "");

    let paragraphs: Vec<String> = paragraph_texts(&body)
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect();

    let mut rows = Vec::new();
    for table in tables.find_iter(xml) {
        for row in row_re().captures_iter(table.as_str()) {
            let cells: Vec<String> = cell_re()
                .captures_iter(row.get(1).map_or("", |m| m.as_str()))
                .map(|cell| {
                    paragraph_texts(cell.get(1).map_or("", |m| m.as_str()))
                        .join("\n")
                        .trim()
                        .to_string()
                })
                .filter(|cell| !cell.is_empty())
                .collect();
            if !cells.is_empty() {
                rows.push(cells.join(" | "));
            }
        }
    }

    let mut text = paragraphs.join("\n");
    if !rows.is_empty() {
        text.push_str("\n\n");
        text.push_str(&rows.join("\n"));
    }

    ExtractedDocx {
        text,
        paragraphs: paragraphs.len(),
        table_rows: rows.len(),
    }
}

/// Text of every `<w:p>` in `xml`, in document order.
fn paragraph_texts(xml: &str) -> Vec<String> {
    paragraph_re()
        .captures_iter(xml)
        .map(|p| run_text(p.get(1).map_or("", |m| m.as_str())))
        .collect()
}

fn run_text(paragraph_xml: &str) -> String {
    // Tab stops declared in paragraph properties are not content.
    let content = paragraph_props_re().replace_all(paragraph_xml, "");

    let mut text = String::new();
    for token in run_re().captures_iter(&content) {
        match token.get(1) {
            Some(t) => text.push_str(&decode_entities(t.as_str())),
            None if token[0].starts_with("<w:tab") => text.push('\t'),
            None => text.push('\n'),
        }
    }
    text
}

fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    entity_re()
        .replace_all(raw, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                hex if hex.starts_with("#x") || hex.starts_with("#X") => {
                    u32::from_str_radix(&hex[2..], 16).ok().and_then(char::from_u32)
                }
                dec => dec[1..].parse::<u32>().ok().and_then(char::from_u32),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn static_regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static regex pattern"))
}

fn table_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    static_regex(&RE, r"(?s)<w:tbl(?:\s[^>]*)?>.*?</w:tbl>")
}

fn row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    static_regex(&RE, r"(?s)<w:tr(?:\s[^>]*)?>(.*?)</w:tr>")
}

fn cell_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    static_regex(&RE, r"(?s)<w:tc(?:\s[^>]*)?>(.*?)</w:tc>")
}

fn paragraph_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    static_regex(&RE, r"(?s)<w:p(?:\s[^>]*?)?(?:/>|>(.*?)</w:p>)")
}

fn paragraph_props_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    static_regex(&RE, r"(?s)<w:pPr>.*?</w:pPr>")
}

fn run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    static_regex(
        &RE,
        r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:tab\s*/>|<w:br(?:\s[^>]*)?/>",
    )
}

fn entity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    static_regex(&RE, r"&(#[xX][0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);")
}
