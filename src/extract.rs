//! Document-to-text extraction for uploaded study material (TXT, PDF, DOCX).
//!
//! Everything works from in-memory bytes; nothing touches the filesystem.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

/// Extensions accepted by the upload endpoint.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
  UnsupportedFormat(String),
  Extraction(String),
}

impl std::fmt::Display for ExtractError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ExtractError::UnsupportedFormat(ext) => write!(f, "Unsupported extension: {ext}"),
      ExtractError::Extraction(msg) => f.write_str(msg),
    }
  }
}

impl std::error::Error for ExtractError {}

pub fn is_supported(extension: &str) -> bool {
  SUPPORTED_EXTENSIONS.contains(&extension.to_lowercase().as_str())
}

/// Turn an uploaded document into plain text. `extension` is matched case-insensitively.
pub fn extract(bytes: &[u8], extension: &str) -> Result<String, ExtractError> {
  match extension.to_lowercase().as_str() {
    "txt" => Ok(String::from_utf8_lossy(bytes).trim().to_string()),
    "pdf" => pdf_to_text(bytes),
    "docx" => docx_to_text(bytes),
    other => Err(ExtractError::UnsupportedFormat(other.to_string())),
  }
}

fn pdf_to_text(bytes: &[u8]) -> Result<String, ExtractError> {
  pdf_extract::extract_text_from_mem(bytes)
    .map(|s| s.trim().to_string())
    .map_err(|e| ExtractError::Extraction(e.to_string()))
}

/// DOCX is a zip container; the body lives in `word/document.xml` as `<w:p>`
/// paragraphs holding `<w:t>` text runs.
fn docx_to_text(bytes: &[u8]) -> Result<String, ExtractError> {
  let mut archive =
    zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::Extraction(e.to_string()))?;
  let mut xml = String::new();
  archive
    .by_name("word/document.xml")
    .map_err(|e| ExtractError::Extraction(e.to_string()))?
    .read_to_string(&mut xml)
    .map_err(|e| ExtractError::Extraction(e.to_string()))?;
  document_xml_to_text(&xml)
}

/// Paragraph texts joined by newlines. Inside runs, `<w:tab/>` becomes `\t` and
/// `<w:br/>`/`<w:cr/>` become `\n`; entities (numeric ones included) are decoded.
fn document_xml_to_text(xml: &str) -> Result<String, ExtractError> {
  let mut reader = Reader::from_str(xml);
  let mut paragraphs: Vec<String> = Vec::new();
  let mut current = String::new();
  let mut run_depth = 0usize;
  let mut in_text = false;

  loop {
    match reader.read_event().map_err(|e| ExtractError::Extraction(e.to_string()))? {
      Event::Start(e) => match e.name().as_ref() {
        b"w:r" => run_depth += 1,
        b"w:t" => in_text = run_depth > 0,
        _ => {}
      },
      Event::End(e) => match e.name().as_ref() {
        b"w:r" => run_depth = run_depth.saturating_sub(1),
        b"w:t" => in_text = false,
        b"w:p" => {
          if !current.is_empty() {
            paragraphs.push(std::mem::take(&mut current));
          }
        }
        _ => {}
      },
      // tab stops in paragraph properties are also `w:tab`; only runs count
      Event::Empty(e) if run_depth > 0 => match e.name().as_ref() {
        b"w:tab" => current.push('\t'),
        b"w:br" | b"w:cr" => current.push('\n'),
        _ => {}
      },
      Event::Text(t) if in_text => {
        let text = t.unescape().map_err(|e| ExtractError::Extraction(e.to_string()))?;
        current.push_str(&text);
      }
      Event::Eof => break,
      _ => {}
    }
  }
  if !current.is_empty() {
    paragraphs.push(current);
  }
  Ok(paragraphs.join("\n").trim().to_string())
}
