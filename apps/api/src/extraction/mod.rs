//! File text extraction: uploaded resume bytes → normalized plain text.
//!
//! Pure functions only. No filesystem, no network. PDF parsing is CPU bound,
//! so async callers should run `extract` on the blocking pool.

use std::fmt;

use bytes::Bytes;
use thiserror::Error;

mod docx;
mod pdf;
mod text;

#[cfg(test)]
pub mod fixtures;

/// The closed set of formats we can turn into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Case-insensitive; tolerates a leading dot (`".PDF"`).
    pub fn from_extension(extension: &str) -> Result<Self, ExtractionError> {
        let normalized = extension.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" => Ok(DocumentFormat::Txt),
            _ => Err(ExtractionError::UnsupportedFormat(normalized)),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Txt => "txt",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported file format '{0}' (expected pdf, docx or txt)")]
    UnsupportedFormat(String),

    #[error("could not read {format} document: {reason}")]
    CorruptDocument {
        format: DocumentFormat,
        reason: String,
    },

    #[error("{0} document contains no text")]
    Empty(DocumentFormat),
}

impl ExtractionError {
    pub(crate) fn corrupt(format: DocumentFormat, reason: impl fmt::Display) -> Self {
        ExtractionError::CorruptDocument {
            format,
            reason: reason.to_string(),
        }
    }
}

/// An upload as received by a handler. Lives for one request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub bytes: Bytes,
    /// Lowercased extension taken from the uploaded filename; may be empty.
    pub extension: String,
    pub filename: Option<String>,
}

impl UploadedDocument {
    pub fn new(bytes: Bytes, filename: Option<String>) -> Self {
        let extension = filename
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        Self {
            bytes,
            extension,
            filename,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    pub text: String,
    pub format: DocumentFormat,
}

impl ExtractedText {
    /// Length in characters, which is what the minimum-length policy counts.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Extracts normalized text from `bytes`, dispatching on `extension`.
///
/// Never returns an empty success: documents that decode to nothing fail with
/// [`ExtractionError::Empty`].
pub fn extract(bytes: &[u8], extension: &str) -> Result<ExtractedText, ExtractionError> {
    let format = DocumentFormat::from_extension(extension)?;

    let raw = match format {
        DocumentFormat::Pdf => pdf::extract_pdf(bytes)?,
        DocumentFormat::Docx => docx::extract_docx(bytes)?,
        DocumentFormat::Txt => text::extract_txt(bytes)?,
    };

    let text = normalize(&raw);
    if text.is_empty() {
        return Err(ExtractionError::Empty(format));
    }

    Ok(ExtractedText { text, format })
}

/// Unifies line endings, drops control characters (tab survives), strips
/// trailing spaces and collapses blank-line runs.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut previous_blank = false;
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");

    for line in unified.lines() {
        let cleaned: String = line
            .chars()
            .filter(|c| *c == '\t' || !c.is_control())
            .collect();
        let cleaned = cleaned.trim_end();

        if cleaned.trim().is_empty() {
            if previous_blank {
                continue;
            }
            previous_blank = true;
            out.push('\n');
            continue;
        }

        previous_blank = false;
        out.push_str(cleaned);
        out.push('\n');
    }

    out.trim().to_string()
}
