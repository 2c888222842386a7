use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::{DocumentFormat, ExtractionError};

const DOCUMENT_PART: &str = "word/document.xml";

/// Reads the main document part of a WordprocessingML package and flattens
/// it to text: one line per paragraph, runs concatenated in order.
pub(super) fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::corrupt(DocumentFormat::Docx, e))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::corrupt(DocumentFormat::Docx, format!("{DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::corrupt(DocumentFormat::Docx, e))?;

    document_xml_to_text(&xml)
}

fn document_xml_to_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text_run = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            ExtractionError::corrupt(
                DocumentFormat::Docx,
                format!("malformed XML at byte {}: {e}", reader.buffer_position()),
            )
        })?;

        match event {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:cr" => out.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text_run => {
                let text = t
                    .unescape()
                    .map_err(|e| ExtractionError::corrupt(DocumentFormat::Docx, e))?;
                out.push_str(&text);
            }
            Event::CData(t) if in_text_run => {
                out.push_str(&String::from_utf8_lossy(&t));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}
