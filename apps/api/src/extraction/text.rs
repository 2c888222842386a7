use super::{DocumentFormat, ExtractionError};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Strict UTF-8. A NUL byte means a binary file was renamed to `.txt`.
pub(super) fn extract_txt(bytes: &[u8]) -> Result<String, ExtractionError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    if bytes.contains(&0) {
        return Err(ExtractionError::corrupt(
            DocumentFormat::Txt,
            "file contains binary data",
        ));
    }

    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| ExtractionError::corrupt(DocumentFormat::Txt, format!("not valid UTF-8 ({e})")))
}
