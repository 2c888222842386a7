use std::panic::{self, AssertUnwindSafe};

use super::{DocumentFormat, ExtractionError};

/// Extracts all page text in document order.
///
/// `pdf-extract` can panic on malformed input instead of returning an error;
/// both outcomes become `CorruptDocument`.
pub(super) fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    if !bytes.starts_with(b"%PDF") {
        return Err(ExtractionError::corrupt(
            DocumentFormat::Pdf,
            "missing %PDF header",
        ));
    }

    match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::corrupt(DocumentFormat::Pdf, e)),
        Err(_) => Err(ExtractionError::corrupt(
            DocumentFormat::Pdf,
            "parser aborted on malformed content",
        )),
    }
}
