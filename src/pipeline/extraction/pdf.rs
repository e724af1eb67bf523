use lopdf::Document;

use super::format::{detect_mime_from_bytes, is_pdf};
use super::types::{PageText, PdfExtractor};
use super::ExtractionError;

/// PDF text extractor using the pdf-extract crate.
/// Handles digital PDFs with embedded text layers; no OCR.
pub struct PdfTextExtractor;

impl PdfExtractor for PdfTextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError> {
        if !is_pdf(pdf_bytes) {
            return Err(ExtractionError::UnsupportedFormat(
                detect_mime_from_bytes(pdf_bytes).to_string(),
            ));
        }

        let doc = Document::load_mem(pdf_bytes)
            .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;
        if doc.trailer.get(b"Encrypt").is_ok() {
            return Err(ExtractionError::Encrypted);
        }

        // pdf_extract can panic on malformed content streams
        let page_texts = std::panic::catch_unwind(|| {
            pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        })
        .map_err(|panic| ExtractionError::PdfParsing(panic_message(panic.as_ref())))?
        .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;

        Ok(page_texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| PageText {
                page_number: i + 1,
                content: normalize_page_text(&text),
            })
            .collect())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("text extraction panicked: {detail}")
}

/// Trim every line and drop blank ones. Layout is not reconstructed.
pub fn normalize_page_text(raw: &str) -> String {
    raw.lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}


#[cfg(test)]
mod tests {
    use super::test_pdf::{make_encrypted_pdf, make_pdf_with_missing_font, make_test_pdf};
    use super::*;

    #[test]
    fn single_page_prescription() {
        let pdf = make_test_pdf(&["Aspirin 75mg once daily"]);
        let pages = PdfTextExtractor.extract_pages(&pdf).unwrap();

        assert_eq!(
            pages,
            vec![PageText {
                page_number: 1,
                content: "Aspirin 75mg once daily".into(),
            }]
        );
    }

    #[test]
    fn pages_numbered_in_document_order() {
        let pdf = make_test_pdf(&["First page", "Second page", "Third page"]);
        let pages = PdfTextExtractor.extract_pages(&pdf).unwrap();

        let numbers: Vec<usize> = pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(pages[0].content.contains("First"));
        assert!(pages[2].content.contains("Third"));
    }

    #[test]
    fn invalid_pdf_returns_error() {
        let result = PdfTextExtractor.extract_pages(b"not a pdf");
        assert!(matches!(result, Err(ExtractionError::UnsupportedFormat(_))));
    }

    #[test]
    fn truncated_pdf_returns_parse_error() {
        let result = PdfTextExtractor.extract_pages(b"%PDF-1.4\n garbage");
        assert!(matches!(result, Err(ExtractionError::PdfParsing(_))));
    }

    #[test]
    fn image_upload_rejected_with_detected_type() {
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        match PdfTextExtractor.extract_pages(&png) {
            Err(ExtractionError::UnsupportedFormat(mime)) => assert_eq!(mime, "image/png"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn encrypted_pdf_rejected() {
        let pdf = make_encrypted_pdf();
        let result = PdfTextExtractor.extract_pages(&pdf);
        assert!(matches!(result, Err(ExtractionError::Encrypted)));
    }

    #[test]
    fn encrypt_keyword_in_page_text_is_not_encryption() {
        let pdf = make_test_pdf(&["See /Encrypt section of consent form"]);
        let pages = PdfTextExtractor.extract_pages(&pdf).unwrap();

        assert_eq!(pages.len(), 1);
        assert!(pages[0].content.contains("Encrypt section"));
    }

    #[test]
    fn extraction_panic_becomes_parse_error() {
        let pdf = make_pdf_with_missing_font();
        let result = PdfTextExtractor.extract_pages(&pdf);
        assert!(matches!(result, Err(ExtractionError::PdfParsing(_))));
    }

    #[test]
    fn panic_message_reads_string_payloads() {
        assert_eq!(
            panic_message(&"missing font"),
            "text extraction panicked: missing font"
        );
        assert_eq!(
            panic_message(&String::from("bad stream")),
            "text extraction panicked: bad stream"
        );
        assert_eq!(panic_message(&42u8), "text extraction panicked: unknown cause");
    }

    #[test]
    fn normalize_trims_and_drops_blank_lines() {
        let raw = "\n\n  Aspirin 75mg once daily  \n\n\t\n";
        assert_eq!(normalize_page_text(raw), "Aspirin 75mg once daily");
    }

    #[test]
    fn normalize_keeps_line_order() {
        let raw = "Hemoglobin 13.5 g/dL\n\n  WBC 7.2  \nPlatelets 250";
        assert_eq!(
            normalize_page_text(raw),
            "Hemoglobin 13.5 g/dL\nWBC 7.2\nPlatelets 250"
        );
    }
}
