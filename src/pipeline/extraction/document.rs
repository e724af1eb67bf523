use super::types::{ExtractedDocument, PdfExtractor, UploadedFile};
use super::ExtractionError;

/// Final path component of an uploaded file name.
///
/// Browsers may send a full client-side path; both `/` and `\` are treated as
/// separators regardless of the server platform.
pub fn basename(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Extract every page of an uploaded file into an `ExtractedDocument`.
pub fn extract_document(
    extractor: &dyn PdfExtractor,
    file: &UploadedFile,
) -> Result<ExtractedDocument, ExtractionError> {
    let body = extractor.extract_pages(&file.bytes)?;
    Ok(ExtractedDocument {
        filename: basename(&file.name).to_string(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::extraction::pdf::test_pdf::make_test_pdf;
    use crate::pipeline::extraction::PdfTextExtractor;

    #[test]
    fn basename_strips_windows_path() {
        assert_eq!(basename(r"C:\Users\dr\records\lab.pdf"), "lab.pdf");
    }

    #[test]
    fn basename_strips_unix_path() {
        assert_eq!(basename("/tmp/gradio/abc/prescription.pdf"), "prescription.pdf");
    }

    #[test]
    fn basename_mixed_separators_uses_last() {
        assert_eq!(basename(r"uploads/batch\2024/report.pdf"), "report.pdf");
    }

    #[test]
    fn basename_plain_name_unchanged() {
        assert_eq!(basename("discharge.pdf"), "discharge.pdf");
    }

    #[test]
    fn basename_trailing_separator_is_empty() {
        assert_eq!(basename("folder/"), "");
    }

    #[test]
    fn extract_document_uses_basename() {
        let file = UploadedFile::new(
            r"C:\scans\rx.pdf",
            make_test_pdf(&["Aspirin 75mg once daily"]),
        );
        let doc = extract_document(&PdfTextExtractor, &file).unwrap();
        assert_eq!(doc.filename, "rx.pdf");
        assert_eq!(doc.body.len(), 1);
        assert_eq!(doc.body[0].page_number, 1);
    }

    #[test]
    fn extract_document_propagates_errors() {
        let file = UploadedFile::new("photo.png", vec![0x89, 0x50, 0x4E, 0x47, 0, 0]);
        let err = extract_document(&PdfTextExtractor, &file).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(_)));
    }

    #[test]
    fn serializes_with_expected_field_names() {
        let doc = ExtractedDocument {
            filename: "rx.pdf".into(),
            body: vec![crate::pipeline::extraction::PageText {
                page_number: 1,
                content: "Aspirin 75mg once daily".into(),
            }],
        };
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            json,
            r#"{"filename":"rx.pdf","body":[{"page_number":1,"content":"Aspirin 75mg once daily"}]}"#
        );
    }
}
