pub const MIME_PDF: &str = "application/pdf";

/// Detect MIME type from file magic bytes (not extension or Content-Type header).
pub fn detect_mime_from_bytes(bytes: &[u8]) -> &'static str {
    if bytes.len() < 4 {
        return "application/octet-stream";
    }

    // PDF: %PDF
    if bytes.starts_with(b"%PDF") {
        return MIME_PDF;
    }
    // JPEG: FF D8 FF
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return "image/jpeg";
    }
    // PNG: 89 50 4E 47
    if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return "image/png";
    }

    "application/octet-stream"
}

pub fn is_pdf(bytes: &[u8]) -> bool {
    detect_mime_from_bytes(bytes) == MIME_PDF
}
