/// Detect a content type from the payload bytes. Client-supplied headers are
/// never consulted. Unknown content falls back to application/octet-stream.
pub fn detect_content_type(bytes: &[u8]) -> String {
    infer::get(bytes)
        .map(|kind| kind.mime_type().to_string())
        .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG: &[u8] = &[
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01,
    ];
    const PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
    ];

    #[test]
    fn test_detects_known_magic_bytes() {
        assert_eq!(detect_content_type(JPEG), "image/jpeg");
        assert_eq!(detect_content_type(PNG), "image/png");
    }

    #[test]
    fn test_unknown_content_falls_back_to_octet_stream() {
        assert_eq!(
            detect_content_type(b"just some plain text"),
            "application/octet-stream"
        );
        assert_eq!(detect_content_type(&[]), "application/octet-stream");
    }

    #[test]
    fn test_detection_is_stable_for_a_fixed_payload() {
        assert_eq!(detect_content_type(JPEG), detect_content_type(JPEG));
    }
}
