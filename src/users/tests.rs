//! Tests for users module
//!
//! These tests verify upload helper behavior:
//! - Filename sanitization against path traversal
//! - Content sniffing for supported image formats

#[cfg(test)]
mod tests {
    use super::super::uploads::{content_type_from_extension, image_extension, sanitize_filename};

    #[test]
    fn test_sanitize_filename_strips_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_filename("a/b\\c"), "abc");
        assert_eq!(
            sanitize_filename("profile_U_123_ABCD.png"),
            "profile_U_123_ABCD.png"
        );
    }

    #[test]
    fn test_sanitize_filename_never_returns_empty() {
        assert_eq!(sanitize_filename("///"), "sanitized_file");
        assert_eq!(sanitize_filename(""), "sanitized_file");
    }

    #[test]
    fn test_image_extension_sniffs_magic_bytes() {
        // PNG signature
        let png = [0x89u8, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        assert_eq!(image_extension(&png), Some("png"));

        // GIF signature
        let gif = b"GIF89a\x00\x00\x00\x00";
        assert_eq!(image_extension(gif), Some("gif"));

        // Not an image
        let text = b"hello world, definitely not an image";
        assert_eq!(image_extension(text), None);
    }

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(content_type_from_extension("a.png"), "image/png");
        assert_eq!(content_type_from_extension("a.gif"), "image/gif");
        assert_eq!(content_type_from_extension("a.webp"), "image/webp");
        assert_eq!(content_type_from_extension("a.jpg"), "image/jpeg");
        assert_eq!(content_type_from_extension("weird"), "image/jpeg");
    }
}
