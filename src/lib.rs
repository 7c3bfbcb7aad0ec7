//! Content-type detection from the leading bytes of a file.
//!
//! [`detect`] runs a curated magic byte table first, then browser-style
//! content sniffing, then a UTF-8 text check, and finally degrades to
//! `application/octet-stream`. Pure and infallible: no I/O, no state, safe
//! to call from any thread.

use std::path::Path;

use tracing::trace;

pub mod extension;
pub mod magic;
pub mod sniff;

pub use sniff::detect_content_type;

/// The label returned when nothing recognizes the input.
pub const OCTET_STREAM: &str = "application/octet-stream";

const TEXT_UTF8: &str = "text/plain; charset=utf-8";

/// Detect the MIME type of a file by its first bytes.
///
/// The buffer may be empty or arbitrarily short; undersized input falls
/// through each stage rather than faulting, and the result is always a
/// non-empty label.
pub fn detect(head: &[u8]) -> &'static str {
    // Curated magic byte rules, in declaration order; first match wins.
    for rule in magic::TYPES {
        if let Some(mime) = rule.matches(head) {
            trace!("magic byte signature matched: {}", mime);
            return mime;
        }
    }

    // Browser-style sniffing table.
    let mime = sniff::detect_content_type(head);
    if mime != OCTET_STREAM {
        trace!("content sniffer matched: {}", mime);
        return mime;
    }

    // Unrecognized but well-formed UTF-8 is still text.
    if !head.is_empty() && std::str::from_utf8(head).is_ok() {
        return TEXT_UTF8;
    }

    OCTET_STREAM
}

/// Like [`detect`], but falls back to the file extension of `name` when the
/// content itself is unrecognized.
pub fn detect_with_name(head: &[u8], name: &str) -> &'static str {
    let mime = detect(head);
    if mime == OCTET_STREAM {
        if let Some(by_ext) = extension::from_path(Path::new(name)) {
            trace!("extension fallback matched: {}", by_ext);
            return by_ext;
        }
    }
    mime
}

/// Whether a MIME type is for an image.
pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// Whether a MIME type is for audio.
pub fn is_audio(mime: &str) -> bool {
    mime.starts_with("audio/")
}

/// Whether a MIME type is for video.
pub fn is_video(mime: &str) -> bool {
    mime.starts_with("video/")
}

/// Whether a MIME type is textual.
pub fn is_text(mime: &str) -> bool {
    mime.starts_with("text/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_flac() {
        assert_eq!(detect(b"fLaC"), "audio/flac");
    }

    #[test]
    fn detects_ogg() {
        assert_eq!(detect(b"OggS"), "application/ogg");
    }

    #[test]
    fn detects_mp3() {
        assert_eq!(detect(b"\x49\x44\x33\x03\x00"), "audio/mp3");
        assert_eq!(detect(b"\xFF\xFB\x90\x00"), "audio/mp3");
    }

    #[test]
    fn detects_masked_mp4() {
        assert_eq!(
            detect(b"\x00\x00\x00\x00ftypMSNV\x00\x00"),
            "video/mp4"
        );
    }

    #[test]
    fn matroska_wins_over_sniffer_webm() {
        // The magic table labels 1A 45 DF A3 before the sniffer gets a say.
        assert_eq!(detect(b"\x1A\x45\xDF\xA3\x01"), "video/x-matroska");
    }

    #[test]
    fn sniffer_catches_formats_outside_the_magic_table() {
        assert_eq!(detect(b"%PDF-1.7"), "application/pdf");
        assert_eq!(detect(b"\x89PNG\x0D\x0A\x1A\x0A"), "image/png");
        assert_eq!(detect(b"PK\x03\x04"), "application/zip");
    }

    #[test]
    fn plain_text_falls_through_to_text_utf8() {
        assert_eq!(detect(b"Hello"), "text/plain; charset=utf-8");
    }

    #[test]
    fn utf8_with_control_bytes_is_still_text() {
        // 0x0B is a binary byte to the sniffer but valid UTF-8.
        assert_eq!(detect(b"\x0Bhello"), "text/plain; charset=utf-8");
    }

    #[test]
    fn invalid_utf8_degrades_to_octet_stream() {
        assert_eq!(detect(b"\xFF\xFF\xFF\xFF"), OCTET_STREAM);
    }

    #[test]
    fn empty_buffer_is_octet_stream() {
        assert_eq!(detect(b""), OCTET_STREAM);
    }

    #[test]
    fn short_buffers_never_fault() {
        let head = b"\x00\x00\x00\x00ftypMSNV\x00\x00";
        for len in 0..head.len() {
            let _ = detect(&head[..len]);
        }
    }

    #[test]
    fn deterministic() {
        let head = b"\x37\x7A\xBC\xAF\x27\x1C\x00\x04";
        assert_eq!(detect(head), detect(head));
        assert_eq!(detect(head), "application/7z-compressed");
    }

    #[test]
    fn extension_fallback_only_when_unrecognized() {
        assert_eq!(detect_with_name(b"\x8F\x8F\x8F", "clip.mkv"), "video/x-matroska");
        // Content wins over the name.
        assert_eq!(detect_with_name(b"fLaC", "clip.mkv"), "audio/flac");
        assert_eq!(detect_with_name(b"\x8F\x8F\x8F", "blob.bin"), OCTET_STREAM);
    }

    #[test]
    fn category_helpers() {
        assert!(is_audio(detect(b"fLaC")));
        assert!(is_video(detect(b"\x1A\x45\xDF\xA3")));
        assert!(is_text(detect(b"Hello")));
        assert!(is_image("image/png"));
    }
}
