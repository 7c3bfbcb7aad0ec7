//! Extension-based MIME lookup.
//!
//! Used as a last resort by callers that still have a file name when the
//! header bytes match nothing.

use std::path::Path;

/// Look up a MIME type from a file's extension. Returns `None` when the
/// extension is missing or unknown.
pub fn from_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension().and_then(|e| e.to_str())?.to_ascii_lowercase();
    from_ext(&ext)
}

/// Look up a MIME type from an extension without the dot (`"png"`, `"mkv"`).
pub fn from_ext(ext: &str) -> Option<&'static str> {
    let mime = match ext {
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",

        // Audio
        "mp3" => "audio/mp3",
        "flac" => "audio/flac",
        "wav" => "audio/wave",
        "ogg" | "oga" | "ogx" => "application/ogg",
        "opus" => "audio/opus",
        "m4a" => "audio/mp4",
        "mid" | "midi" => "audio/midi",

        // Video
        "mp4" => "video/mp4",
        "mkv" | "webm" => "video/x-matroska",
        "avi" => "video/avi",
        "mov" => "video/quicktime",

        // Documents
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "xml" => "text/xml",
        "csv" => "text/csv",

        // Archives
        "7z" => "application/7z-compressed",
        "zip" => "application/zip",
        "gz" => "application/x-gzip",
        "rar" => "application/x-rar-compressed",

        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn looks_up_by_path() {
        assert_eq!(from_path(&PathBuf::from("photo.JPG")), Some("image/jpeg"));
        assert_eq!(from_path(&PathBuf::from("notes.txt")), Some("text/plain"));
    }

    #[test]
    fn labels_match_the_signature_tables() {
        assert_eq!(from_ext("flac"), Some("audio/flac"));
        assert_eq!(from_ext("mkv"), Some("video/x-matroska"));
        assert_eq!(from_ext("7z"), Some("application/7z-compressed"));
    }

    #[test]
    fn unknown_extension_is_none() {
        assert_eq!(from_ext("xyz"), None);
        assert_eq!(from_path(&PathBuf::from("noext")), None);
    }
}
