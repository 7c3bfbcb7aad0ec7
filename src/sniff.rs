//! Browser-style content sniffing.
//!
//! A port of the WHATWG mimesniff signature table, used as a fallback when
//! no curated magic byte rule matches. At most the first 512 bytes are
//! inspected, and the plain-text heuristic additionally requires well-formed
//! UTF-8 so that arbitrary high-byte garbage stays `application/octet-stream`.

/// How many leading bytes the sniffer considers.
const SNIFF_LEN: usize = 512;

const OCTET_STREAM: &str = "application/octet-stream";
const TEXT_HTML: &str = "text/html; charset=utf-8";
const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

enum Sig {
    /// Signature bytes must equal the input prefix.
    Exact {
        sig: &'static [u8],
        mime: &'static str,
    },
    /// Bitwise comparison: `input[i] & mask[i] == pat[i]` for every position.
    Masked {
        pat: &'static [u8],
        mask: &'static [u8],
        skip_ws: bool,
        mime: &'static str,
    },
    /// Case-insensitive HTML tag, after leading whitespace. The byte after
    /// the tag must be a space or `>`.
    Html(&'static [u8]),
    /// MP4 `ftyp` box walk.
    Mp4,
    /// Plain-text heuristic; must stay last in the table.
    Text,
}

impl Sig {
    fn matches(&self, data: &[u8], first_non_ws: usize) -> Option<&'static str> {
        match *self {
            Sig::Exact { sig, mime } => {
                if data.len() >= sig.len() && &data[..sig.len()] == sig {
                    Some(mime)
                } else {
                    None
                }
            }
            Sig::Masked {
                pat,
                mask,
                skip_ws,
                mime,
            } => {
                let data = if skip_ws { &data[first_non_ws..] } else { data };
                if data.len() < pat.len() {
                    return None;
                }
                for (i, &m) in mask.iter().enumerate() {
                    if data[i] & m != pat[i] {
                        return None;
                    }
                }
                Some(mime)
            }
            Sig::Html(tag) => match_html(tag, &data[first_non_ws..]),
            Sig::Mp4 => match_mp4(data),
            Sig::Text => match_text(&data[first_non_ws..]),
        }
    }
}

fn match_html(tag: &[u8], data: &[u8]) -> Option<&'static str> {
    if data.len() < tag.len() + 1 {
        return None;
    }
    for (i, &b) in tag.iter().enumerate() {
        let mut db = data[i];
        if b.is_ascii_uppercase() {
            db &= 0xDF;
        }
        if b != db {
            return None;
        }
    }
    // The tag must be terminated before any attribute or text.
    let next = data[tag.len()];
    if next != b' ' && next != b'>' {
        return None;
    }
    Some(TEXT_HTML)
}

fn match_mp4(data: &[u8]) -> Option<&'static str> {
    if data.len() < 12 {
        return None;
    }
    let box_size = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
    if data.len() < box_size || box_size % 4 != 0 {
        return None;
    }
    if &data[4..8] != b"ftyp" {
        return None;
    }
    let mut st = 8;
    while st < box_size {
        // Offset 12 holds the minor version of the major brand, not a brand.
        if st != 12 && &data[st..st + 3] == b"mp4" {
            return Some("video/mp4");
        }
        st += 4;
    }
    None
}

fn match_text(data: &[u8]) -> Option<&'static str> {
    if data.is_empty() {
        return None;
    }
    for &b in data {
        let binary = b <= 0x08
            || b == 0x0B
            || (0x0E..=0x1A).contains(&b)
            || (0x1C..=0x1F).contains(&b);
        if binary {
            return None;
        }
    }
    if std::str::from_utf8(data).is_err() {
        return None;
    }
    Some(TEXT_PLAIN)
}

/// The sniffing table, scanned in order; first match wins.
const SIGNATURES: &[Sig] = &[
    Sig::Html(b"<!DOCTYPE HTML"),
    Sig::Html(b"<HTML"),
    Sig::Html(b"<HEAD"),
    Sig::Html(b"<SCRIPT"),
    Sig::Html(b"<IFRAME"),
    Sig::Html(b"<H1"),
    Sig::Html(b"<DIV"),
    Sig::Html(b"<FONT"),
    Sig::Html(b"<TABLE"),
    Sig::Html(b"<A"),
    Sig::Html(b"<STYLE"),
    Sig::Html(b"<TITLE"),
    Sig::Html(b"<B"),
    Sig::Html(b"<BODY"),
    Sig::Html(b"<BR"),
    Sig::Html(b"<P"),
    Sig::Html(b"<!--"),
    Sig::Masked {
        pat: b"<?xml",
        mask: b"\xFF\xFF\xFF\xFF\xFF",
        skip_ws: true,
        mime: "text/xml; charset=utf-8",
    },
    Sig::Exact {
        sig: b"%PDF-",
        mime: "application/pdf",
    },
    Sig::Exact {
        sig: b"%!PS-Adobe-",
        mime: "application/postscript",
    },
    // UTF byte order marks.
    Sig::Masked {
        pat: b"\xFE\xFF\x00\x00",
        mask: b"\xFF\xFF\x00\x00",
        skip_ws: false,
        mime: "text/plain; charset=utf-16be",
    },
    Sig::Masked {
        pat: b"\xFF\xFE\x00\x00",
        mask: b"\xFF\xFF\x00\x00",
        skip_ws: false,
        mime: "text/plain; charset=utf-16le",
    },
    Sig::Masked {
        pat: b"\xEF\xBB\xBF\x00",
        mask: b"\xFF\xFF\xFF\x00",
        skip_ws: false,
        mime: TEXT_PLAIN,
    },
    // Images.
    Sig::Exact {
        sig: b"\x00\x00\x01\x00",
        mime: "image/x-icon",
    },
    Sig::Exact {
        sig: b"\x00\x00\x02\x00",
        mime: "image/x-icon",
    },
    Sig::Exact {
        sig: b"BM",
        mime: "image/bmp",
    },
    Sig::Exact {
        sig: b"GIF87a",
        mime: "image/gif",
    },
    Sig::Exact {
        sig: b"GIF89a",
        mime: "image/gif",
    },
    Sig::Masked {
        pat: b"RIFF\x00\x00\x00\x00WEBPVP",
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF\xFF\xFF",
        skip_ws: false,
        mime: "image/webp",
    },
    Sig::Exact {
        sig: b"\x89PNG\x0D\x0A\x1A\x0A",
        mime: "image/png",
    },
    Sig::Exact {
        sig: b"\xFF\xD8\xFF",
        mime: "image/jpeg",
    },
    // Audio and video containers.
    Sig::Exact {
        sig: b".snd",
        mime: "audio/basic",
    },
    Sig::Masked {
        pat: b"FORM\x00\x00\x00\x00AIFF",
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        skip_ws: false,
        mime: "audio/aiff",
    },
    Sig::Exact {
        sig: b"ID3",
        mime: "audio/mpeg",
    },
    Sig::Exact {
        sig: b"OggS\x00",
        mime: "application/ogg",
    },
    Sig::Exact {
        sig: b"MThd\x00\x00\x00\x06",
        mime: "audio/midi",
    },
    Sig::Masked {
        pat: b"RIFF\x00\x00\x00\x00AVI ",
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        skip_ws: false,
        mime: "video/avi",
    },
    Sig::Masked {
        pat: b"RIFF\x00\x00\x00\x00WAVE",
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        skip_ws: false,
        mime: "audio/wave",
    },
    Sig::Mp4,
    Sig::Exact {
        sig: b"\x1A\x45\xDF\xA3",
        mime: "video/webm",
    },
    // Fonts.
    Sig::Masked {
        pat: b"\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
               \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
               \x00\x00LP",
        mask: b"\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
                \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
                \x00\x00\xFF\xFF",
        skip_ws: false,
        mime: "application/vnd.ms-fontobject",
    },
    Sig::Exact {
        sig: b"\x00\x01\x00\x00",
        mime: "font/ttf",
    },
    Sig::Exact {
        sig: b"OTTO",
        mime: "font/otf",
    },
    Sig::Exact {
        sig: b"ttcf",
        mime: "font/collection",
    },
    Sig::Exact {
        sig: b"wOFF",
        mime: "font/woff",
    },
    Sig::Exact {
        sig: b"wOF2",
        mime: "font/woff2",
    },
    // Archives.
    Sig::Exact {
        sig: b"\x1F\x8B\x08",
        mime: "application/x-gzip",
    },
    Sig::Exact {
        sig: b"PK\x03\x04",
        mime: "application/zip",
    },
    Sig::Exact {
        sig: b"Rar!\x1A\x07\x00",
        mime: "application/x-rar-compressed",
    },
    Sig::Exact {
        sig: b"Rar!\x1A\x07\x01\x00",
        mime: "application/x-rar-compressed",
    },
    Sig::Exact {
        sig: b"\x00\x61\x73\x6D",
        mime: "application/wasm",
    },
    Sig::Text,
];

fn is_ws(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | b'\x0C' | b'\r' | b' ')
}

/// Sniff a best-guess MIME type from the leading bytes of `head`.
///
/// Returns `application/octet-stream` when nothing is recognized; never
/// fails.
pub fn detect_content_type(head: &[u8]) -> &'static str {
    let data = &head[..head.len().min(SNIFF_LEN)];
    let first_non_ws = data.iter().take_while(|&&b| is_ws(b)).count();
    SIGNATURES
        .iter()
        .find_map(|sig| sig.matches(data, first_non_ws))
        .unwrap_or(OCTET_STREAM)
}
