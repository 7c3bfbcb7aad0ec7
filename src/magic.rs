//! Magic byte signature rules.
//!
//! The table is authored in descending signature length, but evaluation is a
//! plain scan in declaration order: the first rule that matches wins.

/// Mask symbol: the input byte at this position must equal the signature byte.
const MUST_MATCH: u8 = b'1';

/// One recognizable binary pattern at the start of a file.
pub enum Matcher {
    /// Every byte of the signature must equal the corresponding input byte.
    Exact {
        sig: &'static [u8],
        mime: &'static str,
    },
    /// Selective comparison: positions marked `b'1'` in the mask must match
    /// the signature, positions marked `b'0'` are skipped.
    Masked {
        sig: &'static [u8],
        mask: &'static [u8],
        mime: &'static str,
    },
}

impl Matcher {
    /// Check this rule against the leading bytes of `head`.
    ///
    /// Input shorter than the signature is a non-match, never a fault.
    pub fn matches(&self, head: &[u8]) -> Option<&'static str> {
        match *self {
            Matcher::Exact { sig, mime } => {
                if head.len() >= sig.len() && &head[..sig.len()] == sig {
                    Some(mime)
                } else {
                    None
                }
            }
            Matcher::Masked { sig, mask, mime } => {
                if head.len() < sig.len() {
                    return None;
                }
                for (i, &m) in mask.iter().enumerate() {
                    if m == MUST_MATCH && sig[i] != head[i] {
                        return None;
                    }
                }
                Some(mime)
            }
        }
    }
}

/// Curated signature table, scanned in declaration order.
///
/// The MP4 rules ignore the leading box-size field and match on the `ftyp`
/// box name plus brand.
pub const TYPES: &[Matcher] = &[
    // 12 bytes
    Matcher::Masked {
        sig: b"\x00\x00\x00\x00ftypMSNV",
        mask: b"000011111111",
        mime: "video/mp4",
    },
    Matcher::Masked {
        sig: b"\x00\x00\x00\x00ftypisom",
        mask: b"000011111111",
        mime: "video/mp4",
    },
    // 6 bytes
    Matcher::Exact {
        sig: b"\x37\x7A\xBC\xAF\x27\x1C",
        mime: "application/7z-compressed",
    },
    // 4 bytes
    Matcher::Exact {
        sig: b"fLaC",
        mime: "audio/flac",
    },
    Matcher::Exact {
        sig: b"OggS",
        mime: "application/ogg",
    },
    Matcher::Exact {
        sig: b"\x1A\x45\xDF\xA3",
        mime: "video/x-matroska",
    },
    // 3 bytes
    Matcher::Exact {
        sig: b"\x49\x44\x33",
        mime: "audio/mp3",
    },
    // 2 bytes
    Matcher::Exact {
        sig: b"\xFF\xFB",
        mime: "audio/mp3",
    },
];
