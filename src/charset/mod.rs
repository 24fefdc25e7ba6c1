//! Character encoding discovery and decoding.
//!
//! Encodings are sniffed from markers inside the content (a `charset="..."`
//! attribute or an HTML `<meta ... content="...charset=...">` tag), never
//! from HTTP headers.

use std::sync::LazyLock;

use encoding_rs::Encoding;
use regex::Regex;

static CHARSET_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"charset="(?P<charset>.*)""#).expect("valid charset regex"));

static META_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta .*?content=".*?charset=(?P<charset>.*)""#).expect("valid meta regex")
});

/// How the body of a text retrieval is turned into a `String`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// 7-bit ASCII; bytes outside the range become `?`.
    #[default]
    Ascii,
    /// Sniff the declared charset, falling back to ASCII.
    Detect,
    Explicit(&'static Encoding),
}

impl TextEncoding {
    /// Look up an encoding by label, e.g. `"utf-8"` or `"latin1"`.
    pub fn for_label(label: &str) -> Option<Self> {
        lookup(label).map(Self::Explicit)
    }

    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Ascii => decode_ascii(bytes),
            Self::Explicit(encoding) => decode_with(encoding, bytes),
            Self::Detect => {
                let provisional = decode_ascii(bytes);
                match resolve(&provisional) {
                    Some(encoding) => decode_with(encoding, bytes),
                    None => provisional,
                }
            }
        }
    }
}

/// Extract the encoding declared in `text`.
///
/// `text` is expected to be the body decoded provisionally as ASCII. The
/// `charset="..."` form is tried first, then the meta tag form. The captured
/// name is cut at its first space. Unknown names resolve to `None`.
///
/// Labels are looked up in the WHATWG registry, so `ISO-8859-1` and `latin1`
/// resolve to windows-1252, which differs from Latin-1 for bytes 0x80-0x9F.
pub fn resolve(text: &str) -> Option<&'static Encoding> {
    let captures = CHARSET_ATTR
        .captures(text)
        .or_else(|| META_CONTENT.captures(text))?;

    let mut name = &captures["charset"];
    if let Some(space) = name.find(' ') {
        name = &name[..space];
    }

    let encoding = lookup(name);
    match encoding {
        Some(encoding) => tracing::debug!("Resolved charset {} as {}", name, encoding.name()),
        None => tracing::debug!("Unrecognized charset {}", name),
    }
    encoding
}

fn lookup(name: &str) -> Option<&'static Encoding> {
    Encoding::for_label(name.as_bytes())
}

pub fn decode_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect()
}

/// Decode with exactly `encoding`; a byte order mark is decoded as content.
fn decode_with(encoding: &'static Encoding, bytes: &[u8]) -> String {
    let (text, _) = encoding.decode_without_bom_handling(bytes);
    text.into_owned()
}
