//! Part data decoding and HTML to plain text conversion

use crate::error::{ExtractError, Result};
use base64::Engine as _;
use base64::alphabet::URL_SAFE;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use regex::Regex;

// Gmail emits base64url both with and without trailing padding
const PART_DATA: GeneralPurpose = GeneralPurpose::new(
    &URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

static WHITESPACE_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Decode the base64url `data` field of a part body
pub fn decode_part_data(data: &str) -> Result<Vec<u8>> {
    PART_DATA
        .decode(data.trim())
        .map_err(|e| ExtractError::Decode(e.to_string()))
}

/// Convert HTML (or plain text treated as HTML) to whitespace-normalized text.
///
/// Tags, comments and `script`/`style` contents are removed, entities are
/// decoded, and the remaining text nodes are joined with single spaces.
pub fn html_to_text(html: &str) -> Result<String> {
    if html.is_empty() {
        return Err(ExtractError::InvalidInput(
            "HTML content is empty".to_string(),
        ));
    }

    // ASCII lowercasing keeps byte offsets aligned with `html`
    let lower = html.to_ascii_lowercase();
    let mut nodes: Vec<String> = Vec::new();
    // `pos` is the start of pending text, `scan` where the next '<' search begins
    let mut pos = 0;
    let mut scan = 0;

    while pos < html.len() {
        let Some(offset) = html[scan..].find('<') else {
            nodes.push(decode_entities(&html[pos..]));
            break;
        };
        let start = scan + offset;

        if !starts_markup(&html[start + 1..]) {
            scan = start + 1;
            continue;
        }

        if start > pos {
            nodes.push(decode_entities(&html[pos..start]));
        }

        let tail = &lower[start..];
        if tail.starts_with("<!--") {
            pos = find_after(&lower, start + 4, "-->");
            scan = pos;
            continue;
        }

        let tag_end = find_tag_end(html, start);
        pos = match raw_text_closer(tail) {
            Some(closer) => {
                let close_start = lower[tag_end..]
                    .find(closer)
                    .map_or(html.len(), |i| tag_end + i);
                find_after(html, close_start, ">")
            }
            None => tag_end,
        };
        scan = pos;
    }

    let joined = nodes.join(" ");
    Ok(WHITESPACE_REGEX
        .replace_all(&joined, " ")
        .trim()
        .to_string())
}

/// Whether the text after a '<' opens a tag, comment or declaration
fn starts_markup(rest: &str) -> bool {
    rest.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'))
}

/// Closing tag to skip to when `tail` opens a raw text element
fn raw_text_closer(tail: &str) -> Option<&'static str> {
    [("<script", "</script"), ("<style", "</style")]
        .into_iter()
        .find(|(open, _)| {
            tail.strip_prefix(open).is_some_and(|after| {
                after
                    .chars()
                    .next()
                    .is_none_or(|c| c == '>' || c == '/' || c.is_ascii_whitespace())
            })
        })
        .map(|(_, close)| close)
}

/// Byte index just past the `>` closing the tag opened at `start`.
///
/// A `>` inside a quoted attribute value does not close the tag. Quotes only
/// open a value when they follow `=`.
fn find_tag_end(html: &str, start: usize) -> usize {
    let mut quote: Option<u8> = None;
    let mut after_equals = false;

    for (i, &b) in html.as_bytes().iter().enumerate().skip(start + 1) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'>' => return i + 1,
                b'"' | b'\'' if after_equals => quote = Some(b),
                b'=' => after_equals = true,
                b if b.is_ascii_whitespace() => {}
                _ => after_equals = false,
            },
        }
        if quote.is_some() {
            after_equals = false;
        }
    }

    html.len()
}

/// Byte index just past the first `needle` at or after `from`, or the end of `haystack`
fn find_after(haystack: &str, from: usize, needle: &str) -> usize {
    haystack[from..]
        .find(needle)
        .map_or(haystack.len(), |i| from + i + needle.len())
}

fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
