//! RFC 2047 encoded-word header codec
//!
//! <https://tools.ietf.org/html/rfc2047>
//!
//! [`encode_header`] turns a unicode header value into an ASCII-safe string
//! by classifying whitespace-separated words as ASCII or non-ASCII and
//! wrapping each merged non-ASCII run in a single encoded-word.
//! [`decode_header`] is its left inverse and never fails: whatever cannot be
//! decoded comes back as U+FFFD.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::{
    charset::{CharsetPolicy, CharsetRegistry, HeaderEncoding},
    error::Error,
};

/// Encode a unicode header value into an RFC 2047-safe ASCII string
///
/// The value is split on ASCII whitespace, so runs of blanks collapse into a
/// single separator; this lossy collapse is part of the encode contract.
/// ASCII-only input is returned unchanged, spacing included. Consecutive
/// words needing the same treatment are merged into one run: ASCII runs are
/// emitted literally, non-ASCII runs become one encoded-word in `charset`
/// using the subtype its registered policy selects.
///
/// Fails with [`Error::UnknownCharset`] when `charset` is not registered and
/// with [`Error::Unrepresentable`] when a word has no representation in it.
pub fn encode_header(
    registry: &CharsetRegistry,
    value: &str,
    charset: &str,
) -> Result<String, Error> {
    let policy = registry
        .policy(charset)
        .ok_or_else(|| Error::UnknownCharset(charset.to_owned()))?;

    if value.is_ascii() {
        return Ok(value.to_owned());
    }

    let mut runs = RunAccumulator::new(charset, policy);
    for word in value.split_ascii_whitespace() {
        let kind = if word.is_ascii() {
            WordKind::Ascii
        } else {
            WordKind::Encoded
        };
        runs.append(word, kind)?;
    }
    runs.finalize()
}

/// Decode RFC 2047 encoded-words embedded in a header value
///
/// Plain text is passed through verbatim, encoded-words are decoded using
/// their declared charset, and linear whitespace between two adjacent
/// encoded-words is dropped. Decoding never fails: malformed payloads
/// become U+FFFD, unknown charset labels fall back to lossy UTF-8, and text
/// that merely looks like an encoded-word passes through untouched.
pub fn decode_header(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    let mut prev_was_encoded = false;

    while let Some(start) = rest.find("=?") {
        match parse_encoded_word(&rest[start..]) {
            Some((decoded, consumed)) => {
                let text = &rest[..start];
                // separating whitespace between two encoded-words is not
                // part of the payload (RFC 2047 section 6.2)
                if !(prev_was_encoded && text.bytes().all(|b| b == b' ' || b == b'\t')) {
                    out.push_str(text);
                }
                out.push_str(&decoded);
                rest = &rest[start + consumed..];
                prev_was_encoded = true;
            }
            None => {
                out.push_str(&rest[..start + 2]);
                rest = &rest[start + 2..];
                prev_was_encoded = false;
            }
        }
    }
    out.push_str(rest);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordKind {
    Ascii,
    Encoded,
}

/// Append/flush accumulator for the run-merge walk
///
/// Each appended word either extends the current run (same kind) or flushes
/// it and opens a new one; finalizing flushes whatever is left. Keeping this
/// as its own struct keeps the merge semantics testable in isolation.
struct RunAccumulator<'a> {
    charset: &'a str,
    policy: &'a CharsetPolicy,
    out: String,
    run: String,
    kind: Option<WordKind>,
}

impl<'a> RunAccumulator<'a> {
    fn new(charset: &'a str, policy: &'a CharsetPolicy) -> Self {
        Self {
            charset,
            policy,
            out: String::new(),
            run: String::new(),
            kind: None,
        }
    }

    fn append(&mut self, word: &str, kind: WordKind) -> Result<(), Error> {
        if self.kind == Some(kind) {
            self.run.push(' ');
        } else {
            self.flush()?;
            self.kind = Some(kind);
        }
        self.run.push_str(word);
        Ok(())
    }

    fn finalize(mut self) -> Result<String, Error> {
        self.flush()?;
        Ok(self.out)
    }

    fn flush(&mut self) -> Result<(), Error> {
        let kind = match self.kind.take() {
            Some(kind) => kind,
            None => return Ok(()),
        };

        if !self.out.is_empty() {
            self.out.push(' ');
        }
        match kind {
            WordKind::Ascii => self.out.push_str(&self.run),
            WordKind::Encoded => {
                let bytes = self
                    .policy
                    .encode_text(&self.run)
                    .ok_or_else(|| Error::Unrepresentable {
                        charset: self.charset.to_owned(),
                    })?;
                let (subtype, payload) = match self.policy.header_encoding() {
                    HeaderEncoding::Base64 => ('b', BASE64.encode(&bytes)),
                    HeaderEncoding::QuotedPrintable => ('q', encode_q(&bytes)),
                };
                self.out.push_str("=?");
                self.out.push_str(self.charset);
                self.out.push('?');
                self.out.push(subtype);
                self.out.push('?');
                self.out.push_str(&payload);
                self.out.push_str("?=");
            }
        }
        self.run.clear();
        Ok(())
    }
}

/// Parse one encoded-word at the start of `s` (which begins with `=?`)
///
/// Returns the decoded text and the number of bytes consumed, or `None`
/// when `s` does not continue as `charset?enc?payload?=`.
fn parse_encoded_word(s: &str) -> Option<(String, usize)> {
    let inner = &s[2..];
    let charset_end = inner.find('?')?;
    let charset = &inner[..charset_end];
    if charset.is_empty() || !charset.is_ascii() || charset.contains(' ') {
        return None;
    }

    let after_charset = &inner[charset_end + 1..];
    let enc_end = after_charset.find('?')?;
    let subtype = &after_charset[..enc_end];

    let after_enc = &after_charset[enc_end + 1..];
    let payload_end = after_enc.find("?=")?;
    let payload = &after_enc[..payload_end];
    if payload.contains(' ') {
        return None;
    }

    let bytes = match subtype {
        "b" | "B" => BASE64.decode(payload).ok(),
        "q" | "Q" => decode_q(payload),
        _ => return None,
    };
    let decoded = match bytes {
        Some(bytes) => decode_with_charset(charset, &bytes),
        None => char::REPLACEMENT_CHARACTER.to_string(),
    };

    let consumed = 2 + charset_end + 1 + enc_end + 1 + payload_end + 2;
    Some((decoded, consumed))
}

fn decode_with_charset(label: &str, bytes: &[u8]) -> String {
    // an optional RFC 2231 language tag may trail the charset name
    let label = label.split('*').next().unwrap_or(label);
    match encoding_rs::Encoding::for_label(label.as_bytes()) {
        Some(encoding) => encoding.decode(bytes).0.into_owned(),
        None => String::from_utf8_lossy(bytes).into_owned(),
    }
}

// RFC 2047 section 4.2, with the conservative phrase-safe character set
fn encode_q(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b' ' => out.push('_'),
            b'!' | b'*' | b'+' | b'-' | b'/' => out.push(b as char),
            _ if b.is_ascii_alphanumeric() => out.push(b as char),
            _ => {
                out.push('=');
                out.push_str(&format!("{b:02X}"));
            }
        }
    }
    out
}

fn decode_q(payload: &str) -> Option<Vec<u8>> {
    let unspaced: Vec<u8> = payload
        .bytes()
        .map(|b| if b == b'_' { b' ' } else { b })
        .collect();
    quoted_printable::decode(unspaced, quoted_printable::ParseMode::Robust).ok()
}
