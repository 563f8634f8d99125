//! Quoted-printable body encoding

use std::mem;

use crate::{
    charset::{BodyEncoding, CharsetRegistry},
    error::Error,
};

/// Encode a unicode body into its on-wire byte representation
///
/// Line endings are normalized to CRLF, the text is converted to the bytes
/// of `charset`, and the result is transfer-encoded per the charset policy
/// (quoted-printable: `=XX` escapes, soft breaks at the 76-column limit).
pub(crate) fn encode_text_body(
    registry: &CharsetRegistry,
    text: &str,
    charset: &str,
) -> Result<Vec<u8>, Error> {
    let policy = registry
        .policy(charset)
        .ok_or_else(|| Error::UnknownCharset(charset.to_owned()))?;

    let mut text = text.to_owned();
    in_place_crlf_line_endings(&mut text);

    let bytes = policy
        .encode_text(&text)
        .ok_or_else(|| Error::Unrepresentable {
            charset: charset.to_owned(),
        })?;

    Ok(match policy.body_encoding() {
        BodyEncoding::QuotedPrintable => quoted_printable::encode(&bytes),
    })
}

/// In place conversion to CRLF line endings
fn in_place_crlf_line_endings(string: &mut String) {
    let indices = find_all_lf_char_indices(string);

    for i in indices {
        // this relies on `indices` being in reverse order
        string.insert(i, '\r');
    }
}

/// Find indices to all places where `\r` should be inserted
/// in order to make `s` have CRLF line endings
///
/// The list is reversed, which is more efficient.
fn find_all_lf_char_indices(s: &str) -> Vec<usize> {
    let mut indices = Vec::new();

    let mut found_lf = false;
    for (i, c) in s.char_indices().rev() {
        if mem::take(&mut found_lf) && c != '\r' {
            // the previous character was `\n`, but this isn't a `\r`
            indices.push(i + c.len_utf8());
        }

        found_lf = c == '\n';
    }

    if found_lf {
        // the first character is `\n`
        indices.push(0);
    }

    indices
}
