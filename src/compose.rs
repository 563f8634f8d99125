//! High-level message assembly
//!
//! The [`Composer`] owns the charset registry and assembles complete
//! messages out of unicode inputs: every header value goes through the
//! RFC 2047 codec, every body through the charset's quoted-printable
//! pipeline, and the content headers are set explicitly instead of letting
//! a MIME layer guess them.

use crate::{
    charset::CharsetRegistry,
    error::Error,
    message::{
        body::encode_text_body,
        header::{HeaderName, Headers},
        Message, MessageBody, MultiPart, SinglePart,
    },
    rfc2047::encode_header,
};

const FROM: HeaderName = HeaderName::new_from_ascii_static("From");
const TO: HeaderName = HeaderName::new_from_ascii_static("To");
const SUBJECT: HeaderName = HeaderName::new_from_ascii_static("Subject");
const MIME_VERSION: HeaderName = HeaderName::new_from_ascii_static("MIME-Version");
const CONTENT_TYPE: HeaderName = HeaderName::new_from_ascii_static("Content-Type");
const CONTENT_TRANSFER_ENCODING: HeaderName =
    HeaderName::new_from_ascii_static("Content-Transfer-Encoding");
const CONTENT_DISPOSITION: HeaderName = HeaderName::new_from_ascii_static("Content-Disposition");

/// Collaborator turning plain structured text into an HTML rendition
///
/// The contract is narrow: given plain text, return an HTML string carrying
/// the same body text otherwise unmodified. Any `Fn(&str) -> String`
/// qualifies.
pub trait HtmlConverter {
    /// Convert `text` to HTML
    fn to_html(&self, text: &str) -> String;
}

impl<F> HtmlConverter for F
where
    F: Fn(&str) -> String,
{
    fn to_html(&self, text: &str) -> String {
        self(text)
    }
}

/// Assembles encoded messages against one charset registry
///
/// By default an explicit `From` entry in the extra headers is ignored so a
/// caller-supplied header map cannot masquerade as another sender;
/// [`allow_from_override`][Composer::allow_from_override] opts into
/// honoring it instead.
#[derive(Debug, Clone)]
pub struct Composer {
    registry: CharsetRegistry,
    allow_from_override: bool,
}

impl Composer {
    /// Create a composer over the stock charset registry
    pub fn new() -> Self {
        Self::with_registry(CharsetRegistry::with_defaults())
    }

    /// Create a composer over a caller-supplied registry
    pub fn with_registry(registry: CharsetRegistry) -> Self {
        Self {
            registry,
            allow_from_override: false,
        }
    }

    /// Let an explicit `From` in the extra headers replace `from_addr`
    pub fn allow_from_override(mut self, allow: bool) -> Self {
        self.allow_from_override = allow;
        self
    }

    /// Get the charset registry the composer encodes with
    pub fn registry(&self) -> &CharsetRegistry {
        &self.registry
    }

    /// Assemble a single-part `text/plain` message
    ///
    /// All inputs are unicode; `From`, `To`, `Subject` and every entry of
    /// `other_headers` pass through the RFC 2047 codec with `encoding`, the
    /// body is quoted-printable encoded in `encoding`'s bytes, and
    /// `Content-Type` / `Content-Transfer-Encoding` are set explicitly.
    ///
    /// # Panics
    ///
    /// Panics when a key in `other_headers` is not a valid header name.
    pub fn construct_simple_encoded_message(
        &self,
        from_addr: &str,
        to_addr: &str,
        subject: &str,
        body: &str,
        other_headers: &[(&str, &str)],
        encoding: &str,
    ) -> Result<Message, Error> {
        let mut headers = self.address_headers(from_addr, to_addr, subject, other_headers, encoding)?;
        headers.set_raw(MIME_VERSION, "1.0".into());
        headers.set_raw(
            CONTENT_TYPE,
            format!("text/plain; charset=\"{encoding}\""),
        );
        headers.set_raw(CONTENT_TRANSFER_ENCODING, "quoted-printable".into());

        let body = encode_text_body(&self.registry, body, encoding)?;

        tracing::debug!("assembled text/plain message in charset {}", encoding);
        Ok(Message::new(headers, MessageBody::Raw(body)))
    }

    /// Assemble a two-part multipart/alternative message
    ///
    /// Top-level headers are built exactly as in
    /// [`construct_simple_encoded_message`][Self::construct_simple_encoded_message];
    /// `body` and `html_body` become inline `text/plain` and `text/html`
    /// parts, in that order, each quoted-printable encoded in `encoding`.
    ///
    /// # Panics
    ///
    /// Panics when a key in `other_headers` is not a valid header name.
    pub fn construct_multipart(
        &self,
        from_addr: &str,
        to_addr: &str,
        subject: &str,
        body: &str,
        html_body: &str,
        other_headers: &[(&str, &str)],
        encoding: &str,
    ) -> Result<Message, Error> {
        let mut headers = self.address_headers(from_addr, to_addr, subject, other_headers, encoding)?;
        headers.set_raw(MIME_VERSION, "1.0".into());

        let plain = self.inline_text_part(body, "plain", encoding)?;
        let html = self.inline_text_part(html_body, "html", encoding)?;

        tracing::debug!("assembled multipart/alternative message in charset {}", encoding);
        Ok(Message::new(
            headers,
            MessageBody::Alternative(MultiPart::alternative(plain, html)),
        ))
    }

    /// Assemble a multipart/alternative message from structured text
    ///
    /// Delegates `body` to `converter` to obtain the HTML alternative, then
    /// assembles via [`construct_multipart`][Self::construct_multipart].
    pub fn construct_multipart_from_stx<C: HtmlConverter>(
        &self,
        from_addr: &str,
        to_addr: &str,
        subject: &str,
        body: &str,
        other_headers: &[(&str, &str)],
        encoding: &str,
        converter: &C,
    ) -> Result<Message, Error> {
        let html_body = converter.to_html(body);
        self.construct_multipart(
            from_addr,
            to_addr,
            subject,
            body,
            &html_body,
            other_headers,
            encoding,
        )
    }

    fn address_headers(
        &self,
        from_addr: &str,
        to_addr: &str,
        subject: &str,
        other_headers: &[(&str, &str)],
        encoding: &str,
    ) -> Result<Headers, Error> {
        let from_overridden = self.allow_from_override
            && other_headers
                .iter()
                .any(|(key, _)| key.eq_ignore_ascii_case("From"));

        let mut headers = Headers::new();
        if !from_overridden {
            headers.set_raw(FROM, encode_header(&self.registry, from_addr, encoding)?);
        }
        headers.set_raw(TO, encode_header(&self.registry, to_addr, encoding)?);
        headers.set_raw(SUBJECT, encode_header(&self.registry, subject, encoding)?);

        for (key, value) in other_headers {
            if !self.allow_from_override && key.eq_ignore_ascii_case("From") {
                // a From smuggled through the extra headers would let the
                // message masquerade as another sender
                continue;
            }
            headers.set_raw(
                HeaderName::new_from_ascii((*key).to_owned()),
                encode_header(&self.registry, value, encoding)?,
            );
        }

        Ok(headers)
    }

    fn inline_text_part(
        &self,
        body: &str,
        subtype: &str,
        encoding: &str,
    ) -> Result<SinglePart, Error> {
        let mut headers = Headers::new();
        headers.set_raw(
            CONTENT_TYPE,
            format!("text/{subtype}; charset=\"{encoding}\""),
        );
        headers.set_raw(CONTENT_TRANSFER_ENCODING, "quoted-printable".into());
        headers.set_raw(CONTENT_DISPOSITION, "inline".into());

        let body = encode_text_body(&self.registry, body, encoding)?;
        Ok(SinglePart::new(headers, body))
    }
}

impl Default for Composer {
    fn default() -> Self {
        Composer::new()
    }
}
