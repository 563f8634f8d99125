//! MIME part containers for multipart/alternative messages

use std::io::Write;

use mime::Mime;

use crate::message::{
    header::{HeaderName, Headers},
    EmailFormat,
};

/// A leaf part holding already-encoded body bytes
#[derive(Debug, Clone)]
pub struct SinglePart {
    headers: Headers,
    body: Vec<u8>,
}

impl SinglePart {
    pub(crate) fn new(headers: Headers, body: Vec<u8>) -> Self {
        Self { headers, body }
    }

    /// Get the headers of the part
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Get the encoded body bytes
    pub fn raw_body(&self) -> &[u8] {
        &self.body
    }

    /// Get the part content formatted for sending
    pub fn formatted(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.format(&mut out);
        out
    }
}

impl EmailFormat for SinglePart {
    fn format(&self, out: &mut Vec<u8>) {
        write!(out, "{}", self.headers)
            .expect("A Write implementation panicked while formatting headers");
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(&self.body);
        out.extend_from_slice(b"\r\n");
    }
}

/// A multipart/alternative container
///
/// Always holds exactly two parts, lowest rendering fidelity first: the
/// plain-text alternative, then the HTML alternative. Consumers pick the
/// last part they can render, so this order is load-bearing.
#[derive(Debug, Clone)]
pub struct MultiPart {
    headers: Headers,
    parts: Vec<SinglePart>,
}

/// Create a random MIME boundary.
///
/// 40 alphanumerics make collision with part content implausible enough for
/// the RFC 2046 distinguishability requirement.
fn make_boundary() -> String {
    std::iter::repeat_with(fastrand::alphanumeric)
        .take(40)
        .collect()
}

fn alternative_content_type(boundary: &str) -> String {
    let value = format!("multipart/alternative; boundary=\"{boundary}\"");
    // parse-back is a sanity check on the boundary token
    value
        .parse::<Mime>()
        .expect("valid multipart content type");
    value
}

impl MultiPart {
    /// Create a multipart/alternative container from its two alternatives
    ///
    /// `plain` must be the `text/plain` rendition and `html` the `text/html`
    /// one; the container keeps them in that order.
    pub fn alternative(plain: SinglePart, html: SinglePart) -> Self {
        let mut headers = Headers::new();
        headers.set_raw(
            HeaderName::new_from_ascii_static("Content-Type"),
            alternative_content_type(&make_boundary()),
        );

        Self {
            headers,
            parts: vec![plain, html],
        }
    }

    /// Replace the generated boundary, for reproducible output
    pub fn with_boundary(mut self, boundary: &str) -> Self {
        self.headers.set_raw(
            HeaderName::new_from_ascii_static("Content-Type"),
            alternative_content_type(boundary),
        );
        self
    }

    /// Get the boundary token of this container
    pub fn boundary(&self) -> String {
        let content_type: Mime = self
            .headers
            .get_raw("Content-Type")
            .expect("multipart content type")
            .parse()
            .expect("valid multipart content type");
        content_type
            .get_param("boundary")
            .expect("multipart boundary")
            .as_str()
            .into()
    }

    /// Get the headers of the container
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Get the parts, plain first, html second
    pub fn parts(&self) -> &[SinglePart] {
        &self.parts
    }

    /// Get the container content formatted for sending
    pub fn formatted(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.format(&mut out);
        out
    }
}

impl EmailFormat for MultiPart {
    fn format(&self, out: &mut Vec<u8>) {
        write!(out, "{}", self.headers)
            .expect("A Write implementation panicked while formatting headers");
        out.extend_from_slice(b"\r\n");

        let boundary = self.boundary();

        for part in &self.parts {
            out.extend_from_slice(b"--");
            out.extend_from_slice(boundary.as_bytes());
            out.extend_from_slice(b"\r\n");
            part.format(out);
        }

        out.extend_from_slice(b"--");
        out.extend_from_slice(boundary.as_bytes());
        out.extend_from_slice(b"--\r\n");
    }
}
