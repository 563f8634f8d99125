//! Assembled message structure and wire rendering
//!
//! A [`Message`] is an insertion-ordered header block plus a body: either a
//! single already-encoded payload or the two alternatives of a
//! multipart/alternative container. Messages are built by the
//! [`Composer`][crate::Composer] operations, are immutable once built, and
//! render themselves to RFC 2822 wire text with [`Message::formatted`].

pub use self::mimebody::{MultiPart, SinglePart};

pub(crate) mod body;
pub mod header;
mod mimebody;

use std::io::Write;

use crate::message::header::Headers;

/// Something that can be formatted as an email message
pub(crate) trait EmailFormat {
    fn format(&self, out: &mut Vec<u8>);
}

/// An assembled email message ready for transport serialization
#[derive(Debug, Clone)]
pub struct Message {
    headers: Headers,
    body: MessageBody,
}

/// Body payload of an assembled message
#[derive(Debug, Clone)]
pub enum MessageBody {
    /// Single-part transfer-encoded payload
    Raw(Vec<u8>),
    /// Plain and HTML alternatives sharing one boundary
    Alternative(MultiPart),
}

impl Message {
    pub(crate) fn new(headers: Headers, body: MessageBody) -> Self {
        Self { headers, body }
    }

    /// Get the headers of the message
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Get the body of the message
    pub fn body(&self) -> &MessageBody {
        &self.body
    }

    /// Get the message content formatted for sending
    ///
    /// Renders the header block, a blank line, and the body; multipart
    /// bodies are delimited with `--boundary` lines and terminated with
    /// `--boundary--`.
    pub fn formatted(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.format(&mut out);
        out
    }
}

impl EmailFormat for Message {
    fn format(&self, out: &mut Vec<u8>) {
        write!(out, "{}", self.headers)
            .expect("A Write implementation panicked while formatting headers");

        match &self.body {
            MessageBody::Raw(raw) => {
                out.extend_from_slice(b"\r\n");
                out.extend_from_slice(raw);
            }
            // the container renders its own Content-Type header line, so
            // its header block continues ours before the blank line
            MessageBody::Alternative(multi) => multi.format(out),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{
        header::{HeaderName, Headers},
        Message, MessageBody,
    };

    #[test]
    fn raw_body_format() {
        let mut headers = Headers::new();
        headers.set_raw(HeaderName::new_from_ascii_static("From"), "a@b".into());
        headers.set_raw(HeaderName::new_from_ascii_static("Subject"), "hi".into());

        let message = Message::new(headers, MessageBody::Raw(b"body text".to_vec()));

        assert_eq!(
            String::from_utf8(message.formatted()).unwrap(),
            concat!("From: a@b\r\n", "Subject: hi\r\n", "\r\n", "body text")
        );
    }
}
