//! Charset policies for header and body encoding
//!
//! A [`CharsetPolicy`] pairs a charset with the transfer scheme used for
//! bodies and the encoded-word subtype used for headers. Policies live in a
//! [`CharsetRegistry`] that is built once and only read afterwards; tests
//! can substitute their own registry without touching process-wide state.

use std::{borrow::Cow, collections::HashMap};

use encoding_rs::Encoding;

/// Transfer encoding applied to message bodies in this charset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// `Content-Transfer-Encoding: quoted-printable`
    ///
    /// The only scheme registered by default. Quoted-printable keeps mostly
    /// Latin text readable on the wire and is chosen explicitly because
    /// generic MIME layers cannot be trusted to pick it for arbitrary
    /// charsets.
    QuotedPrintable,
}

/// Encoded-word subtype used for non-ASCII header runs in this charset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderEncoding {
    /// `=?charset?b?...?=`
    Base64,
    /// `=?charset?q?...?=`
    QuotedPrintable,
}

/// How one charset is encoded on the wire
#[derive(Debug, Clone, Copy)]
pub struct CharsetPolicy {
    encoding: &'static Encoding,
    body: BodyEncoding,
    header: HeaderEncoding,
}

impl CharsetPolicy {
    /// Create a policy for the charset known under `label`
    ///
    /// Returns `None` when `label` names no known character encoding.
    pub fn new(label: &str, body: BodyEncoding, header: HeaderEncoding) -> Option<Self> {
        let encoding = Encoding::for_label(label.as_bytes())?;
        Some(Self {
            encoding,
            body,
            header,
        })
    }

    /// Transfer encoding for bodies in this charset
    pub fn body_encoding(&self) -> BodyEncoding {
        self.body
    }

    /// Encoded-word subtype for headers in this charset
    pub fn header_encoding(&self) -> HeaderEncoding {
        self.header
    }

    /// Convert unicode text into this charset's byte representation
    ///
    /// Returns `None` when some character has no representation in the
    /// charset; callers turn that into [`Error::Unrepresentable`].
    ///
    /// [`Error::Unrepresentable`]: crate::Error::Unrepresentable
    pub fn encode_text<'a>(&self, text: &'a str) -> Option<Cow<'a, [u8]>> {
        let (bytes, _, had_errors) = self.encoding.encode(text);
        if had_errors {
            None
        } else {
            Some(bytes)
        }
    }

    /// Convert charset bytes back to unicode, substituting U+FFFD for
    /// malformed sequences
    pub fn decode_bytes(&self, bytes: &[u8]) -> String {
        let (text, _, _) = self.encoding.decode(bytes);
        text.into_owned()
    }
}

/// Mapping from charset name to its wire-encoding policy
///
/// Lookup is case-insensitive; the name used on the wire (in encoded-words
/// and `charset=` attributes) is the one the caller passes to the encode
/// operations, not the registered key.
#[derive(Debug, Clone, Default)]
pub struct CharsetRegistry {
    policies: HashMap<String, CharsetPolicy>,
}

impl CharsetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the stock text charsets
    ///
    /// Registers `utf8`, `utf-8`, `us-ascii`, `ascii`, `iso-8859-1`,
    /// `latin1` and `windows-1252`, all with quoted-printable bodies and
    /// base64 encoded-words.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for label in [
            "utf8",
            "utf-8",
            "us-ascii",
            "ascii",
            "iso-8859-1",
            "latin1",
            "windows-1252",
        ] {
            let policy =
                CharsetPolicy::new(label, BodyEncoding::QuotedPrintable, HeaderEncoding::Base64)
                    .expect("stock charset label");
            registry.register(label, policy);
        }
        registry
    }

    /// Register `policy` under `name`, replacing any previous entry
    pub fn register(&mut self, name: &str, policy: CharsetPolicy) {
        self.policies.insert(name.to_ascii_lowercase(), policy);
    }

    /// Look up the policy for `name`
    pub fn policy(&self, name: &str) -> Option<&CharsetPolicy> {
        self.policies.get(&name.to_ascii_lowercase())
    }
}
