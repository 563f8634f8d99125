//! # encoded-mail
//!
//! Charset-aware assembly of RFC 2822 email messages.
//!
//! This crate builds messages carrying non-ASCII text: header values are
//! encoded with RFC 2047 encoded-words, bodies with quoted-printable, and
//! the content headers are set explicitly because generic MIME layers
//! cannot be trusted to pick quoted-printable for arbitrary charsets.
//!
//! ## Usage
//!
//! ### Single-part message
//!
//! ```rust
//! use encoded_mail::Composer;
//!
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let message = Composer::new().construct_simple_encoded_message(
//!     "test@example.com",
//!     "test@example.com",
//!     "Un Subjét",
//!     "A simple body with some non ascii téxt",
//!     &[("X-Test", "tést")],
//!     "utf-8",
//! )?;
//!
//! let wire = String::from_utf8(message.formatted())?;
//! assert!(wire.contains("Subject: Un =?utf-8?b?U3ViasOpdA==?=\r\n"));
//! assert!(wire.contains("A simple body with some non ascii t=C3=A9xt"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Plain and HTML alternatives
//!
//! ```rust
//! use encoded_mail::Composer;
//!
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let message = Composer::new().construct_multipart(
//!     "test@example.com",
//!     "test@example.com",
//!     "Happy new yéar",
//!     "A simple body",
//!     "<p>A simple body</p>",
//!     &[],
//!     "utf-8",
//! )?;
//!
//! let wire = String::from_utf8(message.formatted())?;
//! assert!(wire.contains("Content-Type: multipart/alternative; boundary="));
//! # Ok(())
//! # }
//! ```
//!
//! ### Decoding inbound header values
//!
//! ```rust
//! use encoded_mail::decode_header;
//!
//! assert_eq!(
//!     decode_header("Je les =?utf-8?b?ZMOpdMOoc3Rl?= oui?"),
//!     "Je les détèste oui?"
//! );
//! ```
//!
//! All operations are synchronous pure transforms; the only shared piece is
//! the [`CharsetRegistry`], which is read-only once built, so a `Composer`
//! can be used freely from multiple threads.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub use crate::{
    charset::{BodyEncoding, CharsetPolicy, CharsetRegistry, HeaderEncoding},
    compose::{Composer, HtmlConverter},
    error::Error,
    message::{Message, MessageBody, MultiPart, SinglePart},
    rfc2047::{decode_header, encode_header},
};

pub mod charset;
mod compose;
mod error;
pub mod message;
mod rfc2047;
