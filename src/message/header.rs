//! Header block of an assembled message
// https://tools.ietf.org/html/rfc2822#section-2.2

use std::{
    borrow::Cow,
    fmt::{self, Display},
    ops::Deref,
};

/// A validated RFC 2822 header field name
#[derive(Debug, Clone)]
pub struct HeaderName(Cow<'static, str>);

impl HeaderName {
    /// Create a header name from a runtime string
    ///
    /// # Panics
    ///
    /// Panics when `ascii` is empty, longer than 76 bytes, not ASCII, or
    /// contains whitespace or a colon.
    pub fn new_from_ascii(ascii: String) -> Self {
        assert!(ascii.is_ascii());
        assert!(!ascii.is_empty() && ascii.len() <= 76);
        assert!(ascii.trim().len() == ascii.len());
        assert!(!ascii.contains(':') && !ascii.contains(' '));
        Self(Cow::Owned(ascii))
    }

    /// Create a header name from a static string, validated at compile time
    pub const fn new_from_ascii_static(ascii: &'static str) -> Self {
        let make_panic = [(); 1];

        let bytes = ascii.as_bytes();
        // the following line panics if ascii is empty or longer than 76 bytes
        let _ = make_panic[(bytes.is_empty() || bytes.len() > 76) as usize];
        let mut i = 0;
        while i < bytes.len() {
            let is_ascii = bytes[i].is_ascii();
            // the following line panics if the character isn't ascii
            let _ = make_panic[!is_ascii as usize];
            let is_unacceptable_char = bytes[i] == b' ' || bytes[i] == b':';
            // the following line panics if the character isn't acceptable in a header name
            let _ = make_panic[is_unacceptable_char as usize];
            i += 1;
        }

        Self(Cow::Borrowed(ascii))
    }
}

impl Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for HeaderName {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for HeaderName {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<HeaderName> for HeaderName {
    fn eq(&self, other: &HeaderName) -> bool {
        self.0 == other.0
    }
}

impl PartialEq<&str> for HeaderName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Insertion-ordered header fields of a message or part
///
/// Field names are unique: setting a name again overwrites the previous
/// value in place. Name matching is case-insensitive, the stored spelling
/// is the one supplied first.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    headers: Vec<(HeaderName, String)>,
}

impl Headers {
    /// Create an empty header block
    #[inline]
    pub const fn new() -> Self {
        Self {
            headers: Vec::new(),
        }
    }

    /// Set `name` to `value`, overwriting any previous value
    pub fn set_raw(&mut self, name: HeaderName, value: String) {
        match self.find_header_mut(&name) {
            Some((_, current_value)) => {
                *current_value = value;
            }
            None => {
                self.headers.push((name, value));
            }
        }
    }

    /// Get the value stored under `name`
    pub fn get_raw(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name_, _value)| name.eq_ignore_ascii_case(name_))
            .map(|(_name, value)| value.as_str())
    }

    /// Whether a value is stored under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.get_raw(name).is_some()
    }

    /// Number of header fields
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Whether the header block is empty
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Iterate the fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &str)> {
        self.headers
            .iter()
            .map(|(name, value)| (name, value.as_str()))
    }

    fn find_header_mut(&mut self, name: &str) -> Option<(&HeaderName, &mut String)> {
        self.headers
            .iter_mut()
            .find(|(name_, _value)| name.eq_ignore_ascii_case(name_))
            .map(|t| (&t.0, &mut t.1))
    }
}

impl Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.headers {
            Display::fmt(name, f)?;
            f.write_str(": ")?;
            f.write_str(value)?;
            f.write_str("\r\n")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{HeaderName, Headers};

    #[test]
    fn valid_headername() {
        assert_eq!(HeaderName::new_from_ascii(String::from("From")), "From");
        assert_eq!(HeaderName::new_from_ascii(String::from("X-Duck")), "X-Duck");
    }

    #[should_panic]
    #[test]
    fn invalid_headername_colon() {
        HeaderName::new_from_ascii(String::from("From:"));
    }

    #[should_panic]
    #[test]
    fn invalid_headername_space() {
        HeaderName::new_from_ascii(String::from("Date "));
    }

    #[should_panic]
    #[test]
    fn invalid_headername_unicode() {
        HeaderName::new_from_ascii(String::from("✉️"));
    }

    #[test]
    fn set_overwrites_case_insensitively() {
        let mut headers = Headers::new();
        headers.set_raw(HeaderName::new_from_ascii_static("Subject"), "one".into());
        headers.set_raw(HeaderName::new_from_ascii("SUBJECT".into()), "two".into());

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get_raw("subject"), Some("two"));
        // the first spelling is the one rendered
        assert_eq!(format!("{headers}"), "Subject: two\r\n");
    }

    #[test]
    fn display_preserves_insertion_order() {
        let mut headers = Headers::new();
        headers.set_raw(HeaderName::new_from_ascii_static("From"), "a@b".into());
        headers.set_raw(HeaderName::new_from_ascii_static("To"), "c@d".into());
        headers.set_raw(HeaderName::new_from_ascii_static("X-Test"), "x".into());

        assert_eq!(
            format!("{headers}"),
            "From: a@b\r\nTo: c@d\r\nX-Test: x\r\n"
        );
    }
}
