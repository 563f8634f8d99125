use std::{
    error::Error as StdError,
    fmt::{self, Display, Formatter},
};

/// Error type for message assembly
///
/// All failures are fatal to the call that produced them: no partial
/// message is ever returned, and identical inputs always fail identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested charset has no registered policy
    UnknownCharset(String),
    /// A header word or body cannot be represented in the target charset
    Unrepresentable {
        /// Name of the charset that rejected the text
        charset: String,
    },
}

impl Display for Error {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Error::UnknownCharset(name) => {
                write!(fmt, "charset {name:?} is not registered")
            }
            Error::Unrepresentable { charset } => {
                write!(fmt, "text cannot be represented in charset {charset:?}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        None
    }
}
