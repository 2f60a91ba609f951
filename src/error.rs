// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    /// Content type is neither image- nor video-like. Fatal to the browsing
    /// session; the host is expected to abandon the screen.
    UnsupportedMediaKind(String),
    /// A backing row cannot yield a usable media item (e.g. no data
    /// location). Fatal for that row only; never papered over with a
    /// placeholder.
    MalformedRecord(String),
    Config(String),
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedMediaKind(t) => write!(f, "Unsupported media kind: {}", t),
            Error::MalformedRecord(msg) => write!(f, "Malformed media record: {}", msg),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Io(e) => write!(f, "I/O Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
