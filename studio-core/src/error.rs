use std::{error, fmt, io};

/// Result of a single backend read.  Failures never escape this boundary as
/// panics; everything the network, the server or the decoder can do wrong ends
/// up as a `FetchError`.
pub type FetchResult<T> = Result<T, FetchError>;

#[derive(Clone, Debug, PartialEq)]
pub enum FetchError {
    Network(String),
    Timeout,
    HttpStatus(u16),
    Rejected(String),
    Parse(String),
}

/// Coarse failure classes used for logging and fallback decisions.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FetchErrorKind {
    Network,
    HttpStatus,
    Parse,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Network(_) | Self::Timeout => FetchErrorKind::Network,
            Self::HttpStatus(_) | Self::Rejected(_) => FetchErrorKind::HttpStatus,
            Self::Parse(_) => FetchErrorKind::Parse,
        }
    }
}

impl error::Error for FetchError {}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(err) => write!(f, "Network error: {err}"),
            Self::Timeout => write!(f, "Request timed out"),
            Self::HttpStatus(code) => write!(f, "Unexpected HTTP status: {code}"),
            Self::Rejected(msg) => write!(f, "Server rejected request: {msg}"),
            Self::Parse(err) => write!(f, "Malformed response: {err}"),
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => f.write_str("network"),
            Self::HttpStatus => f.write_str("http-status"),
            Self::Parse => f.write_str("parse"),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<ureq::Error> for FetchError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => Self::HttpStatus(code),
            ureq::Error::Timeout(_) => Self::Timeout,
            ureq::Error::Json(err) => Self::Parse(err.to_string()),
            err => Self::Network(err.to_string()),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    NoConfigDir,
    Io(io::Error),
    Json(serde_json::Error),
}

impl error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoConfigDir => write!(f, "No config directory available"),
            Self::Io(err) => err.fmt(f),
            Self::Json(err) => err.fmt(f),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
