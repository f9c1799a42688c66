// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Fetch(FetchError),
    Config(String),
    Io(String),
}

/// Specific error types for avatar fetch issues.
///
/// The retry policy does not distinguish between these causes; every failed
/// attempt counts against the same budget. The variants exist so diagnostics
/// can say what actually went wrong.
#[derive(Debug, Clone)]
pub enum FetchError {
    /// The request could not be sent or the connection dropped mid-transfer
    Network(String),

    /// The server answered with a non-success HTTP status
    Http(u16),

    /// The response body was not a decodable image
    Decode(String),

    /// The response body exceeded the accepted size cap
    TooLarge(u64),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "Network error: {}", msg),
            FetchError::Http(status) => write!(f, "HTTP status: {}", status),
            FetchError::Decode(msg) => write!(f, "Decode error: {}", msg),
            FetchError::TooLarge(bytes) => write!(f, "Response too large: {} bytes", bytes),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Fetch(e) => write!(f, "Fetch Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Io(e) => write!(f, "I/O Error: {}", e),
        }
    }
}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        Error::Fetch(err)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

impl From<image_rs::ImageError> for FetchError {
    fn from(err: image_rs::ImageError) -> Self {
        FetchError::Decode(err.to_string())
    }
}

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn fetch_error_http_status_display() {
        let err = FetchError::Http(404);
        assert_eq!(format!("{}", err), "HTTP status: 404");
    }

    #[test]
    fn fetch_error_too_large_display() {
        let err = FetchError::TooLarge(9_000_000);
        assert!(format!("{}", err).contains("9000000"));
    }

    #[test]
    fn fetch_error_wraps_into_error() {
        let err: Error = FetchError::Network("connection reset".to_string()).into();
        match err {
            Error::Fetch(FetchError::Network(message)) => {
                assert!(message.contains("connection reset"));
            }
            _ => panic!("expected Fetch variant"),
        }
    }
}
