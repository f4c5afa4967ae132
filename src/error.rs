//! Error types for feed fetching, date parsing and configuration loading.
//!
//! Per-source failures are values: the collector records them as diagnostics
//! and moves on to the next source, so none of these abort a collection run.

use thiserror::Error;

/// Why a single feed could not be turned into news items.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed returned HTTP {status}")]
    Status { status: u16 },

    #[error("malformed feed XML at byte {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("invalid feed URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// A feed date string that none of the supported formats accept.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateParseError {
    #[error("date string is empty")]
    Empty,

    #[error("unrecognized date format: {0:?}")]
    Unrecognized(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = FetchError::Status { status: 503 };
        assert_eq!(err.to_string(), "feed returned HTTP 503");
    }

    #[test]
    fn test_invalid_url_converts() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: FetchError = parse_err.into();
        assert!(err.to_string().starts_with("invalid feed URL"));
    }

    #[test]
    fn test_date_error_display() {
        assert_eq!(DateParseError::Empty.to_string(), "date string is empty");
        assert!(
            DateParseError::Unrecognized("yesterday".into())
                .to_string()
                .contains("yesterday")
        );
    }
}
