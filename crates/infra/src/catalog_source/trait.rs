use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use shelfscan_products::Product;

/// One fetched, deserialized catalog.
///
/// Owned by a single request and dropped with its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    /// Where the snapshot came from (URL, file path, or a fixed label).
    pub source: String,
    pub fetched_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub fn new(products: Vec<Product>, source: impl Into<String>) -> Self {
        Self {
            products,
            source: source.into(),
            fetched_at: Utc::now(),
        }
    }
}

/// Failure to produce a snapshot.
///
/// The first three variants are caller mistakes (bad or missing location);
/// the rest mean the data is unavailable.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no catalog location supplied and no default configured")]
    MissingLocation,

    #[error("catalog location override is disabled")]
    OverrideDisabled,

    #[error("invalid catalog location `{location}`: {reason}")]
    InvalidLocation { location: String, reason: String },

    #[error("catalog request failed: {0}")]
    Network(String),

    #[error("catalog source answered with status {status}")]
    Status { status: u16 },

    #[error("catalog payload could not be decoded: {0}")]
    Decode(String),

    #[error("catalog payload exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

impl FetchError {
    /// Whether the failure stems from the request rather than the upstream.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::MissingLocation | Self::OverrideDisabled | Self::InvalidLocation { .. }
        )
    }
}

/// Produces catalog snapshots.
///
/// `location` is the per-request override (e.g. a `?url=` query parameter);
/// implementations decide whether and how to honor it.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self, location: Option<&str>) -> Result<CatalogSnapshot, FetchError>;

    /// Short label for logs.
    fn describe(&self) -> String;
}

/// Pick the requested location, falling back to the configured default.
pub(crate) fn resolve_location<'a>(
    default: Option<&'a str>,
    requested: Option<&'a str>,
    allow_override: bool,
) -> Result<&'a str, FetchError> {
    match requested.map(str::trim) {
        Some("") => Err(FetchError::InvalidLocation {
            location: String::new(),
            reason: "must not be blank".to_string(),
        }),
        Some(location) if allow_override => Ok(location),
        Some(_) => Err(FetchError::OverrideDisabled),
        None => default.ok_or(FetchError::MissingLocation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requested_location_wins_when_override_allowed() {
        let resolved = resolve_location(Some("https://a"), Some(" https://b "), true).unwrap();
        assert_eq!(resolved, "https://b");
    }

    #[test]
    fn falls_back_to_default() {
        assert_eq!(resolve_location(Some("https://a"), None, false).unwrap(), "https://a");
    }

    #[test]
    fn rejects_missing_blank_and_disallowed_locations() {
        assert!(matches!(
            resolve_location(None, None, true),
            Err(FetchError::MissingLocation)
        ));
        assert!(matches!(
            resolve_location(Some("https://a"), Some("  "), true),
            Err(FetchError::InvalidLocation { .. })
        ));
        assert!(matches!(
            resolve_location(Some("https://a"), Some("https://b"), false),
            Err(FetchError::OverrideDisabled)
        ));
    }

    #[test]
    fn caller_errors_are_classified() {
        assert!(FetchError::MissingLocation.is_caller_error());
        assert!(!FetchError::Status { status: 500 }.is_caller_error());
        assert!(!FetchError::Decode("eof".to_string()).is_caller_error());
        assert!(!FetchError::TooLarge { limit: 1 }.is_caller_error());
    }
}
