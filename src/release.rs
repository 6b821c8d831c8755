//! # Release Resolution
//!
//! The release resolver queries the upstream release metadata endpoint (the
//! GitHub "latest release" API) and extracts the tag of the most recent
//! published release. It holds no state and never caches: every mirror run
//! queries live, so the tool always pins to whatever upstream currently
//! publishes as latest.
//!
//! The network half (`resolve_latest`) is deliberately thin; payload
//! interpretation lives in [`tag_from_payload`] so it can be exercised
//! without any network access.

use std::fmt;

use semver::Version;
use serde::Deserialize;

use crate::error::{Error, Result};

/// The version label of the latest published upstream release.
///
/// Opaque once resolved; used only to pin the snapshot and to label the
/// resulting commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag(String);

impl ReleaseTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The subset of the release metadata payload this tool consumes.
#[derive(Debug, Deserialize)]
pub struct ReleasePayload {
    /// The tag field; absent or empty payloads are a resolution error.
    pub tag_name: Option<String>,
}

/// Resolve the latest published release tag from the metadata endpoint.
///
/// Fails with [`Error::Resolution`] when the endpoint is unreachable, returns
/// a non-success status, or its payload carries no usable tag field.
pub fn resolve_latest(url: &str) -> Result<ReleaseTag> {
    let response = ureq::get(url)
        .set("User-Agent", "etl-vendor")
        .set("Accept", "application/vnd.github+json")
        .call()
        .map_err(|e| Error::Resolution {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    let payload: ReleasePayload = response.into_json().map_err(|e| Error::Resolution {
        url: url.to_string(),
        message: format!("malformed release payload: {}", e),
    })?;

    tag_from_payload(&payload, url)
}

/// Extract the release tag from a decoded metadata payload.
pub fn tag_from_payload(payload: &ReleasePayload, url: &str) -> Result<ReleaseTag> {
    match payload.tag_name.as_deref() {
        Some(tag) if !tag.is_empty() => {
            if parse_semver_tag(tag).is_none() {
                log::warn!("upstream tag '{}' is not a semantic version", tag);
            }
            Ok(ReleaseTag::new(tag))
        }
        _ => Err(Error::Resolution {
            url: url.to_string(),
            message: "payload has no tag_name field".to_string(),
        }),
    }
}

/// Parse a tag string into a semantic version.
pub fn parse_semver_tag(tag: &str) -> Option<Version> {
    // Common tag formats: v20.39.4, 20.39.4
    let version_str = tag.strip_prefix('v').unwrap_or(tag);
    Version::parse(version_str).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_URL: &str = "https://api.github.com/repos/ETLCPP/etl/releases/latest";

    fn payload(json: &str) -> ReleasePayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_tag_from_payload_extracts_tag_name() {
        let payload = payload(r#"{"tag_name": "v20.39.4", "name": "Release v20.39.4"}"#);
        let tag = tag_from_payload(&payload, TEST_URL).unwrap();
        assert_eq!(tag.as_str(), "v20.39.4");
        assert_eq!(tag.to_string(), "v20.39.4");
    }

    #[test]
    fn test_tag_from_payload_missing_tag_name() {
        let payload = payload(r#"{"name": "some release"}"#);
        let err = tag_from_payload(&payload, TEST_URL).unwrap_err();
        assert!(matches!(err, Error::Resolution { .. }));
        assert!(format!("{}", err).contains("tag_name"));
    }

    #[test]
    fn test_tag_from_payload_empty_tag_name() {
        let payload = payload(r#"{"tag_name": ""}"#);
        let err = tag_from_payload(&payload, TEST_URL).unwrap_err();
        assert!(matches!(err, Error::Resolution { .. }));
    }

    #[test]
    fn test_tag_from_payload_accepts_non_semver_tags() {
        let payload = payload(r#"{"tag_name": "release-2026-08"}"#);
        let tag = tag_from_payload(&payload, TEST_URL).unwrap();
        assert_eq!(tag.as_str(), "release-2026-08");
    }

    #[test]
    fn test_parse_semver_tag() {
        assert_eq!(
            parse_semver_tag("v20.39.4"),
            Some(Version::parse("20.39.4").unwrap())
        );
        assert_eq!(
            parse_semver_tag("20.39.4"),
            Some(Version::parse("20.39.4").unwrap())
        );
        assert_eq!(parse_semver_tag("invalid"), None);
        assert_eq!(parse_semver_tag("v1.0"), None);
        assert_eq!(parse_semver_tag(""), None);
    }

    // Note: resolve_latest itself requires network access to the live
    // endpoint, so it is not exercised here
}
