//! Footer contract of the management web UI
//!
//! The UI footer reads two endpoints of the management service and renders
//! the stack version and the ICP (beian) registration number. This module
//! holds the wire shapes of those endpoints and the footer text; fetching
//! is left to the caller.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Endpoint returning the stack version
pub const VERSIONS_PATH: &str = "/terraform/v1/mgmt/versions";

/// Endpoint returning the beian registration
pub const BEIAN_QUERY_PATH: &str = "/terraform/v1/mgmt/beian/query";

/// Page title used when no beian title is configured
pub const DEFAULT_TITLE: &str = "SRS Stack";

/// Response body wrapper: `{ "data": { ... } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiBody<T> {
    pub data: T,
}

/// Payload of [`VERSIONS_PATH`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Versions {
    #[serde(default)]
    pub version: String,
}

/// Payload of [`BEIAN_QUERY_PATH`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Beian {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icp: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Document title for a beian record, falling back to [`DEFAULT_TITLE`]
pub fn page_title(beian: Option<&Beian>) -> &str {
    beian
        .and_then(|b| b.title.as_deref())
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TITLE)
}

/// Footer state; either half may still be missing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Footer {
    pub versions: Option<Versions>,
    pub beian: Option<Beian>,
}

impl Footer {
    /// Build a footer from the raw JSON bodies of both endpoints
    pub fn from_bodies(versions: &str, beian: &str) -> Result<Self> {
        let versions: ApiBody<Versions> = serde_json::from_str(versions)?;
        let beian: ApiBody<Beian> = serde_json::from_str(beian)?;
        Ok(Self {
            versions: Some(versions.data),
            beian: Some(beian.data),
        })
    }

    pub fn title(&self) -> &str {
        page_title(self.beian.as_ref())
    }

    /// Footer line, e.g. `©srs-stack/v5.7.1  ICP-123`
    pub fn render(&self) -> String {
        let version = self
            .versions
            .as_ref()
            .map(|v| v.version.as_str())
            .unwrap_or_default();
        let mut line = format!("\u{a9}srs-stack/v{}", version);

        if let Some(icp) = self
            .beian
            .as_ref()
            .and_then(|b| b.icp.as_deref())
            .filter(|icp| !icp.is_empty())
        {
            line.push_str("  ");
            line.push_str(icp);
        }

        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_from_bodies() {
        let footer = Footer::from_bodies(
            r#"{"data":{"version":"5.7.1","extra":true}}"#,
            r#"{"data":{"icp":"ICP-123","title":"My Stack"}}"#,
        )
        .unwrap();

        assert_eq!(footer.render(), "\u{a9}srs-stack/v5.7.1  ICP-123");
        assert_eq!(footer.title(), "My Stack");
    }

    #[test]
    fn test_missing_beian_fields() {
        let footer =
            Footer::from_bodies(r#"{"data":{"version":"1.0"}}"#, r#"{"data":{}}"#).unwrap();

        assert_eq!(footer.render(), "\u{a9}srs-stack/v1.0");
        assert_eq!(footer.title(), DEFAULT_TITLE);
    }

    #[test]
    fn test_empty_footer_renders() {
        let footer = Footer::default();
        assert_eq!(footer.render(), "\u{a9}srs-stack/v");
        assert_eq!(footer.title(), "SRS Stack");
    }

    #[test]
    fn test_empty_title_falls_back() {
        let beian = Beian {
            icp: None,
            title: Some(String::new()),
        };
        assert_eq!(page_title(Some(&beian)), DEFAULT_TITLE);
    }

    #[test]
    fn test_malformed_body() {
        let result = Footer::from_bodies("not json", r#"{"data":{}}"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
