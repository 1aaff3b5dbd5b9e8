//! Swagger UI page.
//!
//! The page loads Swagger UI from a CDN and points it at the JSON document
//! served next to it, so the HTML never embeds a stale copy of the document.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Default Swagger UI release loaded from the CDN.
pub const DEFAULT_SWAGGER_VERSION: &str = "5.18.2";

/// Swagger UI configuration and HTML generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwaggerUi {
    /// Base path the UI is served under (e.g. "/docs").
    path: String,
    title: String,
    deep_linking: bool,
    doc_expansion: DocExpansion,
    display_request_duration: bool,
    swagger_version: String,
}

/// How much of each operation Swagger UI expands on load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocExpansion {
    /// Everything collapsed.
    None,
    /// Tags expanded, operations collapsed.
    #[default]
    List,
    /// Everything expanded.
    Full,
}

impl DocExpansion {
    /// Value passed to Swagger UI.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::List => "list",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for DocExpansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocExpansion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "list" => Ok(Self::List),
            "full" => Ok(Self::Full),
            other => Err(format!("unknown doc expansion '{other}', expected none, list or full")),
        }
    }
}

impl SwaggerUi {
    /// Create a Swagger UI page for an API.
    ///
    /// # Arguments
    ///
    /// * `path` - The base URL path the UI is served under
    /// * `api_title` - Title of the documented API, used in the page title
    #[must_use]
    pub fn new(path: impl Into<String>, api_title: &str) -> Self {
        Self {
            path: path.into(),
            title: format!("{api_title} - Swagger UI"),
            deep_linking: true,
            doc_expansion: DocExpansion::List,
            display_request_duration: true,
            swagger_version: DEFAULT_SWAGGER_VERSION.to_string(),
        }
    }

    /// Set the page title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Enable or disable deep linking.
    #[must_use]
    pub fn deep_linking(mut self, enabled: bool) -> Self {
        self.deep_linking = enabled;
        self
    }

    /// Set the document expansion level.
    #[must_use]
    pub fn doc_expansion(mut self, expansion: DocExpansion) -> Self {
        self.doc_expansion = expansion;
        self
    }

    /// Enable or disable request duration display.
    #[must_use]
    pub fn display_request_duration(mut self, enabled: bool) -> Self {
        self.display_request_duration = enabled;
        self
    }

    /// Set the Swagger UI version to load.
    #[must_use]
    pub fn swagger_version(mut self, version: impl Into<String>) -> Self {
        self.swagger_version = version.into();
        self
    }

    /// Base path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path the JSON document is served at.
    #[must_use]
    pub fn spec_path(&self) -> String {
        format!("{}/json", self.path.trim_end_matches('/'))
    }

    /// Render the HTML page.
    #[must_use]
    pub fn html(&self) -> String {
        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui.css" />
    <style>
        html {{
            box-sizing: border-box;
            overflow-y: scroll;
        }}
        *,
        *:before,
        *:after {{
            box-sizing: inherit;
        }}
        body {{
            margin: 0;
            background: #fafafa;
        }}
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = function() {{
            window.ui = SwaggerUIBundle({{
                url: '{spec_url}',
                dom_id: '#swagger-ui',
                deepLinking: {deep_linking},
                docExpansion: '{doc_expansion}',
                displayRequestDuration: {display_duration},
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout"
            }});
        }};
    </script>
</body>
</html>"##,
            title = html_escape(&self.title),
            version = html_escape(&self.swagger_version),
            spec_url = html_escape(&self.spec_path()),
            deep_linking = self.deep_linking,
            doc_expansion = self.doc_expansion.as_str(),
            display_duration = self.display_request_duration,
        )
    }

    /// Render the HTML page as a response body.
    #[must_use]
    pub fn html_bytes(&self) -> Bytes {
        Bytes::from(self.html())
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_path() {
        assert_eq!(SwaggerUi::new("/docs", "Shop").spec_path(), "/docs/json");
        assert_eq!(SwaggerUi::new("/docs/", "Shop").spec_path(), "/docs/json");
    }

    #[test]
    fn test_html_points_at_json_document() {
        let html = SwaggerUi::new("/api-docs", "Shop").html();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Shop - Swagger UI</title>"));
        assert!(html.contains("url: '/api-docs/json'"));
        assert!(html.contains("swagger-ui-dist@5.18.2"));
        assert!(html.contains("docExpansion: 'list'"));
    }

    #[test]
    fn test_customization() {
        let html = SwaggerUi::new("/docs", "Shop")
            .title("Custom")
            .deep_linking(false)
            .doc_expansion(DocExpansion::Full)
            .display_request_duration(false)
            .swagger_version("5.0.0")
            .html();

        assert!(html.contains("<title>Custom</title>"));
        assert!(html.contains("deepLinking: false"));
        assert!(html.contains("docExpansion: 'full'"));
        assert!(html.contains("displayRequestDuration: false"));
        assert!(html.contains("swagger-ui-dist@5.0.0"));
    }

    #[test]
    fn test_title_is_escaped() {
        let html = SwaggerUi::new("/docs", "<script>alert(1)</script>").html();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"x\""), "&quot;x&quot;");
        assert_eq!(html_escape("'"), "&#x27;");
    }

    #[test]
    fn test_doc_expansion_parse() {
        assert_eq!("FULL".parse::<DocExpansion>(), Ok(DocExpansion::Full));
        assert_eq!(" none ".parse::<DocExpansion>(), Ok(DocExpansion::None));
        assert!("everything".parse::<DocExpansion>().is_err());
        assert_eq!(DocExpansion::default().to_string(), "list");
    }
}
