//! Site configuration (configs/site.json)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
///
/// The JSON file uses PascalCase keys; templates see snake_case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "PascalCase"))]
pub struct SiteConfig {
    pub title: String,
    pub name: String,
    pub email: String,
    pub brand: String,
    pub tagline: String,
    pub links: Links,
    pub nav: Vec<NavItem>,
}

/// Profile links shown in the header and footer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    #[serde(rename(deserialize = "GitHub"))]
    pub github: String,
    #[serde(rename(deserialize = "LinkedIn"))]
    pub linkedin: String,
    #[serde(rename(deserialize = "CV"))]
    pub cv: String,
}

/// Navigation entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "PascalCase"))]
pub struct NavItem {
    pub href: String,
    pub label: String,
    pub class: Option<String>,
}

impl SiteConfig {
    /// Load configuration from a file.
    ///
    /// A non-empty `SITE_EMAIL` environment variable replaces `Email`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let mut config: SiteConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(email) = var("SITE_EMAIL").filter(|v| !v.is_empty()) {
            self.email = email;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "Title": "Brandon",
            "Name": "Elliot Alderson",
            "Email": "name@domain.com",
            "Brand": "mr.robot",
            "Tagline": "Computer Repair with a Smile",
            "Links": {"GitHub": "https://github.com/x", "LinkedIn": "", "CV": "/static/cv.pdf"},
            "Nav": [{"Href": "/blog", "Label": "Blog"}, {"Href": "/", "Label": "Home", "Class": "active"}]
        }"#;
        let config: SiteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.name, "Elliot Alderson");
        assert_eq!(config.links.github, "https://github.com/x");
        assert_eq!(config.links.cv, "/static/cv.pdf");
        assert_eq!(config.nav.len(), 2);
        assert_eq!(config.nav[1].class.as_deref(), Some("active"));
        assert_eq!(config.nav[0].class, None);
    }

    #[test]
    fn test_missing_fields_default() {
        let config: SiteConfig = serde_json::from_str(r#"{"Name": "N"}"#).unwrap();
        assert_eq!(config.name, "N");
        assert_eq!(config.email, "");
        assert!(config.nav.is_empty());
    }

    #[test]
    fn test_serializes_snake_case() {
        let config = SiteConfig {
            name: "N".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["name"], "N");
        assert!(value["links"].get("github").is_some());
    }

    #[test]
    fn test_email_override() {
        let mut config = SiteConfig {
            email: "orig@example.com".into(),
            ..Default::default()
        };
        config.apply_env_overrides(|_| Some(String::new()));
        assert_eq!(config.email, "orig@example.com");

        config.apply_env_overrides(|key| {
            (key == "SITE_EMAIL").then(|| "override@example.com".to_string())
        });
        assert_eq!(config.email, "override@example.com");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        fs::write(&path, r#"{"Title":"T","Name":"N"}"#).unwrap();
        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "T");

        fs::write(&path, "{not json").unwrap();
        assert!(SiteConfig::load(&path).is_err());
    }
}
