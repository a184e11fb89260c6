//! Site-level settings stored in `content/site.json`
//!
//! Folio only reads the author from this file, and rewrites the two domain
//! keys on request. Every other key belongs to the site build and is written
//! back untouched.

use crate::config::ContentLayout;
use crate::error::{FolioError, Result};
use crate::fs_utils::FileSystemUtils;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use tracing::warn;

/// File name of the site settings, inside the content root
pub const SITE_FILE: &str = "site.json";

/// The site settings Folio consumes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Default byline for new records
    #[serde(default)]
    pub author: Option<String>,
    /// Public origin, e.g. `https://my-blog.com`
    #[serde(default)]
    pub site_url: Option<String>,
    /// Bare host name of the site
    #[serde(default)]
    pub custom_domain: Option<String>,
}

/// Location of the site settings
pub fn site_path(layout: &ContentLayout) -> PathBuf {
    layout.content_root.join(SITE_FILE)
}

impl SiteConfig {
    /// Read the site settings.
    ///
    /// A missing file gives defaults. An unreadable or malformed file also
    /// gives defaults, together with a warning to show the user.
    pub fn load(fs: &FileSystemUtils, layout: &ContentLayout) -> (Self, Option<String>) {
        let path = site_path(layout);
        if !fs.fs().is_file(&path) {
            return (Self::default(), None);
        }

        let raw: Value = match fs.read_json(&path) {
            Ok(raw) => raw,
            Err(e) => {
                let warning = format!("Ignoring unreadable {}: {}", path.display(), e);
                warn!("{}", warning);
                return (Self::default(), Some(warning));
            }
        };

        // keys of the wrong type are treated as absent
        let text = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_string);
        let site = Self {
            author: text("author"),
            site_url: text("siteUrl"),
            custom_domain: text("customDomain"),
        };
        (site, None)
    }

    /// Author name when set and non-blank
    pub fn author(&self) -> Option<&str> {
        self.author
            .as_deref()
            .map(str::trim)
            .filter(|author| !author.is_empty())
    }
}

/// Result of pointing the site at a domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainUpdate {
    /// Host name written to `customDomain`
    pub custom_domain: String,
    /// Origin written to `siteUrl`
    pub site_url: String,
    /// The file that was rewritten
    #[serde(skip)]
    pub path: PathBuf,
}

/// Parse `my-blog.com` or `https://my-blog.com/anything` into a host name
/// and an origin. Input without a scheme is treated as `https`.
pub fn parse_domain(input: &str) -> Result<(String, String)> {
    let trimmed = input.trim();
    let invalid = || FolioError::InvalidDomain(trimmed.to_string());
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let has_scheme = trimmed.split_once("://").is_some_and(|(scheme, _)| {
        !scheme.is_empty() && scheme.chars().all(|c| c.is_ascii_alphabetic())
    });
    let with_scheme = if has_scheme {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let url = url::Url::parse(&with_scheme).map_err(|_| invalid())?;
    let host = url.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(invalid());
    }

    Ok((host.to_string(), origin.ascii_serialization()))
}

/// Write `customDomain` and `siteUrl` into the site settings.
///
/// The file must already exist and hold a JSON object; all other keys are
/// kept.
pub fn set_domain(
    fs: &FileSystemUtils,
    layout: &ContentLayout,
    input: &str,
) -> Result<DomainUpdate> {
    let path = site_path(layout);
    if !fs.fs().is_file(&path) {
        return Err(FolioError::Config(format!(
            "Missing {}. Run setup before setting a domain.",
            layout.relative_path(&path)
        )));
    }

    let (custom_domain, site_url) = parse_domain(input)?;

    let mut site: Value = fs.read_json(&path)?;
    let Some(object) = site.as_object_mut() else {
        return Err(FolioError::Config(format!(
            "{} must contain a JSON object",
            layout.relative_path(&path)
        )));
    };
    object.insert("customDomain".to_string(), Value::from(custom_domain.clone()));
    object.insert("siteUrl".to_string(), Value::from(site_url.clone()));

    fs.write_json(&path, &site)?;

    Ok(DomainUpdate {
        custom_domain,
        site_url,
        path,
    })
}
