//! Link types and validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::LinkValidationError;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;
/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 1000;
/// Maximum site name length in characters.
pub const MAX_SITE_NAME_LEN: usize = 100;

/// Open Graph metadata rendered into a preview page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkValues {
    /// Page title (`og:title`).
    pub title: String,
    /// Short summary (`og:description`).
    #[serde(default)]
    pub description: String,
    /// Name of the site the link claims to come from (`og:site_name`).
    #[serde(default)]
    pub site_name: String,
    /// Open Graph object type, e.g. `website` or `video.movie`.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    /// Target URL (`og:url`).
    pub url: String,
    /// Preview image URL (`og:image`).
    #[serde(default)]
    pub image: Option<String>,
}

fn default_kind() -> String {
    "website".to_string()
}

impl LinkValues {
    /// Check the values before they are stored or rendered.
    ///
    /// # Errors
    ///
    /// Returns the first rule the values break.
    pub fn validate(&self) -> Result<(), LinkValidationError> {
        if self.title.trim().is_empty() {
            return Err(LinkValidationError::MissingTitle);
        }
        check_len("title", &self.title, MAX_TITLE_LEN)?;
        check_len("description", &self.description, MAX_DESCRIPTION_LEN)?;
        check_len("site_name", &self.site_name, MAX_SITE_NAME_LEN)?;

        if self.kind.trim().is_empty() {
            return Err(LinkValidationError::MissingType);
        }
        if !is_http_url(&self.url) {
            return Err(LinkValidationError::InvalidUrl {
                field: "url",
                value: self.url.clone(),
            });
        }
        if let Some(image) = &self.image {
            if !is_http_url(image) {
                return Err(LinkValidationError::InvalidUrl {
                    field: "image",
                    value: image.clone(),
                });
            }
        }

        Ok(())
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), LinkValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(LinkValidationError::TooLong { field, len, max });
    }
    Ok(())
}

/// Absolute `http`/`https` URL with a host and no whitespace.
fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));

    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !host.is_empty() && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// A user-created link preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Short identifier used in the preview URL and as the image key.
    pub slug: String,
    /// Rendered metadata.
    pub values: LinkValues,
    /// Whether `values.image` points at an image held by the image store.
    pub hosted_image: bool,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
}
