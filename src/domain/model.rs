use serde::{Deserialize, Serialize};

/// Raw values as typed by the user, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub url: String,
    /// Newline-separated service names.
    pub focus_services: String,
    pub website_only: bool,
}

/// A validated submission. Immutable once built.
///
/// The URL is kept exactly as entered (trimmed) so prompts quote what the
/// user typed rather than a normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    url: String,
    focus_services: Vec<String>,
    use_website_only: bool,
}

impl GenerationRequest {
    pub fn new(url: impl Into<String>, focus_services: Vec<String>, use_website_only: bool) -> Self {
        Self {
            url: url.into(),
            focus_services,
            use_website_only,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn focus_services(&self) -> &[String] {
        &self.focus_services
    }

    pub fn use_website_only(&self) -> bool {
        self.use_website_only
    }
}

/// Free text returned by the first model call. Its section layout is
/// requested of the model but never checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketingBrief {
    text: String,
}

impl MarketingBrief {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

pub const GENERAL_FOCUS: &str = "General Focus";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdCopyVariation {
    pub service_focus: String,
    pub headlines: Vec<String>,
    pub descriptions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sitelink {
    pub text: String,
    pub description_line1: String,
    pub description_line2: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetGroup {
    pub header: String,
    pub values: Vec<String>,
}

/// Everything recovered from the ad-copy response. Length and count targets
/// are requested of the model only; whatever came back is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdAssetBundle {
    pub variations: Vec<AdCopyVariation>,
    pub sitelinks: Vec<Sitelink>,
    pub structured_snippets: Vec<SnippetGroup>,
    pub callouts: Vec<String>,
}

impl AdAssetBundle {
    pub fn is_empty(&self) -> bool {
        self.variations.is_empty()
            && self.sitelinks.is_empty()
            && self.structured_snippets.is_empty()
            && self.callouts.is_empty()
    }
}
