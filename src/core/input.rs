use crate::domain::model::{FormInput, GenerationRequest};
use crate::utils::error::Result;
use crate::utils::validation::validate_url;

/// Turns raw form values into a validated request.
///
/// Only the URL is checked: it must be non-empty and an absolute URL with a
/// scheme. Service names are split on newlines, trimmed, and blank lines
/// dropped.
pub fn collect(input: &FormInput) -> Result<GenerationRequest> {
    let url = input.url.trim();
    validate_url("url", url)?;

    let focus_services = input
        .focus_services
        .trim()
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    Ok(GenerationRequest::new(url, focus_services, input.website_only))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AdGenError;

    fn form(url: &str, services: &str) -> FormInput {
        FormInput {
            url: url.to_string(),
            focus_services: services.to_string(),
            website_only: false,
        }
    }

    #[test]
    fn test_collect_trims_url_and_splits_services() {
        let request = collect(&form(
            "  https://example.com/shop  ",
            "\n Eco-friendly Gadgets \n\n AI-Powered Analytics\n",
        ))
        .unwrap();

        assert_eq!(request.url(), "https://example.com/shop");
        assert_eq!(
            request.focus_services(),
            ["Eco-friendly Gadgets", "AI-Powered Analytics"]
        );
        assert!(!request.use_website_only());
    }

    #[test]
    fn test_collect_rejects_empty_and_schemeless_urls() {
        for bad in ["", "   ", "example.com", "www.example.com/path"] {
            let err = collect(&form(bad, "")).unwrap_err();
            assert!(
                matches!(err, AdGenError::InvalidInput { ref field, .. } if field == "url"),
                "expected url error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_whitespace_only_services_mean_no_focus() {
        let request = collect(&form("https://example.com", "  \n \n")).unwrap();
        assert!(request.focus_services().is_empty());
    }
}
