use crate::utils::error::{AdGenError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Accepts any absolute URL the `url` crate can parse; a scheme is required.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<Url> {
    if url_str.is_empty() {
        return Err(AdGenError::InvalidInput {
            field: field_name.to_string(),
            reason: "Please enter a website URL.".to_string(),
        });
    }

    Url::parse(url_str).map_err(|e| AdGenError::InvalidInput {
        field: field_name.to_string(),
        reason: format!(
            "Please enter a valid URL including the scheme (e.g. https://example.com): {}",
            e
        ),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AdGenError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_model_name(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    if value.chars().any(|c| c.is_whitespace() || c == '/') {
        return Err(AdGenError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Model name cannot contain whitespace or '/'".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AdGenError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AdGenError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}
