use crate::utils::error::{AdGenError, Result};
use crate::utils::validation::{validate_model_name, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env reference pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub model: ModelSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub preferences: PreferencesSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelSection {
    pub name: Option<String>,
    pub api_base: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub format: Option<String>,
    pub path: Option<String>,
    pub csv_path: Option<String>,
    pub show_brief: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreferencesSection {
    pub directory: Option<String>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(&Self::substitute_env_vars(content)).map_err(|e| {
            AdGenError::ConfigParse {
                message: format!("TOML parsing error: {}", e),
            }
        })?;
        Ok(config.without_unresolved())
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_REFERENCE
            .replace_all(content, |caps: &regex::Captures| {
                std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
            })
            .into_owned()
    }

    /// A value still holding a `${VAR}` reference counts as unset.
    fn without_unresolved(mut self) -> Self {
        let unresolved = |value: &mut Option<String>| {
            if value.as_deref().is_some_and(|v| ENV_REFERENCE.is_match(v)) {
                *value = None;
            }
        };
        unresolved(&mut self.model.name);
        unresolved(&mut self.model.api_base);
        unresolved(&mut self.model.api_key);
        unresolved(&mut self.output.path);
        unresolved(&mut self.output.csv_path);
        unresolved(&mut self.preferences.directory);
        self
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.model.name {
            validate_model_name("model.name", name)?;
        }
        if let Some(path) = &self.output.path {
            validate_path("output.path", path)?;
        }
        if let Some(path) = &self.output.csv_path {
            validate_path("output.csv_path", path)?;
        }
        if let Some(directory) = &self.preferences.directory {
            validate_path("preferences.directory", directory)?;
        }
        Ok(())
    }
}
