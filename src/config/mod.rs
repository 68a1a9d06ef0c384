pub mod preferences;
pub mod toml_config;

use crate::adapters::gemini::{DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::utils::error::{AdGenError, Result};
use crate::utils::validation::{validate_model_name, validate_url, Validate};
use preferences::Theme;
use std::path::PathBuf;
use std::str::FromStr;
use toml_config::FileConfig;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Used only when the platform has no per-user config directory.
pub const FALLBACK_PREFERENCES_DIR: &str = ".adgen";

/// Per-user config directory, so the theme follows the user across working
/// directories.
pub fn default_preferences_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "", "adgen")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_PREFERENCES_DIR))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

impl FromStr for OutputFormat {
    type Err = AdGenError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            other => Err(AdGenError::InvalidConfigValue {
                field: "output.format".to_string(),
                value: other.to_string(),
                reason: "Supported formats: text, html, json".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "adgen")]
#[command(about = "Generate Google Ads assets for a website with a two-step Gemini pipeline")]
pub struct CliConfig {
    /// Website URL, including the scheme (e.g. https://example.com)
    #[arg(long, default_value = "")]
    pub url: String,

    /// A product or service to focus on; repeat for several
    #[arg(long = "focus-service")]
    pub focus_services: Vec<String>,

    /// File with one focus service per line
    #[arg(long)]
    pub focus_services_file: Option<PathBuf>,

    /// Analyze website content only (no web search for the brief)
    #[arg(long)]
    pub website_only: bool,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub api_base: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the rendered output here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also export the parsed assets as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Set and remember the HTML theme
    #[arg(long, value_enum)]
    pub theme: Option<Theme>,

    /// Include the marketing brief in the output
    #[arg(long)]
    pub show_brief: bool,

    /// Print the marketing brief prompt and exit without calling the model
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: LogFormat,

    #[arg(long, help = "Log per-stage timing and memory")]
    pub monitor: bool,
}

/// Process-wide settings, resolved once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Settings {
    api_key: String,
    pub model: String,
    pub api_base: String,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub show_brief: bool,
    pub preferences_dir: PathBuf,
}

/// Values the command line may override.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub model: Option<String>,
    pub api_base: Option<String>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub show_brief: bool,
}

#[cfg(feature = "cli")]
impl From<&CliConfig> for Overrides {
    fn from(cli: &CliConfig) -> Self {
        Self {
            model: cli.model.clone(),
            api_base: cli.api_base.clone(),
            format: cli.format,
            output: cli.output.clone(),
            csv: cli.csv.clone(),
            show_brief: cli.show_brief,
        }
    }
}

impl Settings {
    /// Command line over file over defaults. The API key comes from the file
    /// or `GEMINI_API_KEY`; without one nothing else can run.
    pub fn resolve(
        overrides: Overrides,
        file: FileConfig,
        env_api_key: Option<String>,
    ) -> Result<Self> {
        let api_key = file
            .model
            .api_key
            .or(env_api_key)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AdGenError::MissingConfig {
                field: API_KEY_ENV.to_string(),
            })?;

        let format = match (overrides.format, file.output.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(format)) => format.parse()?,
            (None, None) => OutputFormat::default(),
        };

        let settings = Self {
            api_key,
            model: overrides
                .model
                .or(file.model.name)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: overrides
                .api_base
                .or(file.model.api_base)
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            format,
            output: overrides.output.or(file.output.path.map(PathBuf::from)),
            csv: overrides.csv.or(file.output.csv_path.map(PathBuf::from)),
            show_brief: overrides.show_brief || file.output.show_brief.unwrap_or(false),
            preferences_dir: file
                .preferences
                .directory
                .map(PathBuf::from)
                .unwrap_or_else(default_preferences_dir),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_model_name("model", &self.model)?;
        validate_url("api_base", &self.api_base).map_err(|_| AdGenError::InvalidConfigValue {
            field: "api_base".to_string(),
            value: self.api_base.clone(),
            reason: "Must be an absolute URL".to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = Settings::resolve(Overrides::default(), FileConfig::default(), None).unwrap_err();
        assert!(matches!(err, AdGenError::MissingConfig { ref field } if field == API_KEY_ENV));

        let blank = Settings::resolve(
            Overrides::default(),
            FileConfig::default(),
            Some("  ".to_string()),
        );
        assert!(blank.is_err());
    }

    #[test]
    fn test_defaults() {
        let settings =
            Settings::resolve(Overrides::default(), FileConfig::default(), Some("k".to_string()))
                .unwrap();
        assert_eq!(settings.api_key(), "k");
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.api_base, DEFAULT_API_BASE);
        assert_eq!(settings.format, OutputFormat::Text);
        assert_eq!(settings.preferences_dir, default_preferences_dir());
        assert!(!settings.show_brief);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig::from_toml_str(
            "[model]\nname = \"gemini-2.5-pro\"\napi_key = \"from-file\"\n[output]\nformat = \"json\"\nshow_brief = true\n",
        )
        .unwrap();
        let overrides = Overrides {
            model: Some("gemini-2.5-flash-lite".to_string()),
            format: Some(OutputFormat::Html),
            ..Overrides::default()
        };

        let settings = Settings::resolve(overrides, file, Some("from-env".to_string())).unwrap();
        assert_eq!(settings.api_key(), "from-file");
        assert_eq!(settings.model, "gemini-2.5-flash-lite");
        assert_eq!(settings.format, OutputFormat::Html);
        assert!(settings.show_brief);
    }

    #[test]
    fn test_preferences_dir_does_not_follow_working_directory() {
        let dir = default_preferences_dir();
        if directories::ProjectDirs::from("com", "", "adgen").is_some() {
            assert!(dir.is_absolute());
        } else {
            assert_eq!(dir, PathBuf::from(FALLBACK_PREFERENCES_DIR));
        }

        let file = FileConfig::from_toml_str("[preferences]\ndirectory = \"/tmp/adgen-prefs\"\n").unwrap();
        let settings = Settings::resolve(Overrides::default(), file, Some("k".to_string())).unwrap();
        assert_eq!(settings.preferences_dir, PathBuf::from("/tmp/adgen-prefs"));
    }

    #[test]
    fn test_bad_format_in_file() {
        let file = FileConfig::from_toml_str("[output]\nformat = \"pdf\"\n").unwrap();
        let err = Settings::resolve(Overrides::default(), file, Some("k".to_string())).unwrap_err();
        assert!(matches!(err, AdGenError::InvalidConfigValue { ref field, .. } if field == "output.format"));
    }
}
