use ads_asset_gen::config::preferences::PreferenceStore;
use ads_asset_gen::config::toml_config::FileConfig;
use ads_asset_gen::config::{LogFormat, OutputFormat, Overrides, API_KEY_ENV};
use ads_asset_gen::core::brief_prompt;
use ads_asset_gen::core::input;
use ads_asset_gen::render::{export, html, text};
use ads_asset_gen::utils::logger;
use ads_asset_gen::utils::validation::Validate;
use ads_asset_gen::{
    AdGenError, CliConfig, FormInput, GeminiClient, GenerationEngine, LocalStorage, RunStatus,
    Settings,
};
use anyhow::Context;
use clap::Parser;
use std::path::Path;

fn fail(error: &AdGenError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 {}", error.recovery_suggestion());
    std::process::exit(error.exit_code());
}

async fn focus_services_text(config: &CliConfig) -> anyhow::Result<String> {
    let mut lines = config.focus_services.clone();
    if let Some(path) = &config.focus_services_file {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading focus services from {}", path.display()))?;
        lines.extend(content.lines().map(str::to_string));
    }
    Ok(lines.join("\n"))
}

async fn write_output(path: Option<&Path>, content: &[u8]) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(path, content)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("📁 Output saved to: {}", path.display());
        }
        None => {
            use std::io::Write;
            std::io::stdout().write_all(content)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }
    tracing::debug!("CLI config: {:?}", config);

    let file_config = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            match FileConfig::from_file(path) {
                Ok(file_config) => file_config,
                Err(e) => fail(&e),
            }
        }
        None => FileConfig::default(),
    };
    if let Err(e) = file_config.validate() {
        fail(&e);
    }

    let settings = match Settings::resolve(
        Overrides::from(&config),
        file_config,
        std::env::var(API_KEY_ENV).ok(),
    ) {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };

    let preferences = PreferenceStore::new(LocalStorage::new(&settings.preferences_dir));
    if let Some(theme) = config.theme {
        if let Err(e) = preferences.save_theme(theme).await {
            tracing::warn!("Could not save theme preference: {}", e);
        }
    }
    let theme = preferences
        .resolve_theme(std::env::var("COLORFGBG").ok().as_deref())
        .await;

    if config.url.trim().is_empty() && config.theme.is_some() {
        println!("Theme set to {}", theme);
        return Ok(());
    }

    let form = FormInput {
        url: config.url.clone(),
        focus_services: focus_services_text(&config).await?,
        website_only: config.website_only,
    };

    if config.dry_run {
        let request = match input::collect(&form) {
            Ok(request) => request,
            Err(e) => fail(&e),
        };
        tracing::info!("🔍 DRY RUN MODE - no model calls will be made");
        println!("{}", brief_prompt::build(&request));
        return Ok(());
    }

    let client = GeminiClient::new(&settings.api_base, settings.api_key());
    let engine = GenerationEngine::new_with_monitoring(client, &settings.model, config.monitor);

    let report = match engine.submit(&form).await {
        Ok(report) => report,
        Err(e) => fail(&e),
    };

    let generated_at = chrono::Utc::now();
    let brief_text = report.brief.as_ref().map(|b| b.text());
    let rendered = match settings.format {
        OutputFormat::Text => {
            let mut out = String::new();
            if settings.show_brief {
                if let Some(brief) = brief_text {
                    out.push_str("MARKETING BRIEF\n===============\n");
                    out.push_str(brief.trim());
                    out.push_str("\n\n");
                }
            }
            out.push_str(&text::render(&report.document));
            out
        }
        OutputFormat::Html => html::render_page(
            &report.document,
            &html::PageContext {
                theme,
                url: Some(report.request.url()),
                brief: brief_text.filter(|_| settings.show_brief),
                error: report.error.as_deref(),
                generated_at,
            },
        )?,
        OutputFormat::Json => export::to_json(&report, generated_at)?,
    };
    write_output(settings.output.as_deref(), rendered.as_bytes()).await?;

    if let Some(csv_path) = &settings.csv {
        if report.bundle.is_empty() {
            tracing::warn!("No structured assets to export; skipping CSV");
        } else {
            write_output(Some(csv_path.as_path()), &export::to_csv(&report.bundle)?).await?;
        }
    }

    if let Some(error) = &report.error {
        eprintln!("❌ {}", error);
    }

    match report.status {
        RunStatus::Completed => {
            tracing::info!("✅ Ad assets generated");
            Ok(())
        }
        status => {
            tracing::warn!("Run ended with status {:?}", status);
            std::process::exit(2);
        }
    }
}
