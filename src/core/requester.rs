use crate::core::{ad_copy_prompt, brief_prompt};
use crate::domain::generation::{ModelRequest, ModelResponse};
use crate::domain::model::{GenerationRequest, MarketingBrief};
use crate::domain::ports::GenerativeModel;
use crate::utils::error::Result;

pub const EMPTY_BRIEF_MESSAGE: &str =
    "The model returned an empty response for the marketing brief. Please try again or use a different URL.";
pub const EMPTY_AD_COPY_MESSAGE: &str = "The model returned an empty response for ad copies.";

#[derive(Debug, Clone, PartialEq)]
pub enum BriefOutcome {
    Ready(MarketingBrief),
    /// Empty or blocked; the second call must not be made.
    Rejected { diagnostic: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdCopyOutcome {
    Ready(String),
    Empty,
}

/// Explains an empty brief response, most specific cause first.
pub fn brief_diagnostic(response: &ModelResponse) -> String {
    if let Some(reason) = response.block_reason() {
        let ratings = response
            .safety_ratings()
            .iter()
            .map(|r| format!("{}: {}", r.category, r.probability))
            .collect::<Vec<_>>();
        return if ratings.is_empty() {
            format!("Marketing brief generation was blocked. Reason: {}.", reason)
        } else {
            format!(
                "Marketing brief generation was blocked. Reason: {}. Safety ratings: {}.",
                reason,
                ratings.join(", ")
            )
        };
    }

    if let Some(reason) = response.abnormal_finish_reason() {
        return format!(
            "Marketing brief generation stopped before producing any text. Finish reason: {}.",
            reason
        );
    }

    EMPTY_BRIEF_MESSAGE.to_string()
}

/// First call. Web search is offered to the model unless the user asked for
/// website content only.
pub async fn request_brief<M: GenerativeModel + ?Sized>(
    model: &M,
    model_name: &str,
    request: &GenerationRequest,
) -> Result<BriefOutcome> {
    let prompt = brief_prompt::build(request);
    tracing::debug!("Marketing brief prompt: {} chars", prompt.len());

    let response = model
        .generate(&ModelRequest {
            model: model_name.to_string(),
            prompt,
            use_search_tool: !request.use_website_only(),
        })
        .await?;

    let text = response.text();
    if text.trim().is_empty() {
        let diagnostic = brief_diagnostic(&response);
        tracing::warn!("Marketing brief rejected: {}", diagnostic);
        return Ok(BriefOutcome::Rejected { diagnostic });
    }

    tracing::info!("Marketing brief received ({} chars)", text.len());
    Ok(BriefOutcome::Ready(MarketingBrief::new(text)))
}

/// Second call, never with tools.
pub async fn request_ad_copy<M: GenerativeModel + ?Sized>(
    model: &M,
    model_name: &str,
    brief: &MarketingBrief,
) -> Result<AdCopyOutcome> {
    let prompt = ad_copy_prompt::build(brief);
    tracing::debug!("Ad copy prompt: {} chars", prompt.len());

    let response = model
        .generate(&ModelRequest {
            model: model_name.to_string(),
            prompt,
            use_search_tool: false,
        })
        .await?;

    let text = response.text();
    if text.trim().is_empty() {
        tracing::warn!("Ad copy response was empty");
        return Ok(AdCopyOutcome::Empty);
    }

    tracing::info!("Ad copy received ({} chars)", text.len());
    Ok(AdCopyOutcome::Ready(text))
}
