use crate::domain::generation::{ModelRequest, ModelResponse};
use crate::domain::ports::GenerativeModel;
use crate::utils::error::{AdGenError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Serialize)]
struct GenerateContentBody<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// `generateContent` over HTTPS. One request per call; no retries.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_base: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }

    fn body<'a>(request: &'a ModelRequest) -> GenerateContentBody<'a> {
        let tools = if request.use_search_tool {
            vec![Tool {
                google_search: serde_json::Map::new(),
            }]
        } else {
            Vec::new()
        };

        GenerateContentBody {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart {
                    text: &request.prompt,
                }],
            }],
            tools,
        }
    }
}

/// Pulls `error.message` out of an error body, falling back to the raw text.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: &ModelRequest) -> Result<ModelResponse> {
        let endpoint = self.endpoint(&request.model);
        tracing::debug!(
            "POST {} (prompt: {} chars, search tool: {})",
            endpoint,
            request.prompt.len(),
            request.use_search_tool
        );

        let response = self
            .client
            .post(&endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::body(request))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Model response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdGenError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        Ok(response.json::<ModelResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_includes_search_tool_only_when_requested() {
        let with_search = ModelRequest {
            model: DEFAULT_MODEL.to_string(),
            prompt: "brief".to_string(),
            use_search_tool: true,
        };
        let json = serde_json::to_value(GeminiClient::body(&with_search)).unwrap();
        assert_eq!(json["tools"], serde_json::json!([{"googleSearch": {}}]));
        assert_eq!(json["contents"][0]["parts"][0]["text"], "brief");
        assert_eq!(json["contents"][0]["role"], "user");

        let plain = ModelRequest {
            use_search_tool: false,
            ..with_search
        };
        let json = serde_json::to_value(GeminiClient::body(&plain)).unwrap();
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = GeminiClient::new("http://localhost:9000/v1beta/", "key");
        assert_eq!(
            client.endpoint("gemini-2.5-flash"),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_error_message_extraction() {
        let status = reqwest::StatusCode::BAD_REQUEST;
        assert_eq!(
            error_message(
                status,
                r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#
            ),
            "API key not valid."
        );
        assert_eq!(error_message(status, "plain failure"), "plain failure");
        assert_eq!(error_message(status, ""), "Bad Request");
    }
}
