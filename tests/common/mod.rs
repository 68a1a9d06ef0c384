#![allow(dead_code)]

use ads_asset_gen::domain::generation::{ModelRequest, ModelResponse};
use ads_asset_gen::domain::ports::GenerativeModel;
use ads_asset_gen::{AdGenError, FormInput, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const BRIEF_TEXT: &str = "Business Name:\nAcme Plumbing\n\nSpecific Services/Product Lines to Feature:\nService/Product 1: Drain Cleaning: fast drain service\nService/Product 2: Water Heaters: installs and repairs\n";

pub const AD_COPY_TEXT: &str = "AD COPY VARIATION 1 (Service Focus: Drain Cleaning)\nHeadlines:\n- Fast Drain Cleaning\n- Clogs Cleared Today\nDescriptions:\n- Same-day drain cleaning from licensed plumbers.\n\nAD COPY VARIATION 2 (Service Focus: Water Heaters)\nHeadlines:\n- New Water Heater Today\nDescriptions:\n- Tankless and tank installs with upfront pricing.\n- Repairs on all major brands.\n\nSITELINKS:\n- Sitelink Text: Book a Plumber\n  Description Line 1: Same-day appointments\n  Description Line 2: Licensed and insured\n\nSTRUCTURED SNIPPETS:\nHeader: Services\n- Drain Cleaning\n- Water Heaters\nHeader: Brands\n- Rheem\n- Bradford White\n\nCALLOUTS:\n- Upfront Pricing\n- 24/7 Service\n";

/// What the scripted model answers for one call.
pub enum Reply {
    Response(ModelResponse),
    ApiError(u16, &'static str),
}

/// In-process model that replays canned replies and records every request.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Reply>>,
    requests: Arc<Mutex<Vec<ModelRequest>>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Reply>) -> (Self, Arc<Mutex<Vec<ModelRequest>>>) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                replies: Mutex::new(replies.into()),
                requests: requests.clone(),
                gate: None,
            },
            requests,
        )
    }

    /// The first call waits until the gate is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(&self, request: &ModelRequest) -> Result<ModelResponse> {
        let call_index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };

        if call_index == 0 {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
        }

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::ApiError(status, message)) => Err(AdGenError::Api {
                status,
                message: message.to_string(),
            }),
            None => panic!("unexpected model call #{}", call_index + 1),
        }
    }
}

pub fn form(url: &str, services: &str, website_only: bool) -> FormInput {
    FormInput {
        url: url.to_string(),
        focus_services: services.to_string(),
        website_only,
    }
}
