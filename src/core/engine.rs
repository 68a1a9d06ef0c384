use crate::core::input;
use crate::core::parser::parse_ad_copy;
use crate::core::requester::{self, AdCopyOutcome, BriefOutcome, EMPTY_AD_COPY_MESSAGE};
use crate::domain::model::{AdAssetBundle, FormInput, GenerationRequest, MarketingBrief};
use crate::domain::ports::GenerativeModel;
use crate::render::{self, Document};
use crate::utils::error::{AdGenError, Result};
use crate::utils::monitor::StageMonitor;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    /// The brief came back empty or blocked; no ad-copy call was made.
    BriefRejected,
    EmptyAdCopy,
    /// A transport or service error ended the run.
    Failed,
}

/// Terminal state of one submission: what the results and error regions show.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub request: GenerationRequest,
    pub status: RunStatus,
    pub document: Document,
    pub error: Option<String>,
    pub brief: Option<MarketingBrief>,
    pub raw_ad_copy: Option<String>,
    pub bundle: AdAssetBundle,
}

impl RunReport {
    fn new(request: GenerationRequest) -> Self {
        Self {
            request,
            status: RunStatus::Failed,
            document: Document::initial(),
            error: None,
            brief: None,
            raw_ad_copy: None,
            bundle: AdAssetBundle::default(),
        }
    }

    fn fail(&mut self, error: &AdGenError) {
        self.status = RunStatus::Failed;
        self.document = Document::initial();
        self.error = Some(error.user_friendly_message());
    }
}

/// Marks the engine busy; dropping it re-enables submissions on every path.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AdGenError::Busy)?;
        Ok(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Drives one submission through both model calls, one at a time.
pub struct GenerationEngine<M: GenerativeModel> {
    model: M,
    model_name: String,
    in_flight: AtomicBool,
    monitor: StageMonitor,
}

impl<M: GenerativeModel> GenerationEngine<M> {
    pub fn new(model: M, model_name: impl Into<String>) -> Self {
        Self::new_with_monitoring(model, model_name, false)
    }

    pub fn new_with_monitoring(model: M, model_name: impl Into<String>, monitor: bool) -> Self {
        Self {
            model,
            model_name: model_name.into(),
            in_flight: AtomicBool::new(false),
            monitor: StageMonitor::new(monitor),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validates the form and runs the pipeline.
    ///
    /// Returns `Err` only when nothing was sent: the engine is busy or the
    /// input is invalid. Every failure after that is reported inside the
    /// `RunReport`.
    pub async fn submit(&self, form: &FormInput) -> Result<RunReport> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;
        let request = input::collect(form)?;
        self.monitor.reset();

        tracing::info!(
            "Generating ad assets for {} ({} focus services, website only: {})",
            request.url(),
            request.focus_services().len(),
            request.use_website_only()
        );

        let mut report = RunReport::new(request);
        if let Err(e) = self.run_stages(&mut report).await {
            tracing::error!("Generation failed: {}", e);
            report.fail(&e);
        }
        self.monitor.log_total();
        Ok(report)
    }

    async fn run_stages(&self, report: &mut RunReport) -> Result<()> {
        tracing::info!("Step 1 of 2: generating marketing brief");
        let brief = match requester::request_brief(&self.model, &self.model_name, &report.request)
            .await?
        {
            BriefOutcome::Ready(brief) => brief,
            BriefOutcome::Rejected { diagnostic } => {
                report.status = RunStatus::BriefRejected;
                report.document = Document::initial();
                report.error = Some(diagnostic);
                return Ok(());
            }
        };
        self.monitor.mark("Marketing brief");
        report.brief = Some(brief.clone());

        tracing::info!("Step 2 of 2: generating ad assets");
        let outcome = requester::request_ad_copy(&self.model, &self.model_name, &brief).await?;
        self.monitor.mark("Ad copy");

        match outcome {
            AdCopyOutcome::Empty => {
                report.status = RunStatus::EmptyAdCopy;
                report.document = Document::placeholder(EMPTY_AD_COPY_MESSAGE);
                report.error = Some(EMPTY_AD_COPY_MESSAGE.to_string());
            }
            AdCopyOutcome::Ready(text) => {
                let parsed = parse_ad_copy(&text);
                report.document = render::from_parsed(&parsed, &text);
                report.bundle = parsed.bundle();
                report.raw_ad_copy = Some(text);
                report.status = RunStatus::Completed;
                tracing::info!(
                    "Parsed {} variation(s), {} sitelink(s), {} snippet group(s), {} callout(s)",
                    report.bundle.variations.len(),
                    report.bundle.sitelinks.len(),
                    report.bundle.structured_snippets.len(),
                    report.bundle.callouts.len()
                );
            }
        }

        Ok(())
    }
}
