use outreach_common::OutreachError;
use outreach_llm::{compose_email_prompt, compose_shorten_prompt, EmailFields, TextGenerator};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

use crate::types::OutreachForm;

/// Pipeline states for one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Idle,
    Shortening,
    Composing,
    Done,
}

/// Kind of failure shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftErrorKind {
    /// Generation is not configured; no remote call was made
    Configuration,
    /// A remote call (or prompt composition) failed
    Service,
}

/// User-visible failure of a submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftError {
    pub kind: DraftErrorKind,

    /// Stage that failed (none for configuration errors)
    pub stage: Option<Stage>,

    pub message: String,
}

impl DraftError {
    fn configuration(message: impl Into<String>) -> Self {
        Self {
            kind: DraftErrorKind::Configuration,
            stage: None,
            message: message.into(),
        }
    }

    fn service(stage: Stage, err: &OutreachError) -> Self {
        let action = match stage {
            Stage::Shortening => "shorten the description",
            _ => "generate the email",
        };
        Self {
            kind: DraftErrorKind::Service,
            stage: Some(stage),
            message: format!("Could not {}: {}", action, err),
        }
    }

    /// HTTP status for the JSON API
    pub fn status_code(&self) -> u16 {
        match self.kind {
            DraftErrorKind::Configuration => 503,
            DraftErrorKind::Service => 502,
        }
    }
}

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftOutcome {
    pub draft_id: Uuid,

    /// Final state: `Done` on success, `Idle` after a failure
    pub stage: Stage,

    /// Output of the shortening stage
    pub shortened: Option<String>,

    /// Generated email
    pub email: Option<String>,

    pub error: Option<DraftError>,
}

impl DraftOutcome {
    fn new(draft_id: Uuid) -> Self {
        Self {
            draft_id,
            stage: Stage::Idle,
            shortened: None,
            email: None,
            error: None,
        }
    }

    fn fail(mut self, error: DraftError) -> Self {
        self.stage = Stage::Idle;
        self.error = Some(error);
        self
    }

    pub fn is_success(&self) -> bool {
        self.stage == Stage::Done && self.error.is_none()
    }
}

/// Two-stage draft pipeline: shorten the description, then generate the email
pub struct DraftWorkflow {
    generator: Option<Arc<dyn TextGenerator>>,
    temperature: f32,
}

impl DraftWorkflow {
    /// Create new workflow (`None` disables generation)
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, temperature: f32) -> Self {
        Self {
            generator,
            temperature,
        }
    }

    pub fn generation_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Model name of the configured generator
    pub fn model(&self) -> Option<&str> {
        self.generator.as_deref().map(|g| g.model())
    }

    /// Run one submission to completion
    pub async fn run(&self, form: &OutreachForm) -> DraftOutcome {
        let draft_id = Uuid::new_v4();
        let span = info_span!("draft", %draft_id, category = form.category.as_str());
        self.execute(draft_id, form).instrument(span).await
    }

    async fn execute(&self, draft_id: Uuid, form: &OutreachForm) -> DraftOutcome {
        let outcome = DraftOutcome::new(draft_id);

        let Some(generator) = self.generator.as_deref() else {
            info!("Submission rejected: generation is not configured");
            return outcome.fail(DraftError::configuration(
                "Email generation is unavailable: OPENAI_API_KEY is not set. \
                 Set it in the environment and restart the server.",
            ));
        };

        // Stage 1: shorten the raw description
        debug!("Stage: {:?}", Stage::Shortening);
        let shortened = match self
            .generate_stage(generator, Stage::Shortening, compose_shorten_prompt(&form.description))
            .await
        {
            Ok(text) => text,
            Err(err) => return outcome.fail(err),
        };
        info!("Description shortened - Length: {} chars", shortened.len());

        // Stage 2: compose the category template and generate the email
        debug!("Stage: {:?}", Stage::Composing);
        let fields = EmailFields {
            job: &shortened,
            pain: &form.key_message,
            name: &form.contact_name,
            job_title: &form.contact_title,
        };
        let prompt = compose_email_prompt(form.category, &fields, form.include_style_sample);

        let mut outcome = outcome;
        outcome.shortened = Some(shortened);

        match self.generate_stage(generator, Stage::Composing, prompt).await {
            Ok(email) => {
                info!("Email generated - Length: {} chars", email.len());
                outcome.email = Some(email);
                outcome.stage = Stage::Done;
                outcome
            }
            Err(err) => outcome.fail(err),
        }
    }

    async fn generate_stage<E>(
        &self,
        generator: &dyn TextGenerator,
        stage: Stage,
        prompt: Result<String, E>,
    ) -> Result<String, DraftError>
    where
        E: Into<OutreachError>,
    {
        let result = match prompt {
            Ok(prompt) => {
                debug!("{:?} prompt composed - Length: {} chars", stage, prompt.len());
                generator.generate(&prompt, self.temperature).await
            }
            Err(err) => Err(err.into()),
        };

        result.map_err(|err| {
            error!("{:?} stage failed: {}", stage, err);
            DraftError::service(stage, &err)
        })
    }
}
