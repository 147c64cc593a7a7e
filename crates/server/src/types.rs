use chrono::{DateTime, Utc};
use outreach_llm::Category;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::workflow::{DraftError, DraftOutcome};

/// Current state of the opportunity form
///
/// Every field may be empty; no validation is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutreachForm {
    /// Kind of opportunity
    pub category: Category,

    /// Core description of the opportunity
    pub description: String,

    /// What the email should focus on
    pub key_message: String,

    /// Contact name
    pub contact_name: String,

    /// Contact title (the hiring manager, not the role being hired)
    pub contact_title: String,

    /// Append a starter email as a style reference
    #[serde(deserialize_with = "deserialize_checkbox")]
    pub include_style_sample: bool,
}

/// Accept JSON booleans as well as HTML checkbox values ("on")
fn deserialize_checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Text(text) => matches!(
            text.trim().to_lowercase().as_str(),
            "on" | "true" | "1" | "yes"
        ),
    })
}

/// Response for `POST /api/draft`
#[derive(Debug, Serialize)]
pub struct DraftResponse {
    /// Draft identifier (also used in logs)
    pub draft_id: Uuid,

    /// Opportunity category
    pub category: Category,

    /// Shortened description, when the first stage succeeded
    pub shortened: Option<String>,

    /// Generated email, when both stages succeeded
    pub email: Option<String>,

    /// Failure, if any
    pub error: Option<DraftError>,

    /// Completion timestamp
    pub created_at: DateTime<Utc>,
}

impl DraftResponse {
    pub fn from_outcome(category: Category, outcome: DraftOutcome) -> Self {
        Self {
            draft_id: outcome.draft_id,
            category,
            shortened: outcome.shortened,
            email: outcome.email,
            error: outcome.error,
            created_at: Utc::now(),
        }
    }
}

/// Response for `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub generation_enabled: bool,
    pub model: Option<String>,
}
