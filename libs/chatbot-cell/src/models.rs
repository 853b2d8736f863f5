use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use shared_models::{DoctorId, DoctorRecord};

// ==============================================================================
// KNOWLEDGE BASE
// ==============================================================================

/// One condition in the medical knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub condition: String,
    /// Matched as lowercase substrings of the user's message, in order.
    pub symptoms: Vec<String>,
    pub advice: String,
    /// Recommended specialty, e.g. "Neurology or General Medicine".
    pub specialist: String,
}

impl KnowledgeEntry {
    pub fn new(condition: &str, symptoms: &[&str], advice: &str, specialist: &str) -> Self {
        Self {
            condition: condition.to_string(),
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            advice: advice.to_string(),
            specialist: specialist.to_string(),
        }
    }

    /// `lowered` must already be lowercase.
    pub fn matches(&self, lowered: &str) -> bool {
        lowered.contains(&self.condition.to_lowercase())
            || self
                .symptoms
                .iter()
                .any(|symptom| lowered.contains(&symptom.to_lowercase()))
    }
}

// ==============================================================================
// INTENTS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    DoctorSearch {
        search_term: String,
        matches: Vec<DoctorRecord>,
    },
    DoctorNotFound {
        search_term: String,
    },
    SpecialtySearch {
        specialty: String,
        matches: Vec<DoctorRecord>,
    },
    MedicalAdvice {
        condition: String,
        entry: KnowledgeEntry,
    },
    General {
        topic: GeneralTopic,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "doctors", rename_all = "snake_case")]
pub enum GeneralTopic {
    Help,
    AllDoctors(Vec<DoctorRecord>),
}

impl Intent {
    pub fn kind(&self) -> &'static str {
        match self {
            Intent::DoctorSearch { .. } => "doctor_search",
            Intent::DoctorNotFound { .. } => "doctor_not_found",
            Intent::SpecialtySearch { .. } => "specialty_search",
            Intent::MedicalAdvice { .. } => "medical_advice",
            Intent::General { .. } => "general",
        }
    }

    pub fn is_all_doctors(&self) -> bool {
        matches!(
            self,
            Intent::General {
                topic: GeneralTopic::AllDoctors(_)
            }
        )
    }
}

// ==============================================================================
// CONVERSATION
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub speaker: Speaker,
    /// May contain `\n`; each line is one displayed paragraph.
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationEntry {
    pub fn user(message: &str) -> Self {
        Self::new(Speaker::User, message)
    }

    pub fn bot(message: &str) -> Self {
        Self::new(Speaker::Bot, message)
    }

    fn new(speaker: Speaker, message: &str) -> Self {
        Self {
            speaker,
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.message.split('\n')
    }

    /// Timestamp as shown next to a chat bubble, e.g. "09:41".
    pub fn display_time(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// Where the current turn of a conversation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    AwaitingInput,
    ComposingResponse,
}

// ==============================================================================
// DIRECTORY REFRESH
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// Cache replaced with this many records.
    Refreshed(usize),
    /// Fetch failed; the previous snapshot was kept.
    Unavailable,
    /// Another refresh was already running; nothing was requested.
    InFlight,
}

impl RefreshOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            RefreshOutcome::Refreshed(_) => "refreshed",
            RefreshOutcome::Unavailable => "unavailable",
            RefreshOutcome::InFlight => "in_flight",
        }
    }
}

// ==============================================================================
// HTTP PAYLOADS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReplyResponse {
    pub intent: Intent,
    pub reply: ConversationEntry,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptView {
    pub session_id: Uuid,
    pub state: TurnState,
    pub composing: bool,
    pub messages: Vec<ConversationEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectoryRefreshResponse {
    pub outcome: &'static str,
    pub total: usize,
}
