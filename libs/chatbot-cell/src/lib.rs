// =====================================================================================
// CHATBOT CELL - MEDICAL ASSISTANT
// =====================================================================================
//
// Rule-based medical assistant for the hospital booking client:
// - Knowledge base of conditions, symptom keywords and advice
// - Session-scoped snapshot of the backend doctor directory
// - Intent resolution (doctor name, specialty, condition, fallback)
// - Reply rendering and the per-session conversation transcript
//
// =====================================================================================

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod state;

pub use error::ChatbotError;
pub use models::*;
pub use router::chatbot_routes;
pub use services::{
    BackendDirectorySource, DirectorySource, DoctorDirectoryCache, IntentResolver,
    KnowledgeBase, MedicalAssistant, ResponseGenerator, SessionRegistry,
    StaticDirectorySource, TurnController,
};
pub use state::ChatbotState;
