pub mod assistant;
pub mod conversation;
pub mod directory;
pub mod extraction;
pub mod guard;
pub mod knowledge;
pub mod resolver;
pub mod responder;
pub mod session;

pub use assistant::MedicalAssistant;
pub use conversation::{ConversationStore, PendingReply, TurnController};
pub use directory::{
    BackendDirectorySource, DirectorySource, DoctorDirectoryCache, StaticDirectorySource,
};
pub use knowledge::KnowledgeBase;
pub use resolver::{IntentResolver, DEFAULT_SPECIALTIES};
pub use responder::ResponseGenerator;
pub use session::SessionRegistry;
