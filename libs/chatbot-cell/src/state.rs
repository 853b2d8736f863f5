use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use shared_config::AppConfig;

use crate::error::ChatbotError;
use crate::services::{
    BackendDirectorySource, DoctorDirectoryCache, IntentResolver, KnowledgeBase,
    MedicalAssistant, SessionRegistry,
};

/// Everything the chatbot routes share.
pub struct ChatbotState {
    pub directory: Arc<DoctorDirectoryCache>,
    pub assistant: Arc<MedicalAssistant>,
    pub sessions: Arc<SessionRegistry>,
}

impl ChatbotState {
    pub fn new(
        directory: Arc<DoctorDirectoryCache>,
        knowledge: KnowledgeBase,
        resolver: IntentResolver,
        reply_delay: Duration,
    ) -> Self {
        let assistant = Arc::new(MedicalAssistant::new(
            Arc::clone(&directory),
            Arc::new(knowledge),
            resolver,
        ));

        Self {
            sessions: Arc::new(SessionRegistry::new(Arc::clone(&assistant), reply_delay)),
            directory,
            assistant,
        }
    }

    /// Backend-backed directory and the configured (or built-in) knowledge base.
    pub fn from_config(config: &AppConfig) -> Result<Self, ChatbotError> {
        let knowledge = match &config.knowledge_base_path {
            Some(path) => KnowledgeBase::from_json_file(path)?,
            None => KnowledgeBase::default(),
        };
        info!("Medical knowledge base has {} conditions", knowledge.len());

        let directory = Arc::new(DoctorDirectoryCache::new(Arc::new(
            BackendDirectorySource::new(config),
        )));

        Ok(Self::new(
            directory,
            knowledge,
            IntentResolver::default(),
            config.reply_delay(),
        ))
    }

    /// Fetch the directory now; with polling configured, keep refreshing.
    /// Also starts idle-session expiry when enabled. Returns the long-running tasks.
    pub fn start_background_tasks(&self, config: &AppConfig) -> Vec<JoinHandle<()>> {
        let mut tasks = Vec::new();

        match config.directory_refresh_interval() {
            Some(interval) => tasks.push(self.directory.spawn_polling(interval)),
            None => {
                self.directory.spawn_refresh();
            }
        }

        if let Some(max_idle) = config.session_idle_timeout() {
            tasks.push(self.sessions.spawn_eviction(max_idle));
        }

        tasks
    }
}
