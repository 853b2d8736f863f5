use std::sync::Arc;

use crate::models::Intent;
use crate::services::directory::DoctorDirectoryCache;
use crate::services::knowledge::KnowledgeBase;
use crate::services::resolver::IntentResolver;
use crate::services::responder::ResponseGenerator;

/// Resolver and renderer wired to the shared directory cache and knowledge base.
pub struct MedicalAssistant {
    directory: Arc<DoctorDirectoryCache>,
    knowledge: Arc<KnowledgeBase>,
    resolver: IntentResolver,
    responder: ResponseGenerator,
}

impl MedicalAssistant {
    pub fn new(
        directory: Arc<DoctorDirectoryCache>,
        knowledge: Arc<KnowledgeBase>,
        resolver: IntentResolver,
    ) -> Self {
        Self {
            directory,
            knowledge,
            resolver,
            responder: ResponseGenerator::new(),
        }
    }

    pub fn directory(&self) -> &Arc<DoctorDirectoryCache> {
        &self.directory
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn classify(&self, text: &str) -> Intent {
        let doctors = self.directory.all();
        self.resolver.classify(text, &doctors, &self.knowledge)
    }

    /// Classify against the current directory snapshot and render the reply.
    pub fn answer(&self, text: &str) -> (Intent, String) {
        let intent = self.classify(text);
        let reply = self.responder.render(&intent);
        (intent, reply)
    }
}
