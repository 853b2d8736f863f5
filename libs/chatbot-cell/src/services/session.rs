use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ChatbotError;
use crate::services::assistant::MedicalAssistant;
use crate::models::TurnState;
use crate::services::conversation::TurnController;

const MAX_SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// Open chat sessions, one per chat widget.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<TurnController>>>,
    assistant: Arc<MedicalAssistant>,
    reply_delay: Duration,
}

impl SessionRegistry {
    pub fn new(assistant: Arc<MedicalAssistant>, reply_delay: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            assistant,
            reply_delay,
        }
    }

    /// Start a session whose transcript opens with the greeting.
    pub async fn open(&self) -> Arc<TurnController> {
        let session = Arc::new(TurnController::new(
            Arc::clone(&self.assistant),
            self.reply_delay,
        ));
        session.greet();

        self.sessions
            .write()
            .await
            .insert(session.id(), Arc::clone(&session));

        info!("Opened chat session {}", session.id());
        session
    }

    /// Look up a session and mark it active.
    pub async fn get(&self, session_id: Uuid) -> Result<Arc<TurnController>, ChatbotError> {
        let session = self
            .sessions
            .read()
            .await
            .get(&session_id)
            .cloned()
            .ok_or(ChatbotError::SessionNotFound(session_id))?;
        session.touch();
        Ok(session)
    }

    pub async fn close(&self, session_id: Uuid) -> Result<(), ChatbotError> {
        self.sessions
            .write()
            .await
            .remove(&session_id)
            .map(|_| info!("Closed chat session {}", session_id))
            .ok_or(ChatbotError::SessionNotFound(session_id))
    }

    /// Drop sessions idle for at least `max_idle`. Sessions with a reply
    /// still composing are kept. Returns how many were removed.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|id, session| {
            let keep = session.state() == TurnState::ComposingResponse
                || session.idle_for() < max_idle;
            if !keep {
                debug!("Evicting idle chat session {}", id);
            }
            keep
        });

        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {} idle chat sessions", evicted);
        }
        evicted
    }

    /// Periodically evict sessions idle for longer than `max_idle`.
    pub fn spawn_eviction(self: &Arc<Self>, max_idle: Duration) -> JoinHandle<()> {
        let registry = Arc::clone(self);
        let period = max_idle.clamp(Duration::from_secs(1), MAX_SWEEP_PERIOD);
        info!("Expiring chat sessions idle for {:?}", max_idle);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                registry.evict_idle(max_idle).await;
            }
        })
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
