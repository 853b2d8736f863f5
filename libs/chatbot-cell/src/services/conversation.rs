use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::ChatbotError;
use crate::models::{ChatReplyResponse, ConversationEntry, Intent, TranscriptView, TurnState};
use crate::services::assistant::MedicalAssistant;
use crate::services::guard::InFlightGuard;
use crate::services::responder::GREETING;

/// Append-only transcript. Insertion order is display order.
#[derive(Debug, Default)]
pub struct ConversationStore {
    entries: Mutex<Vec<ConversationEntry>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, entry: ConversationEntry) -> usize {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.push(entry);
        entries.len()
    }

    pub fn snapshot(&self) -> Vec<ConversationEntry> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Drives one conversation: awaiting-input -> composing-response -> awaiting-input.
///
/// At most one bot reply is composed at a time; a submission made while a
/// reply is pending is rejected with [`ChatbotError::ReplyInProgress`].
pub struct TurnController {
    id: Uuid,
    store: Arc<ConversationStore>,
    composing: Arc<AtomicBool>,
    assistant: Arc<MedicalAssistant>,
    reply_delay: Duration,
    last_active: Mutex<Instant>,
}

impl std::fmt::Debug for TurnController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnController")
            .field("id", &self.id)
            .field("store", &self.store)
            .field("composing", &self.composing)
            .field("reply_delay", &self.reply_delay)
            .finish_non_exhaustive()
    }
}

impl TurnController {
    pub fn new(assistant: Arc<MedicalAssistant>, reply_delay: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            store: Arc::new(ConversationStore::new()),
            composing: Arc::new(AtomicBool::new(false)),
            assistant,
            reply_delay,
            last_active: Mutex::new(Instant::now()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub(crate) fn touch(&self) {
        *self.last_active.lock().unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    /// Time since the session was last viewed or sent a message.
    pub fn idle_for(&self) -> Duration {
        self.last_active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .elapsed()
    }

    /// Append the assistant's welcome message.
    pub fn greet(&self) {
        self.store.append(ConversationEntry::bot(GREETING));
    }

    pub fn state(&self) -> TurnState {
        if self.composing.load(Ordering::Acquire) {
            TurnState::ComposingResponse
        } else {
            TurnState::AwaitingInput
        }
    }

    pub fn transcript(&self) -> Vec<ConversationEntry> {
        self.store.snapshot()
    }

    pub fn view(&self) -> TranscriptView {
        let state = self.state();
        TranscriptView {
            session_id: self.id,
            state,
            composing: state == TurnState::ComposingResponse,
            messages: self.transcript(),
        }
    }

    /// Record the user's message and compose the reply without delivering it.
    ///
    /// The conversation stays in composing-response until the returned
    /// [`PendingReply`] is delivered or dropped. Dropping it appends the bot
    /// entry without waiting out the delay.
    pub fn begin_turn(&self, text: &str) -> Result<PendingReply, ChatbotError> {
        if text.trim().is_empty() {
            return Err(ChatbotError::EmptyMessage);
        }

        let guard =
            InFlightGuard::try_acquire(&self.composing).ok_or(ChatbotError::ReplyInProgress)?;
        self.touch();

        self.store.append(ConversationEntry::user(text));
        let (intent, reply) = self.assistant.answer(text);
        debug!("Session {} composing {} reply", self.id, intent.kind());

        Ok(PendingReply {
            intent,
            reply,
            delay: self.reply_delay,
            store: Arc::clone(&self.store),
            delivered: false,
            _guard: guard,
        })
    }

    /// Run a full turn and wait for the bot's reply.
    ///
    /// Delivery runs on its own task, so the reply is still appended if the
    /// caller stops waiting.
    #[instrument(skip(self, text), fields(session_id = %self.id))]
    pub async fn submit(&self, text: &str) -> Result<ChatReplyResponse, ChatbotError> {
        let pending = self.begin_turn(text)?;

        tokio::spawn(pending.deliver())
            .await
            .map_err(|e| ChatbotError::Internal(format!("reply task failed: {}", e)))
    }
}

/// A composed reply waiting out the typing delay.
///
/// Its bot entry is appended exactly once, by [`PendingReply::deliver`] or on
/// drop, before the composing flag is released.
#[derive(Debug)]
pub struct PendingReply {
    intent: Intent,
    reply: String,
    delay: Duration,
    store: Arc<ConversationStore>,
    delivered: bool,
    // Dropped after `Drop::drop` runs, so input reopens only once the bot entry is in.
    _guard: InFlightGuard,
}

impl PendingReply {
    pub fn intent(&self) -> &Intent {
        &self.intent
    }

    pub fn text(&self) -> &str {
        &self.reply
    }

    /// Wait out the delay, append the bot entry and reopen the conversation.
    pub async fn deliver(mut self) -> ChatReplyResponse {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        ChatReplyResponse {
            intent: self.intent.clone(),
            reply: self.append_reply(),
        }
    }

    fn append_reply(&mut self) -> ConversationEntry {
        let entry = ConversationEntry::bot(&self.reply);
        self.store.append(entry.clone());
        self.delivered = true;
        entry
    }
}

impl Drop for PendingReply {
    fn drop(&mut self) {
        if !self.delivered {
            debug!("Pending reply dropped before delivery, appending it now");
            self.append_reply();
        }
    }
}
