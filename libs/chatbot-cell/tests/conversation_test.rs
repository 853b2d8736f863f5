use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;

use chatbot_cell::models::{Intent, Speaker, TurnState};
use chatbot_cell::services::responder::GREETING;
use chatbot_cell::{
    ChatbotError, DoctorDirectoryCache, IntentResolver, KnowledgeBase, MedicalAssistant,
    SessionRegistry, TurnController,
};
use shared_utils::test_utils::TestDoctors;

fn assistant() -> Arc<MedicalAssistant> {
    Arc::new(MedicalAssistant::new(
        Arc::new(DoctorDirectoryCache::with_doctors(TestDoctors::directory())),
        Arc::new(KnowledgeBase::default()),
        IntentResolver::default(),
    ))
}

fn controller(delay: Duration) -> TurnController {
    TurnController::new(assistant(), delay)
}

#[tokio::test]
async fn test_transcript_alternates_user_and_bot() {
    let turns = controller(Duration::ZERO);
    let messages = ["find Dr. Lee", "I have chills", "show all doctors", "thanks"];

    for message in messages {
        turns.submit(message).await.unwrap();
    }

    let transcript = turns.transcript();
    assert_eq!(transcript.len(), 2 * messages.len());

    for (i, pair) in transcript.chunks(2).enumerate() {
        assert_eq!(pair[0].speaker, Speaker::User);
        assert_eq!(pair[0].message, messages[i]);
        assert_eq!(pair[1].speaker, Speaker::Bot);
    }

    assert!(transcript
        .windows(2)
        .all(|w| w[0].timestamp <= w[1].timestamp));
}

#[tokio::test]
async fn test_submit_returns_intent_and_reply() {
    let turns = controller(Duration::ZERO);
    let reply = turns.submit("find Dr. Lee").await.unwrap();

    assert_matches!(reply.intent, Intent::DoctorSearch { .. });
    assert_eq!(reply.reply.speaker, Speaker::Bot);
    assert!(reply.reply.message.contains("Dr. John Lee - Cardiology"));
    assert_eq!(turns.transcript().last(), Some(&reply.reply));
}

#[tokio::test]
async fn test_blank_input_is_rejected_without_touching_transcript() {
    let turns = controller(Duration::ZERO);

    assert_matches!(turns.submit("").await, Err(ChatbotError::EmptyMessage));
    assert_matches!(turns.submit("  \n\t ").await, Err(ChatbotError::EmptyMessage));
    assert!(turns.transcript().is_empty());
    assert_eq!(turns.state(), TurnState::AwaitingInput);
}

#[tokio::test]
async fn test_only_one_reply_composed_at_a_time() {
    let turns = controller(Duration::ZERO);

    let pending = turns.begin_turn("I have a cough").unwrap();
    assert_eq!(turns.state(), TurnState::ComposingResponse);
    assert!(turns.view().composing);

    assert_matches!(
        turns.begin_turn("another question"),
        Err(ChatbotError::ReplyInProgress)
    );
    assert_matches!(turns.submit("and another").await, Err(ChatbotError::ReplyInProgress));
    assert_eq!(turns.transcript().len(), 1);

    let delivered = pending.deliver().await;
    assert_matches!(delivered.intent, Intent::MedicalAdvice { .. });
    assert_eq!(turns.state(), TurnState::AwaitingInput);

    assert!(turns.begin_turn("another question").is_ok());
}

#[tokio::test]
async fn test_reply_waits_for_typing_delay() {
    let turns = controller(Duration::from_millis(80));

    let pending = turns.begin_turn("hello").unwrap();
    assert!(pending.text().contains("I'm here to help"));

    let started = std::time::Instant::now();
    let delivery = tokio::spawn(pending.deliver());

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(turns.transcript().len(), 1);
    assert_eq!(turns.state(), TurnState::ComposingResponse);

    delivery.await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(80));
    assert_eq!(turns.transcript().len(), 2);
    assert_eq!(turns.state(), TurnState::AwaitingInput);
}

#[tokio::test]
async fn test_dropped_pending_reply_still_answers() {
    let turns = controller(Duration::ZERO);

    drop(turns.begin_turn("hello").unwrap());
    assert_eq!(turns.state(), TurnState::AwaitingInput);

    turns.submit("thanks").await.unwrap();

    let speakers: Vec<Speaker> = turns.transcript().iter().map(|e| e.speaker).collect();
    assert_eq!(
        speakers,
        vec![Speaker::User, Speaker::Bot, Speaker::User, Speaker::Bot]
    );
    assert!(turns.transcript()[1].message.contains("I'm here to help"));
}

#[tokio::test]
async fn test_cancelled_delivery_appends_reply() {
    let turns = controller(Duration::from_secs(60));

    let pending = turns.begin_turn("I have a fever").unwrap();
    let outcome = tokio::time::timeout(Duration::from_millis(20), pending.deliver()).await;
    assert!(outcome.is_err());

    let transcript = turns.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].speaker, Speaker::User);
    assert_eq!(transcript[1].speaker, Speaker::Bot);
    assert_eq!(turns.state(), TurnState::AwaitingInput);
}

#[tokio::test]
async fn test_greeting_opens_transcript() {
    let turns = controller(Duration::ZERO);
    turns.greet();
    turns.submit("hi").await.unwrap();

    let transcript = turns.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[0].speaker, Speaker::Bot);
    assert_eq!(transcript[0].message, GREETING);
    assert!(transcript[0].lines().count() > 1);
}

#[tokio::test]
async fn test_display_time_format() {
    let turns = controller(Duration::ZERO);
    turns.greet();

    let time = turns.transcript()[0].display_time();
    assert_eq!(time.len(), 5);
    assert_eq!(&time[2..3], ":");
}

#[tokio::test]
async fn test_idle_sessions_are_evicted() {
    let registry = SessionRegistry::new(assistant(), Duration::ZERO);
    let idle = registry.open().await;
    let active = registry.open().await;

    assert_eq!(registry.evict_idle(Duration::from_secs(3600)).await, 0);
    assert_eq!(registry.len().await, 2);

    tokio::time::sleep(Duration::from_millis(50)).await;
    registry.get(active.id()).await.unwrap();

    assert_eq!(registry.evict_idle(Duration::from_millis(40)).await, 1);
    assert_matches!(
        registry.get(idle.id()).await,
        Err(ChatbotError::SessionNotFound(_))
    );
    assert!(registry.get(active.id()).await.is_ok());
}

#[tokio::test]
async fn test_composing_session_survives_eviction() {
    let registry = SessionRegistry::new(assistant(), Duration::ZERO);
    let session = registry.open().await;

    let pending = session.begin_turn("I have a fever").unwrap();
    assert_eq!(registry.evict_idle(Duration::ZERO).await, 0);

    pending.deliver().await;
    assert_eq!(registry.evict_idle(Duration::ZERO).await, 1);
    assert!(registry.is_empty().await);
}
