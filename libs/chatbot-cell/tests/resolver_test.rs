use assert_matches::assert_matches;

use chatbot_cell::models::{DoctorRecord, GeneralTopic, Intent, KnowledgeEntry};
use chatbot_cell::services::resolver::{match_doctors_by_name, match_doctors_by_specialty};
use chatbot_cell::{IntentResolver, KnowledgeBase};
use shared_utils::test_utils::TestDoctors;

fn classify(text: &str, doctors: &[DoctorRecord]) -> Intent {
    IntentResolver::default().classify(text, doctors, &KnowledgeBase::default())
}

fn lee_only() -> Vec<DoctorRecord> {
    vec![DoctorRecord::new(1, "John Lee", "Cardiology")]
}

// ==============================================================================
// DOCTOR NAME LOOKUP
// ==============================================================================

#[test]
fn test_find_doctor_by_last_name() {
    let intent = classify("find Dr. Lee", &lee_only());

    assert_matches!(intent, Intent::DoctorSearch { search_term, matches } => {
        assert_eq!(search_term, "Lee");
        assert_eq!(matches, lee_only());
    });
}

#[test]
fn test_find_doctor_with_empty_directory() {
    let intent = classify("find Dr. Lee", &[]);

    assert_eq!(
        intent,
        Intent::DoctorNotFound {
            search_term: "Lee".to_string()
        }
    );
}

#[test]
fn test_doctor_lookup_beats_condition_keywords() {
    let with_directory = classify("find Dr. Lee, I have a headache", &lee_only());
    assert_matches!(with_directory, Intent::DoctorSearch { .. });

    let without_directory = classify("find Dr. Lee, I have a headache", &[]);
    assert_matches!(without_directory, Intent::DoctorNotFound { .. });
}

#[test]
fn test_condition_before_lookup_phrase_still_resolves_lookup() {
    let intent = classify("I have chest pain, find doctor Lee", &lee_only());
    assert_matches!(intent, Intent::DoctorSearch { search_term, .. } => {
        assert_eq!(search_term, "Lee");
    });
}

#[test]
fn test_any_token_equal_to_a_name_word_matches() {
    let doctors = TestDoctors::directory();
    let intent = classify("find Dr. John Khan", &doctors);

    assert_matches!(intent, Intent::DoctorSearch { matches, .. } => {
        let names: Vec<&str> = matches.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["John Lee", "Sarah Khan"]);
    });
}

#[test]
fn test_partial_token_matches_when_every_token_is_contained() {
    let doctors = TestDoctors::directory();

    let matches = match_doctors_by_name("ahm", &doctors);
    assert_eq!(matches, vec![TestDoctors::rafiq_ahmed()]);

    let matches = match_doctors_by_name("raf ahm", &doctors);
    assert_eq!(matches, vec![TestDoctors::rafiq_ahmed()]);
}

#[test]
fn test_extra_words_do_not_block_whole_word_match() {
    let intent = classify("find dr. lee headache", &lee_only());
    assert_matches!(intent, Intent::DoctorSearch { search_term, .. } => {
        assert_eq!(search_term, "lee headache");
    });
}

#[test]
fn test_short_tokens_are_ignored() {
    // No token longer than two characters, so every doctor qualifies.
    let doctors = TestDoctors::directory();
    let matches = match_doctors_by_name("Li", &doctors);
    assert_eq!(matches.len(), doctors.len());
}

#[test]
fn test_name_without_title_uses_find_pattern() {
    let intent = classify("please find Khan doctor", &TestDoctors::directory());
    assert_matches!(intent, Intent::DoctorSearch { search_term, matches } => {
        assert_eq!(search_term, "Khan");
        assert_eq!(matches, vec![TestDoctors::sarah_khan()]);
    });
}

#[test]
fn test_empty_candidate_falls_through_to_other_rules() {
    // "find doctor" leaves nothing once the title word is removed.
    let intent = classify("find doctor", &TestDoctors::directory());
    assert_eq!(
        intent,
        Intent::General {
            topic: GeneralTopic::Help
        }
    );

    let intent = classify("find dr. 24/7 for fever", &TestDoctors::directory());
    assert_matches!(intent, Intent::MedicalAdvice { condition, .. } => {
        assert_eq!(condition, "fever");
    });
}

// ==============================================================================
// SPECIALTY SEARCH
// ==============================================================================

#[test]
fn test_specialty_search() {
    let intent = classify("I need a cardiology doctor", &TestDoctors::directory());

    assert_matches!(intent, Intent::SpecialtySearch { specialty, matches } => {
        assert_eq!(specialty, "cardiology");
        assert_eq!(matches, vec![TestDoctors::john_lee()]);
    });
}

#[test]
fn test_specialty_list_order_wins_over_text_order() {
    let intent = classify(
        "is there a neurology or cardiology specialist",
        &TestDoctors::directory(),
    );
    assert_matches!(intent, Intent::SpecialtySearch { specialty, .. } => {
        assert_eq!(specialty, "cardiology");
    });
}

#[test]
fn test_specialty_without_doctors_tries_next_specialty() {
    let doctors = vec![TestDoctors::sarah_khan(), TestDoctors::nadia_lee()];
    let intent = classify("cardiology or neurology specialist please", &doctors);

    assert_matches!(intent, Intent::SpecialtySearch { specialty, matches } => {
        assert_eq!(specialty, "neurology");
        assert_eq!(matches, vec![TestDoctors::nadia_lee()]);
    });
}

#[test]
fn test_specialty_without_doctors_falls_through_to_conditions() {
    let intent = classify("dermatology doctor for my cough", &TestDoctors::directory());
    assert_matches!(intent, Intent::MedicalAdvice { condition, .. } => {
        assert_eq!(condition, "cold");
    });
}

#[test]
fn test_specialty_needs_doctor_or_specialist_keyword() {
    let intent = classify("tell me about cardiology", &TestDoctors::directory());
    assert_eq!(
        intent,
        Intent::General {
            topic: GeneralTopic::Help
        }
    );
}

#[test]
fn test_specialty_match_is_case_insensitive_substring() {
    let doctors = vec![
        DoctorRecord::new(10, "Omar Faruk", "Pediatrics & Neonatology"),
        DoctorRecord::new(11, "Lina Das", "PEDIATRICS"),
        DoctorRecord::new(12, "Karim Uddin", "Urology"),
    ];

    let matches = match_doctors_by_specialty("pediatrics", &doctors);
    assert_eq!(matches.len(), 2);
}

#[test]
fn test_custom_specialty_list() {
    let resolver = IntentResolver::new(&["Urology"]);
    let doctors = vec![
        DoctorRecord::new(12, "Karim Uddin", "Urology"),
        DoctorRecord::new(1, "John Lee", "Cardiology"),
    ];

    let intent = resolver.classify("cardiology doctor", &doctors, &KnowledgeBase::default());
    assert_matches!(intent, Intent::General { .. });

    let intent = resolver.classify("urology doctor", &doctors, &KnowledgeBase::default());
    assert_matches!(intent, Intent::SpecialtySearch { .. });
}

// ==============================================================================
// CONDITIONS
// ==============================================================================

#[test]
fn test_symptom_maps_to_condition() {
    let knowledge = KnowledgeBase::from_entries(vec![KnowledgeEntry::new(
        "fever",
        &["chills"],
        "Rest and fluids.",
        "General Medicine",
    )]);

    let intent = IntentResolver::default().classify("I have chills", &[], &knowledge);

    assert_matches!(intent, Intent::MedicalAdvice { condition, entry } => {
        assert_eq!(condition, "fever");
        assert_eq!(entry.advice, "Rest and fluids.");
    });
}

#[test]
fn test_condition_name_matches_case_insensitively() {
    let intent = classify("Managing DIABETES at home", &[]);
    assert_matches!(intent, Intent::MedicalAdvice { condition, .. } => {
        assert_eq!(condition, "diabetes");
    });
}

#[test]
fn test_first_knowledge_entry_wins() {
    // "headache" is listed under fever before it appears as its own condition.
    let intent = classify("I have a headache", &[]);
    assert_matches!(intent, Intent::MedicalAdvice { condition, .. } => {
        assert_eq!(condition, "fever");
    });
}

// ==============================================================================
// FALLBACK
// ==============================================================================

#[test]
fn test_show_all_doctors() {
    let doctors = TestDoctors::directory();

    let intent = classify("Show all doctors", &doctors);
    assert!(intent.is_all_doctors());
    assert_eq!(
        intent,
        Intent::General {
            topic: GeneralTopic::AllDoctors(doctors.clone())
        }
    );

    assert!(classify("please list all doctors", &doctors).is_all_doctors());
}

#[test]
fn test_unrecognised_message_gets_help() {
    let intent = classify("hello there", &TestDoctors::directory());
    assert_eq!(intent.kind(), "general");
    assert!(!intent.is_all_doctors());
}

#[test]
fn test_every_message_classifies_deterministically() {
    let doctors = TestDoctors::directory();
    let messages = [
        "find Dr. Lee",
        "find dr. nobody",
        "cardiology doctor",
        "I feel dizziness",
        "show all doctors",
        "what time is it",
        "?",
    ];

    for message in messages {
        let first = classify(message, &doctors);
        let second = classify(message, &doctors);
        assert_eq!(first, second, "classification changed for {:?}", message);
    }
}
