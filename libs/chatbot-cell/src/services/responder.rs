use shared_utils::text::capitalize_first;

use crate::models::{DoctorRecord, GeneralTopic, Intent, KnowledgeEntry};

pub const GREETING: &str = "👋 Hello! I'm your Medical Assistant. I can help you with:\n\n\
🩺 Find solutions for health symptoms\n\
👨‍⚕️ Locate doctors by name or specialization\n\
📅 General health guidance\n\n\
How can I assist you today?";

pub const HELP_TEXT: &str = "🤖 I'm here to help with medical questions and doctor searches. Try asking about:\n\n\
• Find specific doctors: \"find Dr. Smith\" or \"find Dr. Johnson\"\n\
• Find specialists: \"cardiology doctors\" or \"pediatric specialists\"\n\
• Symptoms: \"I have a headache\" or \"chest pain\"\n\
• Health conditions: \"diabetes care\" or \"fever treatment\"\n\
• See all doctors: \"show all doctors\"\n\n\
What would you like to know?";

const DISCLAIMER: &str = "⚠️ Note: This is general guidance. Always consult a healthcare professional for proper diagnosis and treatment.";

const CHAMBER_MISSING: &str = "Chamber info not available";
const PHONE_MISSING: &str = "Contact info not available";
const SCHEDULE_MISSING: &str = "Schedule not available";

/// Turns an [`Intent`] into the bot's reply text.
///
/// Output is a pure function of the intent. Lines are separated by `\n`;
/// result lists are never truncated.
#[derive(Debug, Clone, Default)]
pub struct ResponseGenerator;

impl ResponseGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, intent: &Intent) -> String {
        match intent {
            Intent::DoctorSearch {
                search_term,
                matches,
            } => format!(
                "👨‍⚕️ I found {} doctor(s) matching \"{}\":\n\n{}",
                matches.len(),
                search_term,
                join_cards(matches, contact_card)
            ),
            Intent::DoctorNotFound { search_term } => not_found_reply(search_term),
            Intent::SpecialtySearch { specialty, matches } => format!(
                "🩺 {} specialists:\n\n{}",
                capitalize_first(specialty),
                join_cards(matches, schedule_card)
            ),
            Intent::MedicalAdvice { condition, entry } => advice_reply(condition, entry),
            Intent::General {
                topic: GeneralTopic::AllDoctors(doctors),
            } => all_doctors_reply(doctors),
            Intent::General {
                topic: GeneralTopic::Help,
            } => HELP_TEXT.to_string(),
        }
    }
}

/// "Dr. {name} - {specialization}", the first line of every doctor card.
pub fn doctor_headline(doctor: &DoctorRecord) -> String {
    format!("Dr. {} - {}", doctor.name, doctor.specialization)
}

fn or_missing<'a>(field: &'a Option<String>, placeholder: &'a str) -> &'a str {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(placeholder)
}

fn contact_card(doctor: &DoctorRecord) -> String {
    format!(
        "• {}\n  📍 {}\n  📞 {}",
        doctor_headline(doctor),
        or_missing(&doctor.chamber, CHAMBER_MISSING),
        or_missing(&doctor.phone, PHONE_MISSING)
    )
}

fn schedule_card(doctor: &DoctorRecord) -> String {
    format!(
        "• {}\n  📍 {}\n  📅 {}",
        doctor_headline(doctor),
        or_missing(&doctor.chamber, CHAMBER_MISSING),
        or_missing(&doctor.available_days, SCHEDULE_MISSING)
    )
}

fn join_cards(doctors: &[DoctorRecord], card: fn(&DoctorRecord) -> String) -> String {
    doctors.iter().map(card).collect::<Vec<_>>().join("\n\n")
}

fn not_found_reply(search_term: &str) -> String {
    format!(
        "❌ Sorry, I couldn't find any doctors matching \"{}\".\n\n\
💡 Try:\n\
• Using just the last name (e.g., \"find Dr. Smith\")\n\
• Checking the spelling\n\
• Asking for a specialty instead (e.g., \"cardiology doctors\")\n\n\
🔍 You can also browse all available doctors by asking \"show all doctors\"",
        search_term
    )
}

fn advice_reply(condition: &str, entry: &KnowledgeEntry) -> String {
    format!(
        "🩺 About {}:\n\n💡 Advice: {}\n\n👨‍⚕️ Recommended specialist: {}\n\n{}",
        capitalize_first(condition),
        entry.advice,
        entry.specialist,
        DISCLAIMER
    )
}

fn all_doctors_reply(doctors: &[DoctorRecord]) -> String {
    if doctors.is_empty() {
        return "👨‍⚕️ The doctor directory is empty right now. Please try again in a moment.".to_string();
    }

    let lines: Vec<String> = doctors
        .iter()
        .map(|doctor| format!("• {}", doctor_headline(doctor)))
        .collect();

    format!("👨‍⚕️ Here are all available doctors:\n\n{}", lines.join("\n"))
}
