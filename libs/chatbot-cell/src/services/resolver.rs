use tracing::debug;

use shared_utils::text::{contains_any, lowercase_words};

use crate::models::{DoctorRecord, GeneralTopic, Intent};
use crate::services::extraction::{extract_doctor_name, is_doctor_lookup};
use crate::services::knowledge::KnowledgeBase;

/// Specialties recognised in "... doctor" / "... specialist" requests,
/// checked in this order.
pub const DEFAULT_SPECIALTIES: &[&str] = &[
    "cardiology",
    "pediatrics",
    "general medicine",
    "neurology",
    "gastroenterology",
    "endocrinology",
    "psychiatry",
    "orthopedics",
    "dermatology",
    "gynecology",
    "urology",
    "oncology",
    "hematology",
];

const ALL_DOCTORS_PHRASES: &[&str] = &["show all doctors", "list all doctors"];

/// Name tokens this short are ignored when matching ("Dr", "Li", "of").
const MIN_NAME_TOKEN_CHARS: usize = 3;

/// Classifies a chat message into an [`Intent`].
///
/// Rules are applied in a fixed order and the first one that produces an
/// intent wins:
/// 1. doctor lookup by name ("find Dr. Lee")
/// 2. doctors of a known specialty ("cardiology doctor")
/// 3. condition or symptom in the knowledge base ("I have chills")
/// 4. everything else, including "show all doctors"
///
/// The result depends only on the message, the doctor snapshot and the
/// knowledge base passed in.
#[derive(Debug, Clone)]
pub struct IntentResolver {
    specialties: Vec<String>,
}

impl IntentResolver {
    pub fn new<S: AsRef<str>>(specialties: &[S]) -> Self {
        Self {
            specialties: specialties
                .iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn specialties(&self) -> &[String] {
        &self.specialties
    }

    pub fn classify(
        &self,
        text: &str,
        doctors: &[DoctorRecord],
        knowledge: &KnowledgeBase,
    ) -> Intent {
        let lowered = text.to_lowercase();

        let intent = self
            .doctor_name_intent(text, &lowered, doctors)
            .or_else(|| self.specialty_intent(&lowered, doctors))
            .or_else(|| {
                knowledge.find_match(&lowered).map(|entry| Intent::MedicalAdvice {
                    condition: entry.condition.clone(),
                    entry: entry.clone(),
                })
            })
            .unwrap_or_else(|| fallback_intent(&lowered, doctors));

        debug!("Classified message as {}", intent.kind());
        intent
    }

    fn doctor_name_intent(
        &self,
        text: &str,
        lowered: &str,
        doctors: &[DoctorRecord],
    ) -> Option<Intent> {
        if !is_doctor_lookup(lowered) {
            return None;
        }

        // An empty candidate falls through to the specialty/condition rules.
        let search_term = extract_doctor_name(text)?;
        let matches = match_doctors_by_name(&search_term, doctors);

        Some(if matches.is_empty() {
            Intent::DoctorNotFound { search_term }
        } else {
            Intent::DoctorSearch {
                search_term,
                matches,
            }
        })
    }

    fn specialty_intent(&self, lowered: &str, doctors: &[DoctorRecord]) -> Option<Intent> {
        if !contains_any(lowered, &["doctor", "specialist"]) {
            return None;
        }

        self.specialties
            .iter()
            .filter(|specialty| lowered.contains(specialty.as_str()))
            .find_map(|specialty| {
                let matches = match_doctors_by_specialty(specialty, doctors);
                (!matches.is_empty()).then(|| Intent::SpecialtySearch {
                    specialty: specialty.clone(),
                    matches,
                })
            })
    }
}

impl Default for IntentResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SPECIALTIES)
    }
}

/// Doctors whose name fits `name`.
///
/// Only tokens longer than two characters count. A doctor matches when every
/// token occurs somewhere in their lowercased name, or when any token is one
/// of the words of their name. With no significant tokens every doctor
/// matches.
pub fn match_doctors_by_name(name: &str, doctors: &[DoctorRecord]) -> Vec<DoctorRecord> {
    let tokens: Vec<String> = lowercase_words(name)
        .into_iter()
        .filter(|token| token.chars().count() >= MIN_NAME_TOKEN_CHARS)
        .collect();

    doctors
        .iter()
        .filter(|doctor| {
            let doctor_name = doctor.name.to_lowercase();
            let words = lowercase_words(&doctor.name);

            tokens.iter().all(|token| doctor_name.contains(token.as_str()))
                || tokens.iter().any(|token| words.contains(token))
        })
        .cloned()
        .collect()
}

/// Doctors whose specialization contains `specialty`, ignoring case.
pub fn match_doctors_by_specialty(specialty: &str, doctors: &[DoctorRecord]) -> Vec<DoctorRecord> {
    let specialty = specialty.to_lowercase();

    doctors
        .iter()
        .filter(|doctor| doctor.specialization.to_lowercase().contains(&specialty))
        .cloned()
        .collect()
}

fn fallback_intent(lowered: &str, doctors: &[DoctorRecord]) -> Intent {
    let topic = if contains_any(lowered, ALL_DOCTORS_PHRASES) {
        GeneralTopic::AllDoctors(doctors.to_vec())
    } else {
        GeneralTopic::Help
    };

    Intent::General { topic }
}
