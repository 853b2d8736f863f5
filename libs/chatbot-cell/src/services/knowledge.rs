use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::ChatbotError;
use crate::models::KnowledgeEntry;

/// Ordered condition -> advice table. Lookup order is insertion order and
/// the first matching entry wins, so earlier conditions shadow later ones
/// that share a symptom keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// Condition names must be unique; later duplicates are dropped.
    pub fn from_entries(entries: Vec<KnowledgeEntry>) -> Self {
        let mut unique: Vec<KnowledgeEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if unique
                .iter()
                .any(|e| e.condition.eq_ignore_ascii_case(&entry.condition))
            {
                debug!("Dropping duplicate knowledge entry for {}", entry.condition);
                continue;
            }
            unique.push(entry);
        }
        Self { entries: unique }
    }

    /// Load a knowledge base from a JSON array of entries.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ChatbotError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            ChatbotError::KnowledgeBase(format!("cannot read {}: {}", path.display(), e))
        })?;
        let kb = Self::from_json_str(&raw)?;
        info!("Loaded {} knowledge entries from {}", kb.len(), path.display());
        Ok(kb)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ChatbotError> {
        let entries: Vec<KnowledgeEntry> = serde_json::from_str(raw)
            .map_err(|e| ChatbotError::KnowledgeBase(format!("invalid knowledge base: {}", e)))?;

        if entries.is_empty() {
            return Err(ChatbotError::KnowledgeBase(
                "knowledge base has no entries".to_string(),
            ));
        }

        Ok(Self::from_entries(entries))
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn get(&self, condition: &str) -> Option<&KnowledgeEntry> {
        self.entries
            .iter()
            .find(|e| e.condition.eq_ignore_ascii_case(condition))
    }

    /// First entry whose condition name or any symptom keyword occurs in
    /// `text` (case-insensitive).
    pub fn find_match(&self, text: &str) -> Option<&KnowledgeEntry> {
        let lowered = text.to_lowercase();
        self.entries.iter().find(|entry| entry.matches(&lowered))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::from_entries(vec![
            KnowledgeEntry::new(
                "fever",
                &["high temperature", "chills", "sweating", "headache"],
                "Rest, drink plenty of fluids, take fever reducers like paracetamol. Consult a doctor if fever persists over 3 days or exceeds 103°F.",
                "General Medicine",
            ),
            KnowledgeEntry::new(
                "headache",
                &["head pain", "migraine", "tension headache"],
                "Rest in a dark, quiet room. Stay hydrated. Apply cold/warm compress. Avoid triggers like stress and certain foods.",
                "Neurology or General Medicine",
            ),
            KnowledgeEntry::new(
                "chest pain",
                &["chest discomfort", "heart pain", "breathing difficulty"],
                "⚠️ URGENT: Seek immediate medical attention if experiencing chest pain, especially with shortness of breath, sweating, or arm pain.",
                "Cardiology - EMERGENCY",
            ),
            KnowledgeEntry::new(
                "stomach pain",
                &["abdominal pain", "stomach ache", "belly pain"],
                "Avoid solid foods temporarily. Try clear liquids, rest. Avoid spicy/fatty foods. See a doctor if pain is severe or persistent.",
                "Gastroenterology or General Medicine",
            ),
            KnowledgeEntry::new(
                "cold",
                &["runny nose", "cough", "sneezing", "sore throat"],
                "Rest, drink warm fluids, use humidifier. Gargle with salt water. Usually resolves in 7-10 days.",
                "General Medicine",
            ),
            KnowledgeEntry::new(
                "diabetes",
                &["high blood sugar", "frequent urination", "excessive thirst"],
                "Monitor blood sugar regularly, maintain healthy diet, exercise regularly. Take medications as prescribed.",
                "Endocrinology",
            ),
            KnowledgeEntry::new(
                "hypertension",
                &["high blood pressure", "dizziness", "headaches"],
                "Reduce salt intake, exercise regularly, manage stress, take medications as prescribed. Monitor BP regularly.",
                "Cardiology",
            ),
            KnowledgeEntry::new(
                "anxiety",
                &["worry", "nervousness", "panic", "stress"],
                "Practice deep breathing, meditation, regular exercise. Avoid caffeine. Consider counseling or therapy.",
                "Psychiatry or Psychology",
            ),
        ])
    }
}
