use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend doctor ids are integers today, but older exports used strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DoctorId {
    Number(i64),
    Text(String),
}

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoctorId::Number(id) => write!(f, "{}", id),
            DoctorId::Text(id) => f.write_str(id),
        }
    }
}

/// A doctor as served by the hospital backend's directory endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorRecord {
    pub id: DoctorId,
    pub name: String,
    pub specialization: String,
    #[serde(default)]
    pub chamber: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub available_days: Option<String>,
}

impl DoctorRecord {
    pub fn new(id: i64, name: &str, specialization: &str) -> Self {
        Self {
            id: DoctorId::Number(id),
            name: name.to_string(),
            specialization: specialization.to_string(),
            chamber: None,
            phone: None,
            available_days: None,
        }
    }

    pub fn with_chamber(mut self, chamber: &str) -> Self {
        self.chamber = Some(chamber.to_string());
        self
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.to_string());
        self
    }

    pub fn with_available_days(mut self, days: &str) -> Self {
        self.available_days = Some(days.to_string());
        self
    }
}
