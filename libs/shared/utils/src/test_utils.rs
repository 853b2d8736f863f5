use serde_json::json;

use shared_config::AppConfig;
use shared_models::DoctorRecord;

pub struct TestConfig {
    pub backend_api_url: String,
    pub backend_api_token: Option<String>,
    pub reply_delay_ms: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            backend_api_url: "http://localhost:5000".to_string(),
            backend_api_token: None,
            reply_delay_ms: 0,
        }
    }
}

impl TestConfig {
    pub fn with_backend(url: &str) -> Self {
        Self {
            backend_api_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            backend_api_url: self.backend_api_url.clone(),
            backend_api_token: self.backend_api_token.clone(),
            backend_timeout_secs: 2,
            chatbot_reply_delay_ms: self.reply_delay_ms,
            ..AppConfig::default()
        }
    }
}

pub struct TestDoctors;

impl TestDoctors {
    pub fn john_lee() -> DoctorRecord {
        DoctorRecord::new(1, "John Lee", "Cardiology")
            .with_chamber("Heart Center, Room 204")
            .with_phone("+880 1711-000001")
            .with_available_days("Sun, Tue, Thu")
    }

    pub fn sarah_khan() -> DoctorRecord {
        DoctorRecord::new(2, "Sarah Khan", "Pediatrics")
            .with_chamber("Children's Wing, Room 12")
    }

    pub fn rafiq_ahmed() -> DoctorRecord {
        DoctorRecord::new(3, "Rafiq Ahmed", "General Medicine")
    }

    pub fn nadia_lee() -> DoctorRecord {
        DoctorRecord::new(4, "Nadia Lee", "Neurology")
            .with_phone("+880 1711-000004")
    }

    pub fn directory() -> Vec<DoctorRecord> {
        vec![
            Self::john_lee(),
            Self::sarah_khan(),
            Self::rafiq_ahmed(),
            Self::nadia_lee(),
        ]
    }
}

pub struct MockBackendResponses;

impl MockBackendResponses {
    pub fn doctor_list_response(doctors: &[DoctorRecord]) -> serde_json::Value {
        json!(doctors)
    }

    pub fn error_response(message: &str) -> serde_json::Value {
        json!({
            "msg": message
        })
    }
}
