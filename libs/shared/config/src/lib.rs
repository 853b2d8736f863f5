use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_BACKEND_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_DOCTOR_DIRECTORY_PATH: &str = "/api/doctor/";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_api_url: String,
    pub backend_api_token: Option<String>,
    pub doctor_directory_path: String,
    pub backend_timeout_secs: u64,
    pub chatbot_reply_delay_ms: u64,
    /// Zero disables background polling of the doctor directory.
    pub directory_refresh_interval_secs: u64,
    /// Zero keeps chat sessions until they are closed.
    pub session_idle_timeout_secs: u64,
    pub knowledge_base_path: Option<String>,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            backend_api_url: env::var("BACKEND_API_URL").unwrap_or_else(|_| {
                warn!("BACKEND_API_URL not set, using default");
                DEFAULT_BACKEND_API_URL.to_string()
            }),
            backend_api_token: env::var("BACKEND_API_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
            doctor_directory_path: env::var("DOCTOR_DIRECTORY_PATH")
                .unwrap_or_else(|_| DEFAULT_DOCTOR_DIRECTORY_PATH.to_string()),
            backend_timeout_secs: parse_var("BACKEND_TIMEOUT_SECS", 10),
            chatbot_reply_delay_ms: parse_var("CHATBOT_REPLY_DELAY_MS", 1000),
            directory_refresh_interval_secs: parse_var("DIRECTORY_REFRESH_INTERVAL_SECS", 0),
            session_idle_timeout_secs: parse_var("SESSION_IDLE_TIMEOUT_SECS", 1800),
            knowledge_base_path: env::var("KNOWLEDGE_BASE_PATH").ok(),
            port: parse_var("PORT", 3000),
        };

        if !config.is_backend_configured() {
            warn!("Backend API URL is empty - doctor lookups will return no results");
        }

        config
    }

    pub fn is_backend_configured(&self) -> bool {
        !self.backend_api_url.trim().is_empty()
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.chatbot_reply_delay_ms)
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }

    pub fn directory_refresh_interval(&self) -> Option<Duration> {
        match self.directory_refresh_interval_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn session_idle_timeout(&self) -> Option<Duration> {
        match self.session_idle_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_api_url: DEFAULT_BACKEND_API_URL.to_string(),
            backend_api_token: None,
            doctor_directory_path: DEFAULT_DOCTOR_DIRECTORY_PATH.to_string(),
            backend_timeout_secs: 10,
            chatbot_reply_delay_ms: 1000,
            directory_refresh_interval_secs: 0,
            session_idle_timeout_secs: 1800,
            knowledge_base_path: None,
            port: 3000,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has an invalid value ({}), using default", name, raw);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polling_disabled_by_default() {
        let config = AppConfig::default();
        assert!(config.directory_refresh_interval().is_none());
        assert_eq!(config.reply_delay(), Duration::from_millis(1000));
        assert!(config.is_backend_configured());
    }

    #[test]
    fn test_refresh_interval_when_set() {
        let config = AppConfig {
            directory_refresh_interval_secs: 30,
            ..AppConfig::default()
        };
        assert_eq!(config.directory_refresh_interval(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_session_expiry_defaults_to_thirty_minutes() {
        let config = AppConfig::default();
        assert_eq!(config.session_idle_timeout(), Some(Duration::from_secs(1800)));

        let config = AppConfig {
            session_idle_timeout_secs: 0,
            ..AppConfig::default()
        };
        assert!(config.session_idle_timeout().is_none());
    }

    #[test]
    fn test_parse_var_falls_back_on_garbage() {
        env::set_var("SHARED_CONFIG_TEST_GARBAGE", "not-a-number");
        assert_eq!(parse_var("SHARED_CONFIG_TEST_GARBAGE", 42u64), 42);
        env::remove_var("SHARED_CONFIG_TEST_GARBAGE");
        assert_eq!(parse_var("SHARED_CONFIG_TEST_UNSET", 7u16), 7);
    }
}
