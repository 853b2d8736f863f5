use anyhow::{Result, anyhow};
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

use shared_config::AppConfig;
use shared_models::DoctorRecord;

/// HTTP client for the hospital backend API.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
    directory_path: String,
}

impl BackendClient {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(config.backend_timeout())
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build backend HTTP client ({}), using defaults", e);
                Client::new()
            });

        Self {
            client,
            base_url: config.backend_api_url.trim_end_matches('/').to_string(),
            auth_token: config.backend_api_token.clone(),
            directory_path: config.doctor_directory_path.clone(),
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &self.auth_token {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!(
                    "Backend token contains invalid header characters, sending request without it"
                ),
            }
        }

        headers
    }

    pub async fn request<T>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if self.base_url.is_empty() {
            return Err(anyhow!("Backend API URL is not configured"));
        }

        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let mut req = self.client.request(method, &url).headers(self.get_headers());

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("API error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Authentication error: {}", error_text),
                404 => anyhow!("Resource not found: {}", error_text),
                _ => anyhow!("API error ({}): {}", status, error_text),
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// Fetch the full doctor list from the directory endpoint.
    pub async fn list_doctors(&self) -> Result<Vec<DoctorRecord>> {
        self.request::<Vec<DoctorRecord>>(Method::GET, &self.directory_path, None).await
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
