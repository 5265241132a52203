use reqwest::{Client, StatusCode};
use url::Url;

use super::schema::{ApiErrorBody, GenerateContentRequest, GenerateContentResponse};
use crate::auth::ApiKey;
use crate::error::{AnalysisError, ReviewDashError, Result};

pub struct GeminiClient {
    client: Client,
    endpoint: Url,
    api_key: ApiKey,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, api_key: ApiKey) -> Result<Self> {
        let client = Client::builder()
            .user_agent("ReviewDash/0.1.0")
            .build()
            .map_err(|e| ReviewDashError::Config(format!("Failed to create HTTP client: {e}")))?;

        let endpoint = endpoint_url(base_url, model)?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn auth_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header("x-goog-api-key", self.api_key.as_str())
    }

    pub async fn generate_content(
        &self,
        body: &GenerateContentRequest,
    ) -> std::result::Result<GenerateContentResponse, AnalysisError> {
        let request = self.auth_request(self.client.post(self.endpoint.clone()).json(body));

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Service(service_message(status, &body)));
        }

        let payload = response.text().await?;
        if payload.trim().is_empty() {
            return Err(AnalysisError::EmptyResponse);
        }
        serde_json::from_str(&payload).map_err(AnalysisError::InvalidJson)
    }
}

/// `{base}v1beta/models/{model}:generateContent`
fn endpoint_url(base_url: &str, model: &str) -> Result<Url> {
    let model = model.trim();
    if model.is_empty() || model.contains(['/', '?', '#', ' ']) {
        return Err(ReviewDashError::Config(format!("Invalid model name: '{model}'")));
    }

    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }

    Url::parse(&base)
        .map_err(|e| ReviewDashError::Config(format!("Invalid base URL: {e}")))?
        .join(&format!("v1beta/models/{model}:generateContent"))
        .map_err(|e| ReviewDashError::Config(format!("Invalid API URL: {e}")))
}

fn service_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|b| b.error.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("request failed with status {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_for_default_base() {
        let url = endpoint_url("https://generativelanguage.googleapis.com/", "gemini-2.5-flash")
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let url = endpoint_url("http://127.0.0.1:8089/proxy", "gemini-2.5-pro").unwrap();

        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8089/proxy/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }

    #[test]
    fn test_endpoint_url_rejects_bad_input() {
        assert!(matches!(
            endpoint_url("not a url", "gemini-2.5-flash"),
            Err(ReviewDashError::Config(_))
        ));
        assert!(matches!(
            endpoint_url("https://example.com", ""),
            Err(ReviewDashError::Config(_))
        ));
        assert!(matches!(
            endpoint_url("https://example.com", "../admin"),
            Err(ReviewDashError::Config(_))
        ));
    }

    #[test]
    fn test_service_message_prefers_api_error() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;

        assert_eq!(
            service_message(StatusCode::BAD_REQUEST, body),
            "API key not valid."
        );
    }

    #[test]
    fn test_service_message_falls_back_to_status() {
        assert_eq!(
            service_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
            "request failed with status 500 Internal Server Error"
        );
        assert_eq!(
            service_message(StatusCode::FORBIDDEN, r#"{"error": {"message": ""}}"#),
            "request failed with status 403 Forbidden"
        );
    }
}
