use async_trait::async_trait;
use log::{debug, error, info, warn};

use super::client::GeminiClient;
use super::schema::GenerateContentRequest;
use crate::auth::ApiKey;
use crate::error::{AnalysisError, Result};
use crate::providers::Analyzer;
use crate::report::Report;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: ApiKey,
    pub model: String,
    pub base_url: String,
}

pub struct GeminiAnalyzer {
    client: GeminiClient,
    model: String,
}

impl GeminiAnalyzer {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = GeminiClient::new(&config.base_url, &config.model, config.api_key)?;

        Ok(Self {
            client,
            model: config.model.trim().to_string(),
        })
    }

    async fn request_report(&self, document: &str) -> std::result::Result<Report, AnalysisError> {
        debug!(
            "Requesting report from {} ({} bytes of review text)",
            self.client.endpoint(),
            document.len()
        );

        let request = GenerateContentRequest::for_document(document);
        let response = self.client.generate_content(&request).await?;

        let text = response.text().ok_or(AnalysisError::EmptyResponse)?;
        let report = Report::parse(&text).map_err(AnalysisError::InvalidJson)?;

        let missing = report.missing_required_fields();
        if !missing.is_empty() {
            warn!("Model response is missing required fields: {}", missing.join(", "));
        }

        Ok(report)
    }
}

#[async_trait]
impl Analyzer for GeminiAnalyzer {
    async fn analyze(&self, document: &str) -> std::result::Result<Report, AnalysisError> {
        info!("Analyzing review document with {}", self.model);

        let result = self.request_report(document).await;
        if let Err(e) = &result {
            error!("AI analysis error: {e}");
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn analyzer_for(base_url: &str) -> GeminiAnalyzer {
        GeminiAnalyzer::new(GeminiConfig {
            api_key: ApiKey::new("test-key").unwrap(),
            model: DEFAULT_MODEL.to_string(),
            base_url: base_url.to_string(),
        })
        .unwrap()
    }

    fn candidate_body(text: &str) -> String {
        json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": text}]}, "finishReason": "STOP"}
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_analyze_returns_parsed_report() {
        let mut server = mockito::Server::new_async().await;
        let report_json = crate::report::tests::scenario_report().as_value().to_string();

        let mock = server
            .mock("POST", ENDPOINT)
            .match_header("x-goog-api-key", "test-key")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "generationConfig": {"responseMimeType": "application/json"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(candidate_body(&report_json))
            .expect(1)
            .create_async()
            .await;

        let report = analyzer_for(&server.url())
            .analyze("3 commits merged, CI passed, deploy to staging")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(report, crate::report::tests::scenario_report());
    }

    #[tokio::test]
    async fn test_analyze_sends_document_in_user_prompt() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", ENDPOINT)
            .match_body(Matcher::Regex("deploy to staging".to_string()))
            .with_status(200)
            .with_body(candidate_body("{}"))
            .create_async()
            .await;

        analyzer_for(&server.url())
            .analyze("3 commits merged, CI passed, deploy to staging")
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_analyze_passes_through_wrong_field_types() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", ENDPOINT)
            .with_status(200)
            .with_body(candidate_body(r#"{"report_title": 7, "kanban_tasks": "none"}"#))
            .create_async()
            .await;

        let report = analyzer_for(&server.url()).analyze("notes").await.unwrap();

        assert_eq!(report.as_value()["report_title"], 7);
        assert!(report.view().tasks.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_empty_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", ENDPOINT)
            .with_status(200)
            .with_body(json!({"candidates": []}).to_string())
            .create_async()
            .await;

        let err = analyzer_for(&server.url()).analyze("notes").await.unwrap_err();

        assert!(matches!(err, AnalysisError::EmptyResponse));
        assert_eq!(
            err.to_string(),
            "AI analysis failed: API returned an empty response."
        );
    }

    #[tokio::test]
    async fn test_analyze_blank_http_body_is_empty_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", ENDPOINT)
            .with_status(200)
            .with_body("")
            .expect(1)
            .create_async()
            .await;

        let err = analyzer_for(&server.url()).analyze("notes").await.unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, AnalysisError::EmptyResponse));
        assert_eq!(
            err.to_string(),
            "AI analysis failed: API returned an empty response."
        );
    }

    #[tokio::test]
    async fn test_analyze_whitespace_http_body_is_empty_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", ENDPOINT)
            .with_status(200)
            .with_body(" \n\t ")
            .create_async()
            .await;

        let err = analyzer_for(&server.url()).analyze("notes").await.unwrap_err();

        assert!(matches!(err, AnalysisError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_analyze_unparseable_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", ENDPOINT)
            .with_status(200)
            .with_body(candidate_body("Here is your report: {"))
            .create_async()
            .await;

        let err = analyzer_for(&server.url()).analyze("notes").await.unwrap_err();

        assert!(matches!(err, AnalysisError::InvalidJson(_)));
    }

    #[tokio::test]
    async fn test_analyze_rejected_request_surfaces_service_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", ENDPOINT)
            .with_status(400)
            .with_body(
                json!({"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}})
                    .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let err = analyzer_for(&server.url()).analyze("notes").await.unwrap_err();

        // Single attempt, no retry
        mock.assert_async().await;
        assert_eq!(
            err.to_string(),
            "AI analysis failed: API key not valid. Please pass a valid API key."
        );
    }

    #[tokio::test]
    async fn test_analyze_quota_failure_without_error_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", ENDPOINT)
            .with_status(429)
            .with_body("slow down")
            .create_async()
            .await;

        let err = analyzer_for(&server.url()).analyze("notes").await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "AI analysis failed: request failed with status 429 Too Many Requests"
        );
    }

    #[tokio::test]
    async fn test_analyze_network_failure() {
        // Nothing listens on the discard port
        let err = analyzer_for("http://127.0.0.1:9")
            .analyze("notes")
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::Transport(_)));
        assert!(err.to_string().starts_with("AI analysis failed: "));
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let result = GeminiAnalyzer::new(GeminiConfig {
            api_key: ApiKey::new("test-key").unwrap(),
            model: DEFAULT_MODEL.to_string(),
            base_url: "::::".to_string(),
        });

        assert!(result.is_err());
    }
}
