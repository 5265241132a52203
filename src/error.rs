use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewDashError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Dashboard server error: {0}")]
    Server(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReviewDashError>;

/// Failure of a single analysis call. Every variant renders with the
/// "AI analysis failed: " prefix shown to the user.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("AI analysis failed: API returned an empty response.")]
    EmptyResponse,

    #[error("AI analysis failed: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("AI analysis failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("AI analysis failed: {0}")]
    Service(String),
}

/// Errors raised by dashboard events. The display text is the message held in
/// dashboard state.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Error reading the file.")]
    FileRead(#[source] std::io::Error),

    #[error("Please upload a file first.")]
    MissingDocument,

    #[error("An analysis is already in progress.")]
    AnalysisInProgress,

    #[error("{0}")]
    Analysis(#[from] AnalysisError),

    #[error("No report data to export.")]
    ExportNoData,
}

const FALLBACK_MESSAGE: &str = "An unexpected error occurred.";

impl DashboardError {
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_response_message() {
        let err = DashboardError::from(AnalysisError::EmptyResponse);

        assert_eq!(
            err.user_message(),
            "AI analysis failed: API returned an empty response."
        );
    }

    #[test]
    fn test_service_message_is_prefixed() {
        let err = AnalysisError::Service("API key not valid".to_string());

        assert_eq!(err.to_string(), "AI analysis failed: API key not valid");
    }

    #[test]
    fn test_invalid_json_carries_parser_message() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = AnalysisError::InvalidJson(parse_err);

        assert!(err.to_string().starts_with("AI analysis failed: key must be a string"));
    }

    #[test]
    fn test_local_validation_messages() {
        let read_err = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8");

        assert_eq!(
            DashboardError::FileRead(read_err).user_message(),
            "Error reading the file."
        );
        assert_eq!(
            DashboardError::MissingDocument.user_message(),
            "Please upload a file first."
        );
        assert_eq!(
            DashboardError::ExportNoData.user_message(),
            "No report data to export."
        );
    }
}
