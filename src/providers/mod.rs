pub mod gemini;

use async_trait::async_trait;

use crate::error::AnalysisError;
use crate::report::Report;

#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Sends one review document to the model and returns its report.
    ///
    /// Issues exactly one remote call. Empty input is forwarded as-is; callers
    /// are expected to reject it first.
    async fn analyze(&self, document: &str) -> Result<Report, AnalysisError>;
}
