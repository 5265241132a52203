use log::{info, warn};

use crate::error::{AnalysisError, DashboardError};
use crate::providers::Analyzer;
use crate::report::Report;

/// Issued when an analysis starts. Carries the document generation it was
/// issued for so that late results can be matched against current state.
#[derive(Debug)]
pub struct AnalysisTicket {
    generation: u64,
    document: String,
}

impl AnalysisTicket {
    pub fn document(&self) -> &str {
        &self.document
    }
}

/// Upload/analyze/export state for the single live document.
#[derive(Debug, Default)]
pub struct Dashboard {
    document: Option<String>,
    filename: String,
    report: Option<Report>,
    loading: bool,
    error: Option<String>,
    // Bumped on every file selection
    generation: u64,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The generate control is offered only for a non-empty document.
    pub fn can_analyze(&self) -> bool {
        self.document().is_some_and(|d| !d.is_empty())
    }

    /// A new file was picked. Any previous document, report and error are
    /// dropped before the read result is applied.
    pub fn select_file(
        &mut self,
        filename: &str,
        contents: std::io::Result<String>,
    ) -> Result<(), DashboardError> {
        self.generation += 1;
        self.filename = filename.to_string();
        self.document = None;
        self.report = None;
        self.error = None;

        match contents {
            Ok(text) => {
                info!("Loaded '{}' ({} bytes)", filename, text.len());
                self.document = Some(text);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to read '{filename}': {e}");
                Err(self.fail(DashboardError::FileRead(e)))
            }
        }
    }

    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket, DashboardError> {
        if self.loading {
            return Err(DashboardError::AnalysisInProgress);
        }

        let Some(document) = self.document.clone().filter(|d| !d.is_empty()) else {
            return Err(self.fail(DashboardError::MissingDocument));
        };

        self.loading = true;
        self.report = None;
        self.error = None;

        Ok(AnalysisTicket {
            generation: self.generation,
            document,
        })
    }

    /// Applies the outcome of the call started by `ticket`. Outcomes for a
    /// document that has since been replaced are discarded.
    pub fn finish_analysis(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<Report, AnalysisError>,
    ) -> Result<(), DashboardError> {
        self.loading = false;

        if ticket.generation != self.generation {
            warn!(
                "Discarding analysis result for a replaced document (generation {} != {})",
                ticket.generation, self.generation
            );
            return Ok(());
        }

        match outcome {
            Ok(report) => {
                info!("Analysis complete for '{}'", self.filename);
                self.report = Some(report);
                Ok(())
            }
            Err(e) => Err(self.fail(DashboardError::Analysis(e))),
        }
    }

    /// Runs a whole analysis in place. Callers that must not hold the
    /// dashboard across the await use `begin_analysis`/`finish_analysis`.
    pub async fn analyze_with(&mut self, analyzer: &dyn Analyzer) -> Result<(), DashboardError> {
        let ticket = self.begin_analysis()?;
        let outcome = analyzer.analyze(ticket.document()).await;
        self.finish_analysis(ticket, outcome)
    }

    fn fail(&mut self, err: DashboardError) -> DashboardError {
        self.error = Some(err.user_message());
        err
    }
}
