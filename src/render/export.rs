use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use tempfile::NamedTempFile;

use super::icons;
use super::sections::{ActivityItem, BoardColumn, HealthCard, ReportSections};
use super::{escape_html, FONT_LINKS, TAILWIND_CDN};
use crate::error::DashboardError;
use crate::report::Report;

pub const EXPORT_FILENAME: &str = "project_report.html";
pub const EXPORT_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// A rendered report ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl ExportArtifact {
    /// Writes the artifact into `dir`. The file appears under its final name
    /// only once fully written; a failed write leaves nothing behind.
    pub fn save(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(self.body.as_bytes())?;
        file.flush()?;

        let target = dir.join(self.filename);
        file.persist(&target).map_err(|e| e.error)?;
        info!("Exported report to {}", target.display());
        Ok(target)
    }
}

pub fn export(report: Option<&Report>) -> Result<ExportArtifact, DashboardError> {
    let report = report.ok_or(DashboardError::ExportNoData)?;

    Ok(ExportArtifact {
        filename: EXPORT_FILENAME,
        content_type: EXPORT_CONTENT_TYPE,
        body: render_document(report),
    })
}

/// Self-contained page for one report. Carries no controls and no script
/// beyond the stylesheet loader, so it reads the same wherever it is opened.
pub fn render_document(report: &Report) -> String {
    let sections = ReportSections::build(report);

    let metrics: String = sections
        .metrics
        .iter()
        .map(|m| {
            format!(
                r#"<div class="flex items-baseline justify-between"><span class="text-slate-300">{}</span><span class="text-2xl font-bold" data-metric="{}">{}</span></div>"#,
                m.label, m.label, m.value
            )
        })
        .collect();

    let insights: String = sections
        .insights
        .actionable
        .iter()
        .map(|i| format!("<li>{}</li>", escape_html(i)))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <script src="{TAILWIND_CDN}"></script>
  {FONT_LINKS}
</head>
<body class="bg-slate-900 text-white p-8">
  <div class="max-w-7xl mx-auto space-y-8">
    <h1 class="text-4xl font-bold">{title}</h1>
    <p class="text-slate-300">{summary}</p>
    <div class="grid grid-cols-1 md:grid-cols-3 gap-8">
      {health}
      <div class="bg-slate-800 p-6 rounded-lg" data-section="metrics">
        <h2 class="text-xl font-bold mb-4">Key Metrics</h2>
        <div class="space-y-4">{metrics}</div>
      </div>
      <div class="bg-slate-800 p-6 rounded-lg" data-section="activity">
        <h2 class="text-xl font-bold mb-4">Recent Activity</h2>
        <ul class="space-y-4">{activity}</ul>
      </div>
    </div>
    <div class="bg-slate-800 p-6 rounded-lg" data-section="insights">
      <h2 class="text-2xl font-bold mb-4">Understanding the Report</h2>
      <h3 class="text-xl font-semibold mb-2">What Really Matters</h3>
      <p class="text-slate-400 mb-4">{what_matters}</p>
      <h3 class="text-xl font-semibold mb-2">Actionable Insights</h3>
      <ul class="list-disc list-inside text-slate-400">{insights}</ul>
    </div>
    <div class="bg-slate-800 p-6 rounded-lg" data-section="board">
      <h2 class="text-2xl font-bold mb-6">Task Board</h2>
      <div class="flex flex-col md:flex-row gap-4">{board}</div>
    </div>
  </div>
</body>
</html>"#,
        title = escape_html(&sections.title),
        summary = escape_html(&sections.summary),
        health = health_block(&sections.health),
        activity = sections.activity.iter().map(activity_row).collect::<String>(),
        what_matters = escape_html(&sections.insights.what_matters),
        board = sections.board.iter().map(board_column).collect::<String>(),
    )
}

fn health_block(health: &HealthCard) -> String {
    format!(
        r#"<div class="bg-slate-800 p-6 rounded-lg" data-section="health">
        <div class="flex items-center justify-between mb-4"><h2 class="text-xl font-bold">Project Health</h2>{icon}</div>
        <p><strong>Status:</strong> {status}</p>
        <p><strong>Deployment:</strong> {deployment}</p>
        <p><strong>Last Branch:</strong> <span class="font-mono">{branch}</span></p>
      </div>"#,
        icon = icons::health(health.passed).svg("h-7 w-7"),
        status = escape_html(&health.status),
        deployment = escape_html(&health.deployment),
        branch = escape_html(&health.branch),
    )
}

fn activity_row(item: &ActivityItem) -> String {
    let mut details = String::new();
    if let Some(branch) = &item.branch {
        details.push_str(&format!(" &middot; Branch: {}", escape_html(branch)));
    }
    if let Some(status) = &item.status {
        details.push_str(&format!(" &middot; Status: {}", escape_html(status)));
    }

    format!(
        r#"<li class="flex items-start gap-3" data-activity>{icon}<div><p class="font-semibold">{description}</p><p class="text-xs text-slate-500">{when}{details}</p></div></li>"#,
        icon = icons::activity(item.kind).svg("h-5 w-5 mt-1"),
        description = escape_html(&item.description),
        when = escape_html(&item.when),
    )
}

fn board_column(column: &BoardColumn) -> String {
    let cards: String = column
        .tasks
        .iter()
        .map(|task| {
            let assignee = match &task.assignee {
                Some(a) => format!(
                    r#"<p class="text-xs text-slate-500 mt-2">Assigned to: {}</p>"#,
                    escape_html(a)
                ),
                None => String::new(),
            };
            format!(
                r#"<div class="bg-slate-900 p-3 rounded-lg border border-slate-700" data-task><h4 class="font-bold text-violet-400">{}</h4><p class="text-sm text-slate-400">{}</p>{assignee}</div>"#,
                escape_html(&task.title),
                escape_html(&task.description),
            )
        })
        .collect();

    format!(
        r#"<div class="flex-1 bg-slate-700/50 p-4 rounded-lg" data-column="{label}"><h3 class="text-xl font-semibold mb-4 flex items-center gap-2">{icon}{label}</h3><div class="space-y-4">{cards}</div></div>"#,
        label = column.column.label(),
        icon = icons::column(column.column).svg("h-5 w-5"),
    )
}
