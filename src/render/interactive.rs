use super::icons;
use super::sections::{ActivityItem, BoardColumn, HealthCard, InsightsSection, MetricCounter};
use super::{escape_html, ReportSections, FONT_LINKS, TAILWIND_CDN};
use crate::dashboard::Dashboard;

/// Seconds between reloads while an analysis is outstanding.
const LOADING_REFRESH_SECS: u32 = 2;

const SPINNER: &str = r#"<svg class="animate-spin h-5 w-5 text-white" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" data-icon="spinner"><circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"></circle><path class="opacity-75" fill="currentColor" d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4zm2 5.291A7.962 7.962 0 014 12H0c0 3.042 1.135 5.824 3 7.938l3-2.647z"></path></svg>"#;

/// Full dashboard page for the current state. `notice` is a one-off message
/// that is not kept in dashboard state.
pub fn page(dashboard: &Dashboard, notice: Option<&str>) -> String {
    let refresh = if dashboard.is_loading() {
        format!(r#"<meta http-equiv="refresh" content="{LOADING_REFRESH_SECS}">"#)
    } else {
        String::new()
    };

    let mut banners = String::new();
    if let Some(error) = dashboard.error() {
        banners.push_str(&format!(
            r#"<div class="bg-red-900/50 border border-red-700 text-red-200 p-4 rounded-lg shadow-lg my-8" role="alert" data-section="error"><p class="font-semibold">Error</p><p>{}</p></div>"#,
            escape_html(error)
        ));
    }
    if let Some(notice) = notice {
        banners.push_str(&format!(
            r#"<div class="bg-amber-900/50 border border-amber-700 text-amber-100 p-4 rounded-lg shadow-lg my-8" role="status" data-section="notice"><p>{}</p></div>"#,
            escape_html(notice)
        ));
    }

    let body = match dashboard.report() {
        Some(report) => dashboard_body(&ReportSections::build(report)),
        None => placeholder(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  {refresh}
  <title>Project Dashboard AI</title>
  <script src="{TAILWIND_CDN}"></script>
  {FONT_LINKS}
</head>
<body class="min-h-screen bg-slate-900 text-white antialiased p-4 sm:p-8">
  <div class="max-w-7xl mx-auto">
    <header class="flex flex-col sm:flex-row justify-between items-center mb-8 gap-4 border-b border-slate-800 pb-6">
      <h1 class="text-4xl font-bold tracking-tight text-slate-100 flex items-center gap-3">{logo}<span>Project Dashboard AI</span></h1>
      <div class="flex flex-wrap justify-center sm:justify-end gap-4 w-full sm:w-auto">{controls}</div>
    </header>
    {banners}
    {body}
  </div>
</body>
</html>"#,
        logo = icons::sparkles().svg("w-8 h-8"),
        controls = controls(dashboard),
    )
}

fn controls(dashboard: &Dashboard) -> String {
    let label = if dashboard.filename().is_empty() {
        "Upload Review File".to_string()
    } else {
        escape_html(dashboard.filename())
    };

    let mut html = format!(
        r#"<form action="/upload" method="post" enctype="multipart/form-data"><label class="flex items-center space-x-2 px-5 py-3 bg-violet-600 hover:bg-violet-700 transition-colors rounded-lg shadow-lg cursor-pointer font-semibold" data-control="upload">{icon}<span>{label}</span><input type="file" name="document" accept=".txt,.md" class="hidden" onchange="this.form.submit()"></label><noscript><button type="submit" class="ml-2 underline">Upload</button></noscript></form>"#,
        icon = icons::document().svg("w-5 h-5"),
    );

    if dashboard.can_analyze() {
        let (indicator, caption, disabled) = if dashboard.is_loading() {
            (SPINNER.to_string(), "Analyzing...", " disabled")
        } else {
            (
                icons::sparkles().svg("w-5 h-5"),
                "Generate Dashboard",
                "",
            )
        };
        html.push_str(&format!(
            r#"<form action="/analyze" method="post"><button type="submit" class="flex items-center space-x-2 px-5 py-3 rounded-lg shadow-lg transition-colors font-semibold bg-lime-600 hover:bg-lime-700 disabled:bg-gray-500 disabled:cursor-not-allowed" data-control="generate"{disabled}>{indicator}<span>{caption}</span></button></form>"#
        ));
    }

    if dashboard.report().is_some() {
        html.push_str(r#"<a href="/export" class="flex items-center space-x-2 px-5 py-3 bg-sky-600 hover:bg-sky-700 transition-colors rounded-lg shadow-lg font-semibold" data-control="export"><span>Export HTML</span></a>"#);
    }

    html
}

fn placeholder() -> String {
    r#"<div class="flex flex-col items-center justify-center p-12 bg-slate-800/50 rounded-lg shadow-lg border-2 border-dashed border-slate-700 mt-8" data-section="placeholder">
      <p class="text-xl text-slate-400 text-center">Your intelligent project dashboard awaits.</p>
      <p class="text-slate-500 text-center mt-2">Upload a daily review file and click "Generate Dashboard" to get started.</p>
    </div>"#
        .to_string()
}

fn dashboard_body(sections: &ReportSections) -> String {
    format!(
        r#"<main class="space-y-8" data-section="report">
      <h2 class="text-3xl font-bold text-slate-100">{title}</h2>
      <p class="text-slate-300 max-w-4xl">{summary}</p>
      <div class="grid grid-cols-1 md:grid-cols-3 gap-8">{health}{metrics}{activity}</div>
      {insights}
      {board}
    </main>"#,
        title = escape_html(&sections.title),
        summary = escape_html(&sections.summary),
        health = health_card(&sections.health),
        metrics = metrics_card(&sections.metrics),
        activity = activity_card(&sections.activity),
        insights = insights_section(&sections.insights),
        board = task_board(&sections.board),
    )
}

fn health_card(health: &HealthCard) -> String {
    format!(
        r#"<div class="col-span-1 bg-slate-800/50 p-6 rounded-lg shadow-lg border border-slate-700" data-section="health">
        <div class="flex items-center justify-between mb-4"><h3 class="text-xl font-bold text-slate-200">Project Health</h3>{icon}</div>
        <div class="space-y-3 text-sm text-slate-400">
          <p><span class="font-semibold text-slate-200">Status:</span> {status}</p>
          <p><span class="font-semibold text-slate-200">Deployment:</span> {deployment}</p>
          <p><span class="font-semibold text-slate-200">Last Branch:</span> <span class="font-mono text-violet-300">{branch}</span></p>
        </div>
      </div>"#,
        icon = icons::health(health.passed).svg("h-7 w-7"),
        status = escape_html(&health.status),
        deployment = escape_html(&health.deployment),
        branch = escape_html(&health.branch),
    )
}

fn metrics_card(metrics: &[MetricCounter]) -> String {
    let rows: String = metrics
        .iter()
        .map(|metric| {
            format!(
                r#"<div class="flex items-baseline justify-between gap-2"><span class="font-medium text-slate-300">{}</span><span class="ml-auto text-2xl font-bold" data-metric="{}">{}</span></div>"#,
                metric.label, metric.label, metric.value
            )
        })
        .collect();

    format!(
        r#"<div class="col-span-1 bg-slate-800/50 p-6 rounded-lg shadow-lg border border-slate-700" data-section="metrics"><h3 class="text-xl font-bold mb-4 text-slate-200">Key Metrics</h3><div class="space-y-4">{rows}</div></div>"#
    )
}

fn activity_card(activity: &[ActivityItem]) -> String {
    let items: String = activity.iter().map(activity_entry).collect();

    format!(
        r#"<div class="col-span-1 bg-slate-800/50 p-6 rounded-lg shadow-lg border border-slate-700" data-section="activity"><h3 class="text-xl font-bold mb-4 text-slate-200">Recent Activity</h3><ul class="space-y-4">{items}</ul></div>"#
    )
}

fn activity_entry(item: &ActivityItem) -> String {
    let details: String = [("Branch", &item.branch), ("Status", &item.status)]
        .into_iter()
        .filter_map(|(label, value)| {
            value.as_ref().map(|v| {
                format!(
                    r#"<span class="mr-3">{label}: <span class="font-mono text-slate-300">{}</span></span>"#,
                    escape_html(v)
                )
            })
        })
        .collect();
    let details = if details.is_empty() {
        details
    } else {
        format!(r#"<p class="text-xs text-slate-500 mt-1">{details}</p>"#)
    };

    format!(
        r#"<li class="flex items-start space-x-3" data-activity><div class="mt-1 flex-shrink-0">{icon}</div><div class="flex-1"><p class="text-sm font-semibold text-white">{description}</p><p class="text-xs text-slate-500">{when}</p>{details}</div></li>"#,
        icon = icons::activity(item.kind).svg("h-5 w-5"),
        description = escape_html(&item.description),
        when = escape_html(&item.when),
    )
}

fn insights_section(insights: &InsightsSection) -> String {
    let items: String = insights
        .actionable
        .iter()
        .map(|insight| format!("<li>{}</li>", escape_html(insight)))
        .collect();

    format!(
        r#"<div class="bg-slate-800/50 p-6 rounded-lg shadow-lg border border-slate-700" data-section="insights">
        <h2 class="text-2xl font-bold mb-4 text-slate-200">Understanding the Report</h2>
        <h3 class="text-xl font-semibold mb-2 text-slate-300">What Really Matters</h3>
        <p class="text-slate-400 mb-4">{summary}</p>
        <h3 class="text-xl font-semibold mb-2 text-slate-300">Actionable Insights</h3>
        <ul class="list-disc list-inside space-y-1 text-slate-400">{items}</ul>
      </div>"#,
        summary = escape_html(&insights.what_matters),
    )
}

fn task_board(board: &[BoardColumn]) -> String {
    let columns: String = board
        .iter()
        .map(|column| {
            let cards: String = column
                .tasks
                .iter()
                .map(|task| {
                    let assignee = task
                        .assignee
                        .as_deref()
                        .map(|a| {
                            format!(
                                r#"<p class="text-xs text-slate-500 mt-2">Assigned to: <span class="font-medium text-slate-300">{}</span></p>"#,
                                escape_html(a)
                            )
                        })
                        .unwrap_or_default();
                    format!(
                        r#"<div class="bg-slate-900 p-3 rounded-lg border border-slate-700 hover:border-violet-600 transition-colors cursor-pointer" data-task><h4 class="text-md font-bold text-violet-400">{}</h4><p class="text-sm text-slate-400 mt-1">{}</p>{assignee}</div>"#,
                        escape_html(&task.title),
                        escape_html(&task.description),
                    )
                })
                .collect();

            format!(
                r#"<div class="flex-1 min-w-0 bg-slate-800 p-4 rounded-lg shadow-inner" data-column="{label}"><h3 class="text-xl font-semibold mb-4 flex items-center gap-2 text-slate-200">{icon}{label}</h3><div class="space-y-4">{cards}</div></div>"#,
                label = column.column.label(),
                icon = icons::column(column.column).svg("h-5 w-5"),
            )
        })
        .collect();

    format!(
        r#"<div class="bg-slate-800/50 p-6 rounded-lg shadow-lg border border-slate-700" data-section="board">
        <h2 class="text-2xl font-bold mb-6 flex items-center gap-2 text-slate-200">{icon}Task Board</h2>
        <div class="flex flex-col md:flex-row gap-4">{columns}</div>
      </div>"#,
        icon = icons::list_bullet().svg("h-6 w-6"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::scenario_report;
    use crate::report::Report;
    use serde_json::json;

    fn ready(report: Report) -> Dashboard {
        let mut dashboard = Dashboard::new();
        dashboard
            .select_file("review.md", Ok("3 commits merged".to_string()))
            .unwrap();
        let ticket = dashboard.begin_analysis().unwrap();
        dashboard.finish_analysis(ticket, Ok(report)).unwrap();
        dashboard
    }

    fn column_block<'a>(html: &'a str, label: &str) -> &'a str {
        let start = html
            .find(&format!(r#"data-column="{label}""#))
            .expect("column rendered");
        let rest = &html[start..];
        let end = rest[1..].find("data-column=").map_or(rest.len(), |i| i + 1);
        &rest[..end]
    }

    #[test]
    fn test_empty_state_shows_placeholder_only() {
        let html = page(&Dashboard::new(), None);

        assert!(html.contains(r#"data-section="placeholder""#));
        assert!(html.contains("Upload Review File"));
        assert!(!html.contains(r#"data-control="generate""#));
        assert!(!html.contains(r#"data-control="export""#));
        assert!(!html.contains(r#"data-section="error""#));
        assert!(!html.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn test_loaded_state_offers_generate() {
        let mut dashboard = Dashboard::new();
        dashboard
            .select_file("monday <review>.md", Ok("notes".to_string()))
            .unwrap();

        let html = page(&dashboard, None);

        assert!(html.contains(r#"data-control="generate">"#));
        assert!(html.contains("Generate Dashboard"));
        assert!(html.contains("monday &lt;review&gt;.md"));
        assert!(html.contains(r#"data-section="placeholder""#));
    }

    #[test]
    fn test_loading_state_disables_generate_and_refreshes() {
        let mut dashboard = Dashboard::new();
        dashboard
            .select_file("review.md", Ok("notes".to_string()))
            .unwrap();
        let _ticket = dashboard.begin_analysis().unwrap();

        let html = page(&dashboard, None);

        assert!(html.contains(r#"data-control="generate" disabled>"#));
        assert!(html.contains("Analyzing..."));
        assert!(html.contains(r#"data-icon="spinner""#));
        assert!(html.contains(r#"<meta http-equiv="refresh" content="2">"#));
    }

    #[test]
    fn test_error_banner_coexists_with_placeholder() {
        let mut dashboard = Dashboard::new();
        dashboard.begin_analysis().unwrap_err();

        let html = page(&dashboard, None);

        assert!(html.contains(r#"data-section="error""#));
        assert!(html.contains("Please upload a file first."));
        assert!(html.contains(r#"data-section="placeholder""#));
    }

    #[test]
    fn test_notice_is_rendered_and_escaped() {
        let html = page(&Dashboard::new(), Some("No report <data> to export."));

        assert!(html.contains(r#"data-section="notice""#));
        assert!(html.contains("No report &lt;data&gt; to export."));
    }

    #[test]
    fn test_scenario_report_dashboard() {
        let html = page(&ready(scenario_report()), None);

        assert!(html.contains(r#"data-section="report""#));
        assert!(!html.contains(r#"data-section="placeholder""#));
        assert!(html.contains(r#"data-control="export""#));
        assert!(html.contains("Daily Report"));
        assert!(html.contains(r#"data-icon="check-badge""#));
        assert!(!html.contains(r#"data-icon="x-circle""#));
        assert!(html.contains(r#"data-metric="Files Changed Today">3<"#));
        assert!(html.contains(r#"data-metric="Total Commits">3<"#));
        assert!(html.contains(r#"data-metric="New Repositories">0<"#));
        assert_eq!(html.matches("data-activity").count(), 1);
        assert_eq!(html.matches(r#"data-icon="deploy-arrow""#).count(), 1);
        assert!(html.contains("Jan 1, 2024, 10:00 AM UTC"));
        assert_eq!(html.matches("data-column=").count(), 3);
        assert_eq!(html.matches("data-task").count(), 0);
    }

    #[test]
    fn test_failed_ci_shows_fail_glyph() {
        let report = Report::parse(
            &json!({"project_health_status": {"ci_cd_passed": false}}).to_string(),
        )
        .unwrap();

        let html = page(&ready(report), None);

        assert!(html.contains(r#"data-icon="x-circle""#));
    }

    #[test]
    fn test_sparse_report_renders_defaults() {
        let html = page(&ready(Report::parse("{}").unwrap()), None);

        assert!(html.contains("Untitled Report"));
        assert!(html.contains(r#"data-metric="Total Commits">0<"#));
        assert_eq!(html.matches("data-activity").count(), 0);
        assert_eq!(html.matches("data-column=").count(), 3);
    }

    #[test]
    fn test_tasks_land_in_matching_columns() {
        let report = Report::parse(
            &json!({
                "kanban_tasks": [
                    {"title": "Write docs", "description": "", "status": "To Do", "assignee": "ana"},
                    {"title": "Fix flaky test", "description": "", "status": "In Progress", "assignee": ""},
                    {"title": "Ship v1", "description": "", "status": "Done", "assignee": "li"}
                ]
            })
            .to_string(),
        )
        .unwrap();

        let html = page(&ready(report), None);

        assert!(column_block(&html, "To Do").contains("Write docs"));
        assert!(column_block(&html, "In Progress").contains("Fix flaky test"));
        assert!(!column_block(&html, "In Progress").contains("Assigned to"));
        assert!(column_block(&html, "Done").contains("Ship v1"));
        assert!(!column_block(&html, "Done").contains("Write docs"));
    }

    #[test]
    fn test_activity_details_rendered() {
        let report = Report::parse(
            &json!({
                "recent_activity_timeline": [
                    {"type": "deploy", "description": "Prod deploy", "timestamp": "2024-01-01T10:00:00Z",
                     "details": {"branch": "release/2.0", "status": "success"}}
                ]
            })
            .to_string(),
        )
        .unwrap();

        let html = page(&ready(report), None);

        assert!(html.contains("release/2.0"));
        assert!(html.contains("Status: <span"));
    }

    #[test]
    fn test_model_text_is_escaped() {
        let report = Report::parse(
            &json!({"report_title": "<script>alert(1)</script>"}).to_string(),
        )
        .unwrap();

        let html = page(&ready(report), None);

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_page_is_idempotent() {
        let dashboard = ready(scenario_report());

        assert_eq!(page(&dashboard, None), page(&dashboard, None));
    }
}
