use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::report::{ActivityKind, Report, ReportView, TaskColumn};

/// Display-ready tree for one report. Both the interactive page and the
/// static export walk this, so field defaults live here and nowhere else.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSections {
    pub title: String,
    pub summary: String,
    pub health: HealthCard,
    pub metrics: [MetricCounter; 3],
    pub activity: Vec<ActivityItem>,
    pub insights: InsightsSection,
    pub board: [BoardColumn; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealthCard {
    pub passed: bool,
    pub status: String,
    pub deployment: String,
    pub branch: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricCounter {
    pub label: &'static str,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityItem {
    pub kind: ActivityKind,
    pub description: String,
    pub when: String,
    pub branch: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsightsSection {
    pub what_matters: String,
    pub actionable: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardColumn {
    pub column: TaskColumn,
    pub tasks: Vec<TaskCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskCard {
    pub title: String,
    pub description: String,
    pub assignee: Option<String>,
}

const NOT_AVAILABLE: &str = "N/A";

impl ReportSections {
    pub fn build(report: &Report) -> Self {
        Self::from_view(report.view())
    }

    fn from_view(view: ReportView) -> Self {
        let health = view.health;
        let metrics = view.metrics;

        Self {
            title: view.title.unwrap_or_else(|| "Untitled Report".to_string()),
            summary: view
                .summary
                .unwrap_or_else(|| "No project summary provided.".to_string()),
            health: HealthCard {
                passed: health.ci_cd_passed,
                status: health.status_message.unwrap_or_else(not_available),
                deployment: health.deployment_status.unwrap_or_else(not_available),
                branch: health.last_deployed_branch.unwrap_or_else(not_available),
            },
            metrics: [
                MetricCounter {
                    label: "Files Changed Today",
                    value: metrics.files_changed_today,
                },
                MetricCounter {
                    label: "Total Commits",
                    value: metrics.total_commits,
                },
                MetricCounter {
                    label: "New Repositories",
                    value: metrics.new_repositories,
                },
            ],
            activity: view
                .activity_timeline
                .into_iter()
                .map(|event| {
                    let details = event.details.unwrap_or_default();
                    ActivityItem {
                        kind: event.kind,
                        when: format_timestamp(&event.timestamp),
                        description: event.description,
                        branch: details.branch,
                        status: details.status,
                    }
                })
                .collect(),
            insights: InsightsSection {
                what_matters: view
                    .insights
                    .what_matters_summary
                    .unwrap_or_else(|| "No summary provided.".to_string()),
                actionable: view.insights.actionable_insights,
            },
            board: TaskColumn::ALL.map(|column| BoardColumn {
                column,
                tasks: view
                    .tasks
                    .iter()
                    .filter(|task| task.column == Some(column))
                    .map(|task| TaskCard {
                        title: task.title.clone(),
                        description: task.description.clone(),
                        assignee: Some(task.assignee.clone()).filter(|a| !a.is_empty()),
                    })
                    .collect(),
            }),
        }
    }
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// Human-readable event time.
///
/// Pages are rendered server-side, so the viewer's zone is unknown here. The
/// offset the model supplied is shown as-is (`UTC` or `+hh:mm`) instead of
/// converting to the server's local zone.
pub fn format_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "Unknown time".to_string();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        let zone = if dt.offset().local_minus_utc() == 0 {
            "UTC".to_string()
        } else {
            dt.format("%:z").to_string()
        };
        return format!("{} {zone}", dt.format("%b %-d, %Y, %-I:%M %p"));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format("%b %-d, %Y, %-I:%M %p").to_string();
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%b %-d, %Y").to_string();
    }

    raw.to_string()
}
