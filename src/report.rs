use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level keys the model is constrained to emit.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "report_title",
    "project_summary",
    "project_health_status",
    "key_metrics",
    "recent_activity_timeline",
    "kanban_tasks",
    "understanding_the_report",
];

/// A report exactly as the model returned it.
///
/// The payload is kept as parsed JSON and never checked against the schema;
/// renderers read it through [`Report::view`], which applies field defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report(Value);

impl Report {
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text).map(Self)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Required top-level keys absent from the payload.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|key| self.0.get(key).map_or(true, Value::is_null))
            .collect()
    }

    pub fn view(&self) -> ReportView {
        ReportView::from_value(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Commit,
    FileChange,
    Deploy,
    NewRepo,
    Unknown,
}

impl ActivityKind {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "commit" => Self::Commit,
            "file_change" => Self::FileChange,
            "deploy" => Self::Deploy,
            "new_repo" => Self::NewRepo,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskColumn {
    ToDo,
    InProgress,
    Done,
}

impl TaskColumn {
    pub const ALL: [TaskColumn; 3] = [Self::ToDo, Self::InProgress, Self::Done];

    pub fn label(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.label() == value)
    }
}

/// Typed, defaulted reading of a [`Report`]. Shared by both renderers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportView {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub health: HealthStatus,
    pub metrics: KeyMetrics,
    pub activity_timeline: Vec<ActivityEvent>,
    pub tasks: Vec<KanbanTask>,
    pub insights: Insights,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealthStatus {
    pub status_message: Option<String>,
    pub ci_cd_passed: bool,
    pub deployment_status: Option<String>,
    pub last_deployed_branch: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyMetrics {
    pub files_changed_today: u64,
    pub total_commits: u64,
    pub new_repositories: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEvent {
    pub kind: ActivityKind,
    pub description: String,
    pub timestamp: String,
    pub details: Option<ActivityDetails>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityDetails {
    pub branch: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KanbanTask {
    pub title: String,
    pub description: String,
    /// `None` when the model used a status outside the three board columns.
    pub column: Option<TaskColumn>,
    pub assignee: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insights {
    pub what_matters_summary: Option<String>,
    pub actionable_insights: Vec<String>,
}

impl ReportView {
    fn from_value(root: &Value) -> Self {
        let health = object(root, "project_health_status");
        let metrics = object(root, "key_metrics");
        let insights = object(root, "understanding_the_report");

        Self {
            title: text(root, "report_title"),
            summary: text(root, "project_summary"),
            health: HealthStatus {
                status_message: health.and_then(|h| text_in(h, "status_message")),
                ci_cd_passed: health
                    .and_then(|h| h.get("ci_cd_passed"))
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                deployment_status: health.and_then(|h| text_in(h, "deployment_status")),
                last_deployed_branch: health.and_then(|h| text_in(h, "last_deployed_branch")),
            },
            metrics: KeyMetrics {
                files_changed_today: metrics.map_or(0, |m| counter(m, "files_changed_today")),
                total_commits: metrics.map_or(0, |m| counter(m, "total_commits")),
                new_repositories: metrics.map_or(0, |m| counter(m, "new_repositories")),
            },
            activity_timeline: objects(root, "recent_activity_timeline")
                .map(activity_event)
                .collect(),
            tasks: objects(root, "kanban_tasks").map(kanban_task).collect(),
            insights: Insights {
                what_matters_summary: insights.and_then(|i| text_in(i, "what_matters_summary")),
                actionable_insights: insights
                    .and_then(|i| i.get("actionable_insights"))
                    .and_then(Value::as_array)
                    .map(|items| items.iter().filter_map(scalar_text).collect())
                    .unwrap_or_default(),
            },
        }
    }
}

fn activity_event(item: &Map<String, Value>) -> ActivityEvent {
    let details = item
        .get("details")
        .and_then(Value::as_object)
        .map(|d| ActivityDetails {
            branch: text_in(d, "branch"),
            status: text_in(d, "status"),
        })
        .filter(|d| d.branch.is_some() || d.status.is_some());

    ActivityEvent {
        kind: text_in(item, "type").map_or(ActivityKind::Unknown, |k| ActivityKind::from_wire(&k)),
        description: text_in(item, "description").unwrap_or_default(),
        timestamp: text_in(item, "timestamp").unwrap_or_default(),
        details,
    }
}

fn kanban_task(item: &Map<String, Value>) -> KanbanTask {
    KanbanTask {
        title: text_in(item, "title").unwrap_or_default(),
        description: text_in(item, "description").unwrap_or_default(),
        column: text_in(item, "status").and_then(|s| TaskColumn::from_label(&s)),
        assignee: text_in(item, "assignee").unwrap_or_default(),
    }
}

fn object<'a>(value: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    value.get(key).and_then(Value::as_object)
}

// Non-object members are skipped
fn objects<'a>(value: &'a Value, key: &str) -> impl Iterator<Item = &'a Map<String, Value>> {
    value
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

fn text(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(scalar_text)
}

fn text_in(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(scalar_text)
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };

    (!text.is_empty()).then_some(text)
}

fn counter(map: &Map<String, Value>, key: &str) -> u64 {
    match map.get(key) {
        Some(Value::Number(n)) => n.as_u64().unwrap_or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map_or(0, |f| {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let truncated = f as u64;
                    truncated
                })
        }),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
