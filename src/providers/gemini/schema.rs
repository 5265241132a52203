use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const SYSTEM_PROMPT: &str = "Act as a senior software architect and project manager. \
Your task is to analyze a daily project review document. Provide a comprehensive summary \
and analysis in JSON format to be used in a dashboard. The JSON schema must be followed precisely.";

const USER_PROMPT_PREFIX: &str = "Analyze the following daily project review document and \
generate a dashboard report based on the requested JSON schema. Focus on summarizing key \
activities, identifying major changes or additions, and providing a list of tasks with their \
statuses. The document content is:\n\n";

pub fn user_prompt(document: &str) -> String {
    format!("{USER_PROMPT_PREFIX}{document}")
}

/// Response schema handed to the model. Mirrors the wire names read by `Report::view`.
pub fn report_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "report_title": { "type": "STRING" },
            "project_summary": { "type": "STRING" },
            "project_health_status": {
                "type": "OBJECT",
                "properties": {
                    "status_message": { "type": "STRING" },
                    "ci_cd_passed": { "type": "BOOLEAN" },
                    "deployment_status": { "type": "STRING" },
                    "last_deployed_branch": { "type": "STRING" }
                },
                "required": ["status_message", "ci_cd_passed", "deployment_status", "last_deployed_branch"]
            },
            "key_metrics": {
                "type": "OBJECT",
                "properties": {
                    "files_changed_today": { "type": "NUMBER" },
                    "total_commits": { "type": "NUMBER" },
                    "new_repositories": { "type": "NUMBER" }
                },
                "required": ["files_changed_today", "total_commits", "new_repositories"]
            },
            "recent_activity_timeline": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "type": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "timestamp": { "type": "STRING" },
                        "details": {
                            "type": "OBJECT",
                            "properties": {
                                "branch": { "type": "STRING" },
                                "status": { "type": "STRING" }
                            }
                        }
                    },
                    "required": ["type", "description", "timestamp"]
                }
            },
            "kanban_tasks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "status": { "type": "STRING" },
                        "assignee": { "type": "STRING" }
                    },
                    "required": ["title", "description", "status", "assignee"]
                }
            },
            "understanding_the_report": {
                "type": "OBJECT",
                "properties": {
                    "what_matters_summary": { "type": "STRING" },
                    "actionable_insights": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" }
                    }
                },
                "required": ["what_matters_summary", "actionable_insights"]
            }
        },
        "required": crate::report::REQUIRED_FIELDS
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    pub fn for_document(document: &str) -> Self {
        Self {
            system_instruction: Content::text(None, SYSTEM_PROMPT),
            contents: vec![Content::text(Some("user"), user_prompt(document))],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: report_schema(),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, or `None` when it carries nothing usable.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        (!text.trim().is_empty()).then_some(text)
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
}
