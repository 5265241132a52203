use crate::report::{ActivityKind, TaskColumn};

const CHECK_BADGE: &str = r#"<path fill-rule="evenodd" d="M2.25 12c0-5.385 4.365-9.75 9.75-9.75s9.75 4.365 9.75 9.75-4.365 9.75-9.75 9.75S2.25 17.385 2.25 12zm13.36-1.815a.75.75 0 01.99 1.144l-3 2.5a.75.75 0 01-1.059.055l-1.5-1.5a.75.75 0 011.06-1.06l1.01 1.01 2.489-2.073z" clip-rule="evenodd" />"#;

const X_CIRCLE: &str = r#"<path fill-rule="evenodd" d="M12 2.25c-5.385 0-9.75 4.365-9.75 9.75s4.365 9.75 9.75 9.75 9.75-4.365 9.75-9.75S17.385 2.25 12 2.25zm-1.72 6.97a.75.75 0 10-1.06 1.06L10.94 12l-1.72 1.72a.75.75 0 101.06 1.06L12 13.06l1.72 1.72a.75.75 0 101.06-1.06L13.06 12l1.72-1.72a.75.75 0 10-1.06-1.06L12 10.94l-1.72-1.72z" clip-rule="evenodd" />"#;

const CODE_BRACKET: &str = r#"<path fill-rule="evenodd" d="M14.47 2.47a.75.75 0 011.06 0l6 6a.75.75 0 010 1.06l-6 6a.75.75 0 01-1.06-1.06L19.94 12 14.47 6.53a.75.75 0 010-1.06z" clip-rule="evenodd" /><path fill-rule="evenodd" d="M9.53 2.47a.75.75 0 00-1.06 0l-6 6a.75.75 0 000 1.06l6 6a.75.75 0 001.06-1.06L4.06 12l5.47-5.47a.75.75 0 000-1.06z" clip-rule="evenodd" />"#;

const DOCUMENT: &str = r#"<path d="M5.625 1.5c-1.036 0-1.875.84-1.875 1.875v17.25c0 1.035.84 1.875 1.875 1.875h12.75c1.035 0 1.875-.84 1.875-1.875V12.75A3.75 3.75 0 0016.5 9h-1.875a.375.375 0 01-.375-.375V6.75A3.75 3.75 0 0010.5 3h-4.875z" /><path d="M14.25 1.5a.75.75 0 00-.75.75v4.5a.75.75 0 00.75.75h4.5a.75.75 0 000-1.5h-3.75V2.25a.75.75 0 00-.75-.75z" />"#;

const ARROW_RIGHT: &str = r#"<path fill-rule="evenodd" d="M12.97 3.97a.75.75 0 011.06 0l7.5 7.5a.75.75 0 010 1.06l-7.5 7.5a.75.75 0 11-1.06-1.06l6.22-6.22H3a.75.75 0 010-1.5h16.19l-6.22-6.22a.75.75 0 010-1.06z" clip-rule="evenodd" />"#;

const FOLDER_PLUS: &str = r#"<path fill-rule="evenodd" d="M19.5 21a3 3 0 003-3V9a3 3 0 00-3-3h-5.379a.75.75 0 01-.53-.22L11.47 3.66A2.25 2.25 0 009.879 3H4.5a3 3 0 00-3 3v12a3 3 0 003 3h15zM12 9a.75.75 0 01.75.75v2.25H15a.75.75 0 010 1.5h-2.25v2.25a.75.75 0 01-1.5 0V13.5H9a.75.75 0 010-1.5h2.25V9.75A.75.75 0 0112 9z" clip-rule="evenodd" />"#;

const SPARKLES: &str = r#"<path fill-rule="evenodd" d="M9 4.5a.75.75 0 01.721.544l.813 2.846a3.75 3.75 0 002.576 2.576l2.846.813a.75.75 0 010 1.442l-2.846.813a3.75 3.75 0 00-2.576 2.576l-.813 2.846a.75.75 0 01-1.442 0l-.813-2.846a3.75 3.75 0 00-2.576-2.576l-2.846-.813a.75.75 0 010-1.442l2.846-.813A3.75 3.75 0 007.466 7.89l.813-2.846A.75.75 0 019 4.5z" clip-rule="evenodd" />"#;

const LIST_BULLET: &str = r#"<path fill-rule="evenodd" d="M2.625 6.75a1.125 1.125 0 112.25 0 1.125 1.125 0 01-2.25 0zm4.875 0A.75.75 0 018.25 6h12a.75.75 0 010 1.5h-12a.75.75 0 01-.75-.75zM2.625 12a1.125 1.125 0 112.25 0 1.125 1.125 0 01-2.25 0zM7.5 12a.75.75 0 01.75-.75h12a.75.75 0 010 1.5h-12A.75.75 0 017.5 12zm-4.875 5.25a1.125 1.125 0 112.25 0 1.125 1.125 0 01-2.25 0zm4.875 0a.75.75 0 01.75-.75h12a.75.75 0 010 1.5h-12a.75.75 0 01-.75-.75z" clip-rule="evenodd" />"#;

const CLOCK: &str = r#"<path fill-rule="evenodd" d="M12 2.25c-5.385 0-9.75 4.365-9.75 9.75s4.365 9.75 9.75 9.75 9.75-4.365 9.75-9.75S17.385 2.25 12 2.25zM12.75 6a.75.75 0 00-1.5 0v6c0 .414.336.75.75.75h4.5a.75.75 0 000-1.5h-3.75V6z" clip-rule="evenodd" />"#;

/// Glyph plus the colour class that goes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub name: &'static str,
    pub color: &'static str,
    paths: &'static str,
}

impl Glyph {
    /// Inline SVG; `size` is a class list such as `"h-5 w-5"`.
    pub fn svg(&self, size: &str) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="currentColor" class="{size} {color}" data-icon="{name}" aria-hidden="true">{paths}</svg>"#,
            color = self.color,
            name = self.name,
            paths = self.paths,
        )
    }
}

pub fn health(passed: bool) -> Glyph {
    if passed {
        Glyph {
            name: "check-badge",
            color: "text-green-400",
            paths: CHECK_BADGE,
        }
    } else {
        Glyph {
            name: "x-circle",
            color: "text-red-500",
            paths: X_CIRCLE,
        }
    }
}

pub fn activity(kind: ActivityKind) -> Glyph {
    match kind {
        ActivityKind::Commit => Glyph {
            name: "code-bracket",
            color: "text-violet-400",
            paths: CODE_BRACKET,
        },
        ActivityKind::FileChange => Glyph {
            name: "document-text",
            color: "text-gray-400",
            paths: DOCUMENT,
        },
        ActivityKind::Deploy => Glyph {
            name: "deploy-arrow",
            color: "text-sky-400",
            paths: ARROW_RIGHT,
        },
        ActivityKind::NewRepo => Glyph {
            name: "folder-plus",
            color: "text-lime-400",
            paths: FOLDER_PLUS,
        },
        ActivityKind::Unknown => sparkles(),
    }
}

pub fn column(column: TaskColumn) -> Glyph {
    match column {
        TaskColumn::ToDo => list_bullet(),
        TaskColumn::InProgress => Glyph {
            name: "clock",
            color: "text-yellow-400",
            paths: CLOCK,
        },
        TaskColumn::Done => Glyph {
            name: "check-circle",
            color: "text-green-400",
            paths: CHECK_BADGE,
        },
    }
}

pub fn sparkles() -> Glyph {
    Glyph {
        name: "sparkles",
        color: "text-white",
        paths: SPARKLES,
    }
}

pub fn list_bullet() -> Glyph {
    Glyph {
        name: "list-bullet",
        color: "text-gray-400",
        paths: LIST_BULLET,
    }
}

pub fn document() -> Glyph {
    Glyph {
        name: "document-text",
        color: "text-white",
        paths: DOCUMENT,
    }
}
