//! Report rendering.
//!
//! [`sections`] turns a report into a display tree; [`interactive`] draws the
//! live dashboard page from it and [`export`] the standalone download.

pub mod export;
pub mod icons;
pub mod interactive;
pub mod sections;

pub use sections::ReportSections;

pub(crate) const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub(crate) const FONT_LINKS: &str = r#"<link rel="preconnect" href="https://fonts.googleapis.com">
  <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
  <link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&display=swap" rel="stylesheet">
  <style> body { font-family: 'Inter', sans-serif; } </style>"#;

pub(crate) fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
