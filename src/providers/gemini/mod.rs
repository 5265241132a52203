mod analyzer;
mod client;
mod schema;

pub use analyzer::{GeminiAnalyzer, GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
