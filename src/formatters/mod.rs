pub mod json_artifacts;
pub mod markdown_report;

pub use json_artifacts::{ArtifactPaths, JsonArtifactWriter};
pub use markdown_report::MarkdownReportFormatter;
