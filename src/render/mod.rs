//! Output format implementations for crawled schemas.

mod json;
mod mermaid;

pub use json::render_json;
pub use mermaid::{escape_type, render_mermaid, to_mermaid};

use crate::error::Result;
use crate::schema::DatabaseSchema;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Output format for a crawled schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Mermaid erDiagram markup
    #[default]
    Mermaid,
    /// The canonical model as JSON
    Json,
}

impl OutputFormat {
    /// Write `schema` to `sink` in this format
    pub fn render<W: Write>(&self, schema: &DatabaseSchema, sink: W) -> Result<()> {
        match self {
            OutputFormat::Mermaid => render_mermaid(schema, sink),
            OutputFormat::Json => render_json(schema, sink),
        }
    }

    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Mermaid => "mmd",
            OutputFormat::Json => "json",
        }
    }

    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "mmd" | "mermaid" | "md" => Some(OutputFormat::Mermaid),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mermaid" | "mmd" => Ok(OutputFormat::Mermaid),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown format: {}. Valid options: mermaid, json",
                s
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Mermaid => write!(f, "mermaid"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("mermaid".parse::<OutputFormat>().unwrap(), OutputFormat::Mermaid);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("dot".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_extension("mmd"), Some(OutputFormat::Mermaid));
        assert_eq!(OutputFormat::from_extension("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_extension("png"), None);
        assert_eq!(OutputFormat::Json.extension(), "json");
    }
}
