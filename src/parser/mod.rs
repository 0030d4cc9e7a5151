//! Parser module - dispatch by file extension.

pub mod java;
pub mod javadoc;

use crate::model::ParsedClass;
use anyhow::{anyhow, Result};
use std::path::Path;

/// Parse a source file into its declared classes based on its extension.
pub fn parse_file(path: &Path, content: &str) -> Result<Vec<ParsedClass>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("java") => Ok(java::parse(content)),
        _ => Err(anyhow!("unsupported file type: {}", path.display())),
    }
}
