use std::path::{Path, PathBuf};

use botlists_core::BotProfile;
use serde_json::json;

use crate::store::{AtomicFileWriter, StoreError};

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_filename: String,
    pub manifest_filename: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_filename: "bots.json".to_string(),
            manifest_filename: Some("manifest.json".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub profile_count: usize,
    pub output_path: PathBuf,
    pub manifest_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("write error: {0}")]
    Write(#[from] StoreError),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Writes `profiles` as pretty JSON, plus an optional manifest, into `output_dir`.
pub fn export_profiles(
    output_dir: &Path,
    profiles: &[BotProfile],
    list_count: usize,
    generated_utc: &str,
    options: ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let writer = AtomicFileWriter::new(output_dir.to_path_buf());

    let body = serde_json::to_string_pretty(profiles)?;
    let output_path = writer.write(&options.output_filename, &body)?;

    let manifest_path = match options.manifest_filename {
        Some(name) => {
            let manifest = json!({
                "profile_count": profiles.len(),
                "list_count": list_count,
                "generated_utc": generated_utc,
                "output": options.output_filename,
            });
            Some(writer.write(&name, &manifest.to_string())?)
        }
        None => None,
    };

    Ok(ExportSummary {
        profile_count: profiles.len(),
        output_path,
        manifest_path,
    })
}
