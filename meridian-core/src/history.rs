//! Assessment history persistence
//!
//! Stores weekly ERI assessments under `.meridian/eri_history.json`,
//! sorted by (year, week). Writes are atomic (temp file + rename) and a
//! (year, week) slot is write-once.

use crate::eri::EriAssessment;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// History file schema version
pub const HISTORY_SCHEMA_VERSION: u32 = 1;

/// On-disk history container
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryFile {
    pub schema_version: u32,
    pub assessments: Vec<EriAssessment>,
}

impl HistoryFile {
    fn new() -> Self {
        HistoryFile {
            schema_version: HISTORY_SCHEMA_VERSION,
            assessments: Vec::new(),
        }
    }

    fn from_json(json: &str) -> Result<Self> {
        let history: HistoryFile =
            serde_json::from_str(json).context("failed to deserialize history from JSON")?;

        if history.schema_version != HISTORY_SCHEMA_VERSION {
            anyhow::bail!(
                "history schema version mismatch: expected {}, got {}",
                HISTORY_SCHEMA_VERSION,
                history.schema_version
            );
        }

        Ok(history)
    }

    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize history to JSON")
    }
}

/// Get the path to the `.meridian` directory under the workspace root
pub fn meridian_dir(root: &Path) -> PathBuf {
    root.join(".meridian")
}

/// Get the path to the history file
pub fn history_path(root: &Path) -> PathBuf {
    meridian_dir(root).join("eri_history.json")
}

/// Write data to file atomically using temp file + rename
pub fn atomic_write(path: &Path, contents: &str) -> Result<()> {
    use std::fs;
    use std::io::Write;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file = fs::File::create(&temp_path)
        .with_context(|| format!("failed to create temp file: {}", temp_path.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("failed to write to temp file: {}", temp_path.display()))?;
    file.sync_all()
        .with_context(|| format!("failed to sync temp file: {}", temp_path.display()))?;
    drop(file);

    fs::rename(&temp_path, path)
        .with_context(|| format!("failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

/// Handle on the on-disk assessment history
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Open the history store for a workspace root. No I/O happens until
    /// the first load or append.
    pub fn open(root: &Path) -> Self {
        HistoryStore {
            path: history_path(root),
        }
    }

    /// Load all stored assessments, oldest (year, week) first. A missing
    /// file reads as an empty history.
    pub fn load(&self) -> Result<Vec<EriAssessment>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read history file: {}", self.path.display()))?;
        Ok(HistoryFile::from_json(&json)?.assessments)
    }

    /// Append an assessment. Fails if the (year, week) slot is already
    /// taken; stored history stays sorted by (year, week).
    pub fn append(&self, assessment: &EriAssessment) -> Result<()> {
        let mut history = if self.path.exists() {
            let json = std::fs::read_to_string(&self.path).with_context(|| {
                format!("failed to read history file: {}", self.path.display())
            })?;
            HistoryFile::from_json(&json)?
        } else {
            HistoryFile::new()
        };

        if history
            .assessments
            .iter()
            .any(|a| a.year == assessment.year && a.week_number == assessment.week_number)
        {
            anyhow::bail!(
                "assessment for week {} of {} already recorded",
                assessment.week_number,
                assessment.year
            );
        }

        history.assessments.push(assessment.clone());
        history
            .assessments
            .sort_by_key(|a| (a.year, a.week_number));

        atomic_write(&self.path, &history.to_json()?)
    }

    /// Most recent assessment by (year, week), if any
    pub fn latest(&self) -> Result<Option<EriAssessment>> {
        Ok(self.load()?.into_iter().last())
    }

    /// Second most recent assessment, if any
    pub fn previous(&self) -> Result<Option<EriAssessment>> {
        let mut assessments = self.load()?;
        if assessments.len() < 2 {
            return Ok(None);
        }
        assessments.pop();
        Ok(assessments.pop())
    }

    /// Assessment recorded for an exact (year, week), if any
    pub fn find(&self, year: i32, week_number: u32) -> Result<Option<EriAssessment>> {
        Ok(self
            .load()?
            .into_iter()
            .find(|a| a.year == year && a.week_number == week_number))
    }

    /// Assessment immediately preceding (year, week) in stored order, if
    /// any. The target week itself need not be recorded.
    pub fn before(&self, year: i32, week_number: u32) -> Result<Option<EriAssessment>> {
        Ok(self
            .load()?
            .into_iter()
            .rev()
            .find(|a| (a.year, a.week_number) < (year, week_number)))
    }
}
