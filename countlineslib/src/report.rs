//! Report formatting shared by the CLI and the HTTP API.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::stats::CountResult;
use crate::Result;

/// Percentage breakdown of the counted lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub code: f64,
    pub comment: f64,
    pub blank: f64,
}

/// The outcome of one counting run, ready for display.
///
/// Field names and order match the JSON body of `GET /api/count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountReport {
    pub total_files: u64,
    pub total_lines: u64,
    pub code_lines: u64,
    pub comment_lines: u64,
    pub blank_lines: u64,
    /// Elapsed seconds, rounded to milliseconds and written as `S.SSS`
    #[serde(serialize_with = "serialize_seconds")]
    pub processing_time: f64,
    pub target_path: String,
}

/// Write seconds with exactly three decimals, e.g. `0.000` or `1.250`.
fn serialize_seconds<S>(seconds: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let raw =
        RawValue::from_string(format!("{seconds:.3}")).map_err(serde::ser::Error::custom)?;
    raw.serialize(serializer)
}

impl CountReport {
    /// Build a report from a finished traversal.
    pub fn new(result: &CountResult, target_path: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            total_files: result.file_count,
            total_lines: result.lines(),
            code_lines: result.code(),
            comment_lines: result.comment(),
            blank_lines: result.blank(),
            processing_time: (elapsed.as_secs_f64() * 1000.0).round() / 1000.0,
            target_path: target_path.into(),
        }
    }

    /// Percentages of the total line count, or `None` when nothing was counted.
    pub fn breakdown(&self) -> Option<Breakdown> {
        if self.total_lines == 0 {
            return None;
        }
        let total = self.total_lines as f64;
        Some(Breakdown {
            code: self.code_lines as f64 / total * 100.0,
            comment: self.comment_lines as f64 / total * 100.0,
            blank: self.blank_lines as f64 / total * 100.0,
        })
    }

    /// Compact JSON, as served by the HTTP API.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON for terminal output.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for CountReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Code Line Count Results ===")?;
        writeln!(f, "Target: {}", self.target_path)?;
        writeln!(f, "Files processed: {}", self.total_files)?;
        writeln!(f, "Total lines: {}", self.total_lines)?;
        writeln!(f, "Code lines: {}", self.code_lines)?;
        writeln!(f, "Comment lines: {}", self.comment_lines)?;
        writeln!(f, "Blank lines: {}", self.blank_lines)?;

        if let Some(breakdown) = self.breakdown() {
            writeln!(f)?;
            writeln!(f, "Breakdown:")?;
            writeln!(f, "Code:     {:.1}%", breakdown.code)?;
            writeln!(f, "Comments: {:.1}%", breakdown.comment)?;
            writeln!(f, "Blank:    {:.1}%", breakdown.blank)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "Processing completed in {:.3} seconds",
            self.processing_time
        )
    }
}
