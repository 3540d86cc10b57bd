use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::group::{Decision, DecisionKind, SkipReason};
use crate::OrganizeResult;

/// One line of the decision log, with paths relative to the source directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionRecord {
    pub photo: String,
    pub kind: DecisionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SkipReason>,
}

impl DecisionRecord {
    pub fn new(decision: &Decision, source_dir: &Path) -> Self {
        let target = decision.target().map(|dest| {
            dest.strip_prefix(source_dir)
                .unwrap_or(dest)
                .to_string_lossy()
                .replace('\\', "/")
        });
        let reason = match decision {
            Decision::MoveSkipped { reason, .. } => Some(*reason),
            _ => None,
        };
        Self {
            photo: decision.photo().file_name.clone(),
            kind: decision.kind(),
            target,
            reason,
        }
    }
}

#[derive(Serialize)]
struct RunReport<'a> {
    simulate: bool,
    source_dir: String,
    decisions: &'a [DecisionRecord],
    summary: &'a OrganizeResult,
}

/// Write the decision log and summary of a run as pretty JSON.
pub fn write_report(result: &OrganizeResult, source_dir: &Path, simulate: bool, report_path: &Path) -> Result<()> {
    let report = RunReport {
        simulate,
        source_dir: source_dir.display().to_string(),
        decisions: &result.decisions,
        summary: result,
    };

    let file = std::fs::File::create(report_path).map_err(|e| Error::filesystem("create report", report_path, e))?;
    serde_json::to_writer_pretty(file, &report)
        .map_err(|e| Error::filesystem("write report", report_path, e.into()))?;

    Ok(())
}
