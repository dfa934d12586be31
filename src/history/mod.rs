use crate::contract::MemberKind;
use crate::logging;
use crate::runtime::session::MockSession;
use crate::{MockError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// One recorded call, rendered for humans and tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEntry {
    pub sequence: u64,
    pub kind: MemberKind,
    pub member: String,
    pub arguments: Vec<String>,
}

/// Serializable snapshot of a session's call history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryReport {
    pub contract: String,
    pub calls: Vec<CallEntry>,
}

impl HistoryReport {
    pub fn from_session(session: &MockSession) -> Self {
        let calls = session
            .history()
            .into_iter()
            .map(|record| CallEntry {
                sequence: record.sequence,
                kind: record.member.kind(),
                member: record.member.name().to_string(),
                arguments: record.args.iter().map(|value| format!("{:?}", value)).collect(),
            })
            .collect();
        Self {
            contract: session.contract().name().to_string(),
            calls,
        }
    }

    /// Calls of one member, optionally restricted to an accessor kind.
    pub fn filter(&self, member: &str, kind: Option<MemberKind>) -> Vec<&CallEntry> {
        self.calls
            .iter()
            .filter(|entry| {
                let match_member = entry.member == member;
                let match_kind = match kind {
                    Some(k) => entry.kind == k,
                    None => true,
                };
                match_member && match_kind
            })
            .collect()
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| {
            MockError::Report(format!("Failed to create report file {:?}: {}", path, e))
        })?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(|e| {
            MockError::Report(format!("Failed to write report file {:?}: {}", path, e))
        })?;
        logging::log_history_exported(&path.display().to_string(), self.calls.len());
        Ok(())
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            MockError::Report(format!("Failed to open report file {:?}: {}", path, e))
        })?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| {
            MockError::Report(format!("Failed to parse report file {:?}: {}", path, e))
        })
    }
}
