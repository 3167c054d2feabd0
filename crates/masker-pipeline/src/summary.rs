use serde::Serialize;

use crate::detect::FileType;

/// Counters reported at the end of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub file_type: FileType,
    /// Records written to the output
    pub records: u64,
    pub masked_values: u64,
    /// Records dropped because they could not be processed
    pub skipped: u64,
    /// Run stopped early on interrupt
    pub interrupted: bool,
}

impl Summary {
    pub fn new(file_type: FileType) -> Self {
        Self {
            file_type,
            records: 0,
            masked_values: 0,
            skipped: 0,
            interrupted: false,
        }
    }

    pub(crate) fn record_written(&mut self, masked: usize) {
        self.records += 1;
        self.masked_values += masked as u64;
    }

    pub(crate) fn record_skipped(&mut self, line: u64, reason: &str) {
        self.skipped += 1;
        tracing::warn!(line, reason, "Skipping malformed record");
    }
}
