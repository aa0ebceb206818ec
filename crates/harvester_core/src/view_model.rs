use std::fmt;

use crate::RunEnd;

/// Per-item progress, counted against the work left once known exclusions are
/// taken out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressLine {
    /// 1-based position in the discovered sequence.
    pub position: usize,
    pub effective_total: usize,
    pub excluded: usize,
}

impl fmt::Display for ProgressLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Harvesting article {} of {}, {} excluded",
            self.position, self.effective_total, self.excluded
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// `None` while the run is still in progress.
    pub end: Option<RunEnd>,
    pub discovered: usize,
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn excluded(&self) -> usize {
        self.skipped + self.failed
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = match self.end {
            Some(RunEnd::Completed) => "completed",
            Some(RunEnd::Aborted(_)) => "aborted by operator",
            None => "in progress",
        };
        write!(
            f,
            "run {end}: {} discovered, {} persisted, {} excluded ({} skipped, {} failed)",
            self.discovered,
            self.processed,
            self.excluded(),
            self.skipped,
            self.failed
        )
    }
}
