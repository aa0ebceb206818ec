use crate::view_model::{ProgressLine, RunSummary};

/// Phases of one harvest run, in the order they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    NotStarted,
    AwaitingOperatorStart,
    Discovering,
    AwaitingOperatorConfirmation,
    Iterating,
    Finished,
}

/// Operator checkpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Before discovery: the catalog page and session must be ready.
    Start,
    /// After discovery: the operator has seen the stub count.
    Proceed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    Completed,
    Aborted(Gate),
}

/// Final state of a single attempted item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    Persisted,
    Skipped,
    Failed,
}

/// Run-scoped counters over a fixed, discovery-ordered stub sequence.
///
/// The sequence itself never changes once discovered; exclusions are only
/// counted, so `next` always moves forward by exactly one per finished item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HarvestState {
    phase: RunPhase,
    total: usize,
    next: usize,
    processed: usize,
    skipped: usize,
    failed: usize,
    end: Option<RunEnd>,
}

impl HarvestState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Number of stubs discovered.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn excluded(&self) -> usize {
        self.skipped + self.failed
    }

    pub fn attempted(&self) -> usize {
        self.next
    }

    pub fn end(&self) -> Option<RunEnd> {
        self.end
    }

    /// Index of the stub the run will harvest next, while iterating.
    pub fn next_index(&self) -> Option<usize> {
        (self.phase == RunPhase::Iterating && self.next < self.total).then_some(self.next)
    }

    /// Progress line for the item about to be harvested.
    pub fn progress(&self) -> Option<ProgressLine> {
        self.next_index().map(|index| ProgressLine {
            position: index + 1,
            effective_total: self.total.saturating_sub(self.excluded()),
            excluded: self.excluded(),
        })
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            end: self.end,
            discovered: self.total,
            processed: self.processed,
            skipped: self.skipped,
            failed: self.failed,
        }
    }

    pub(crate) fn enter(&mut self, phase: RunPhase) {
        self.phase = phase;
    }

    pub(crate) fn set_total(&mut self, total: usize) {
        self.total = total;
    }

    pub(crate) fn record(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Persisted => self.processed += 1,
            ItemOutcome::Skipped => self.skipped += 1,
            ItemOutcome::Failed => self.failed += 1,
        }
        self.next += 1;
    }

    pub(crate) fn has_remaining(&self) -> bool {
        self.next < self.total
    }

    pub(crate) fn finish(&mut self, end: RunEnd) {
        self.phase = RunPhase::Finished;
        self.end = Some(end);
    }
}
