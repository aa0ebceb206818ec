use crate::{Gate, RunEnd};

/// Work the runner must perform on behalf of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Block on the operator checkpoint.
    Prompt(Gate),
    /// Read the catalog page and report the stub count.
    Discover,
    /// Extract and persist the stub at `index` of the discovered sequence.
    Harvest { index: usize },
    /// Sleep before the next request.
    Pace(Pace),
    /// The run is over; no further effects follow.
    Finish(RunEnd),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    AfterSuccess,
    AfterExclusion,
}
