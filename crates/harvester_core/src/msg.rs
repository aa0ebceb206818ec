use crate::{Gate, ItemOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Session is up and the browser sits on the catalog page.
    Launched,
    /// Operator confirmed the checkpoint.
    OperatorContinued(Gate),
    /// Operator chose to stop at the checkpoint.
    OperatorAborted(Gate),
    /// Discovery finished with this many accepted stubs.
    Discovered { count: usize },
    /// Item at `index` reached a final outcome.
    ItemDone { index: usize, outcome: ItemOutcome },
    /// Fallback for placeholder wiring.
    NoOp,
}
