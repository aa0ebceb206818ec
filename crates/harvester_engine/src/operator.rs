/// Answer at an operator checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    Continue,
    Abort,
}

/// The human (or script) gating a run before discovery and before iteration.
#[async_trait::async_trait]
pub trait Operator: Send {
    /// Called once the browser shows the catalog page, before it is read.
    async fn ready_to_discover(&mut self) -> Checkpoint;

    /// Called with the number of discovered stubs, before any is visited.
    async fn proceed_with(&mut self, discovered: usize) -> Checkpoint;
}

/// Confirms both checkpoints without asking.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

#[async_trait::async_trait]
impl Operator for AutoConfirm {
    async fn ready_to_discover(&mut self) -> Checkpoint {
        Checkpoint::Continue
    }

    async fn proceed_with(&mut self, _discovered: usize) -> Checkpoint {
        Checkpoint::Continue
    }
}
