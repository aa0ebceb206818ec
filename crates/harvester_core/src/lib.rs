//! Harvester core: pure run state machine and progress views.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, Pace};
pub use msg::Msg;
pub use state::{Gate, HarvestState, ItemOutcome, RunEnd, RunPhase};
pub use update::update;
pub use view_model::{ProgressLine, RunSummary};
