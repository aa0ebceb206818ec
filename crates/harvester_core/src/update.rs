use crate::{Effect, Gate, HarvestState, ItemOutcome, Msg, Pace, RunEnd, RunPhase};

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that do not fit the current phase leave the state untouched and
/// produce no effects.
pub fn update(mut state: HarvestState, msg: Msg) -> (HarvestState, Vec<Effect>) {
    let effects = match (state.phase(), msg) {
        (RunPhase::NotStarted, Msg::Launched) => {
            state.enter(RunPhase::AwaitingOperatorStart);
            vec![Effect::Prompt(Gate::Start)]
        }
        (RunPhase::AwaitingOperatorStart, Msg::OperatorContinued(Gate::Start)) => {
            state.enter(RunPhase::Discovering);
            vec![Effect::Discover]
        }
        (RunPhase::Discovering, Msg::Discovered { count }) => {
            state.set_total(count);
            state.enter(RunPhase::AwaitingOperatorConfirmation);
            vec![Effect::Prompt(Gate::Proceed)]
        }
        (RunPhase::AwaitingOperatorConfirmation, Msg::OperatorContinued(Gate::Proceed)) => {
            state.enter(RunPhase::Iterating);
            next_or_finish(&mut state, Vec::new())
        }
        (RunPhase::AwaitingOperatorStart, Msg::OperatorAborted(Gate::Start))
        | (RunPhase::AwaitingOperatorConfirmation, Msg::OperatorAborted(Gate::Proceed)) => {
            let gate = if state.phase() == RunPhase::AwaitingOperatorStart {
                Gate::Start
            } else {
                Gate::Proceed
            };
            state.finish(RunEnd::Aborted(gate));
            vec![Effect::Finish(RunEnd::Aborted(gate))]
        }
        (RunPhase::Iterating, Msg::ItemDone { index, outcome })
            if state.next_index() == Some(index) =>
        {
            state.record(outcome);
            let pace = match outcome {
                ItemOutcome::Persisted => Pace::AfterSuccess,
                ItemOutcome::Skipped | ItemOutcome::Failed => Pace::AfterExclusion,
            };
            next_or_finish(&mut state, vec![Effect::Pace(pace)])
        }
        _ => Vec::new(),
    };

    (state, effects)
}

fn next_or_finish(state: &mut HarvestState, mut effects: Vec<Effect>) -> Vec<Effect> {
    if state.has_remaining() {
        effects.push(Effect::Harvest {
            index: state.attempted(),
        });
    } else {
        state.finish(RunEnd::Completed);
        effects.push(Effect::Finish(RunEnd::Completed));
    }
    effects
}
