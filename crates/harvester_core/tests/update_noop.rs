use harvester_core::{update, Gate, HarvestState, ItemOutcome, Msg, RunPhase};

#[test]
fn update_is_noop() {
    let state = HarvestState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn out_of_phase_messages_are_ignored() {
    let state = HarvestState::new();
    for msg in [
        Msg::OperatorContinued(Gate::Start),
        Msg::OperatorAborted(Gate::Proceed),
        Msg::Discovered { count: 3 },
        Msg::ItemDone {
            index: 0,
            outcome: ItemOutcome::Persisted,
        },
    ] {
        let (next, effects) = update(state.clone(), msg);
        assert_eq!(next.phase(), RunPhase::NotStarted);
        assert_eq!(next, state);
        assert!(effects.is_empty());
    }
}

#[test]
fn wrong_gate_answer_is_ignored() {
    let (state, _) = update(HarvestState::new(), Msg::Launched);
    let (next, effects) = update(state.clone(), Msg::OperatorContinued(Gate::Proceed));

    assert_eq!(next, state);
    assert!(effects.is_empty());
}
