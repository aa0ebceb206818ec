use std::collections::VecDeque;

use engine_logging::{engine_error, engine_info, engine_warn};
use harvester_core::{update, Effect, Gate, HarvestState, ItemOutcome, Msg, RunSummary};
use tokio::time::sleep;

use crate::discover::discover;
use crate::extract::ContentExtractor;
use crate::navigator::Navigator;
use crate::operator::{Checkpoint, Operator};
use crate::persist::RecordWriter;
use crate::{ArticleStub, Extraction, HarvestError, HarvestSettings};

/// Runs one harvest: executes the effects `harvester_core::update` asks for
/// and feeds the results back as messages.
///
/// The navigator is borrowed, not owned; the caller shuts it down whatever
/// `run` returns.
pub struct Harvester<'a> {
    navigator: &'a mut dyn Navigator,
    operator: &'a mut dyn Operator,
    writer: RecordWriter,
    extractor: ContentExtractor,
    settings: HarvestSettings,
}

impl<'a> Harvester<'a> {
    pub fn new(
        navigator: &'a mut dyn Navigator,
        operator: &'a mut dyn Operator,
        writer: RecordWriter,
        settings: HarvestSettings,
    ) -> Self {
        Self {
            navigator,
            operator,
            writer,
            extractor: ContentExtractor::new(&settings),
            settings,
        }
    }

    pub async fn run(mut self) -> Result<RunSummary, HarvestError> {
        self.navigator
            .navigate(&self.settings.catalog_url)
            .await
            .map_err(HarvestError::Catalog)?;

        // Fixed once discovered; exclusions are counted in `state`, never
        // removed from here.
        let mut stubs: Vec<ArticleStub> = Vec::new();
        let mut pending = VecDeque::new();
        let (mut state, effects) = update(HarvestState::new(), Msg::Launched);
        pending.extend(effects);

        while let Some(effect) = pending.pop_front() {
            let msg = match effect {
                Effect::Prompt(Gate::Start) => {
                    checkpoint_msg(Gate::Start, self.operator.ready_to_discover().await)
                }
                Effect::Prompt(Gate::Proceed) => {
                    let answer = self.operator.proceed_with(state.total()).await;
                    if answer == Checkpoint::Continue && state.total() > 0 {
                        engine_info!("Harvesting articles. This may take a while.");
                    }
                    checkpoint_msg(Gate::Proceed, answer)
                }
                Effect::Discover => {
                    stubs = discover(&mut *self.navigator, &self.settings).await?;
                    Msg::Discovered { count: stubs.len() }
                }
                Effect::Harvest { index } => {
                    let Some(stub) = stubs.get(index) else {
                        engine_error!("No stub at index {} of {}", index, stubs.len());
                        break;
                    };
                    if let Some(progress) = state.progress() {
                        engine_info!("{}", progress);
                    }
                    let outcome = self.harvest_one(stub).await;
                    Msg::ItemDone { index, outcome }
                }
                Effect::Pace(pace) => {
                    sleep(self.settings.pacing.delay(pace)).await;
                    continue;
                }
                Effect::Finish(_) => break,
            };
            let (next, effects) = update(state, msg);
            state = next;
            pending.extend(effects);
        }

        let summary = state.summary();
        engine_info!("{}", summary);
        Ok(summary)
    }

    async fn harvest_one(&mut self, stub: &ArticleStub) -> ItemOutcome {
        match self.extractor.extract(&mut *self.navigator, stub).await {
            Extraction::Content(content) => {
                match self.writer.persist(&stub.with_content(content)) {
                    Ok(path) => {
                        engine_info!("Saved {:?} to {}", stub.title, path.display());
                        ItemOutcome::Persisted
                    }
                    Err(err) => {
                        engine_error!(
                            "Could not save article {:?} from {}: {}",
                            stub.title,
                            stub.url,
                            err
                        );
                        ItemOutcome::Failed
                    }
                }
            }
            Extraction::Skip => {
                engine_info!("Skipping unwanted article {:?} at {}", stub.title, stub.url);
                ItemOutcome::Skipped
            }
            Extraction::Failure(kind) => {
                engine_warn!(
                    "Failed to harvest {:?} at {}: {}",
                    stub.title,
                    stub.url,
                    kind
                );
                ItemOutcome::Failed
            }
        }
    }
}

fn checkpoint_msg(gate: Gate, answer: Checkpoint) -> Msg {
    match answer {
        Checkpoint::Continue => Msg::OperatorContinued(gate),
        Checkpoint::Abort => {
            engine_info!("Operator stopped the run at the {:?} checkpoint", gate);
            Msg::OperatorAborted(gate)
        }
    }
}
