//! Terminal checkpoints: the operator answers on stdin.

use async_trait::async_trait;
use engine_logging::engine_warn;
use harvester_engine::{Checkpoint, Operator};
use tokio::io::{
    self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout,
};

const START_PROMPT: &str =
    "Complete any sign-in in the browser window, then press Enter to continue. Type x to exit: ";
const START_ABORT: &str = "x";
const PROCEED_ABORT: &str = "n";

/// Asks at each checkpoint and reads one line as the answer.
pub struct LineOperator<R, W> {
    input: R,
    output: W,
}

impl LineOperator<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R, W> LineOperator<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    async fn ask(&mut self, prompt: &str, abort_key: &str) -> Checkpoint {
        if let Err(err) = self.write_prompt(prompt).await {
            engine_warn!("Could not write prompt: {}", err);
        }
        let mut answer = String::new();
        match self.input.read_line(&mut answer).await {
            // No operator left to confirm.
            Ok(0) => Checkpoint::Abort,
            Ok(_) => decide(&answer, abort_key),
            Err(err) => {
                engine_warn!("Could not read answer: {}", err);
                Checkpoint::Abort
            }
        }
    }

    async fn write_prompt(&mut self, prompt: &str) -> io::Result<()> {
        self.output.write_all(prompt.as_bytes()).await?;
        self.output.flush().await
    }
}

#[async_trait]
impl<R, W> Operator for LineOperator<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn ready_to_discover(&mut self) -> Checkpoint {
        self.ask(START_PROMPT, START_ABORT).await
    }

    async fn proceed_with(&mut self, discovered: usize) -> Checkpoint {
        let prompt =
            format!("Found {discovered} articles. Press Enter to continue, or n to exit: ");
        self.ask(&prompt, PROCEED_ABORT).await
    }
}

/// Only the abort key aborts; any other answer, including an empty one,
/// continues.
fn decide(answer: &str, abort_key: &str) -> Checkpoint {
    if answer.trim().eq_ignore_ascii_case(abort_key) {
        Checkpoint::Abort
    } else {
        Checkpoint::Continue
    }
}
