//! ReflectionRunner: the generate/reflect state machine, invoke and stream.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;

use crate::graph::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_node_state, GraphTopology, END, START,
};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::prompts::ReflectionPrompts;
use crate::state::ReflectionState;
use crate::stream::{StreamEvent, StreamMode, StreamWriter};
use crate::Node;

use super::error::RunError;
use super::generate_node::{GenerateNode, GENERATE};
use super::reflect_node::{ReflectNode, REFLECT};
use super::termination::{MessageCountPolicy, TerminationPolicy};

const GRAPH_NAME: &str = "reflection";
const STREAM_CHANNEL_CAPACITY: usize = 64;

/// Position of the loop between node runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Start,
    Generate,
    Reflect,
    End,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Start => START,
            Step::Generate => GENERATE,
            Step::Reflect => REFLECT,
            Step::End => END,
        }
    }
}

/// Runs `Start -> Generate -> (Reflect -> Generate)* -> End`.
///
/// After every Generate the [`TerminationPolicy`] decides between `End` and `Reflect`; a run
/// therefore always ends right after a Generate. Cloning is cheap (shared nodes and policy),
/// so one runner can serve concurrent runs.
#[derive(Clone)]
pub struct ReflectionRunner {
    generate: Arc<dyn Node<ReflectionState>>,
    reflect: Arc<dyn Node<ReflectionState>>,
    policy: Arc<dyn TerminationPolicy>,
    recursion_limit: Option<usize>,
}

impl ReflectionRunner {
    /// Runner over the given nodes with the default policy (`len > 4`) and no step limit.
    pub fn new(
        generate: Arc<dyn Node<ReflectionState>>,
        reflect: Arc<dyn Node<ReflectionState>>,
    ) -> Self {
        Self {
            generate,
            reflect,
            policy: Arc::new(MessageCountPolicy::default()),
            recursion_limit: None,
        }
    }

    /// Runner whose nodes call `generate_llm` and `reflect_llm` with `prompts`.
    pub fn from_llms(
        generate_llm: Arc<dyn LlmClient>,
        reflect_llm: Arc<dyn LlmClient>,
        prompts: &ReflectionPrompts,
    ) -> Self {
        Self::new(
            Arc::new(GenerateNode::new(generate_llm, prompts.generation.clone())),
            Arc::new(ReflectNode::new(reflect_llm, prompts.reflection.clone())),
        )
    }

    pub fn with_policy(mut self, policy: impl TerminationPolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// Fails the run with `RunError::RecursionLimit` once `limit` node steps have run
    /// without reaching `End`.
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = Some(limit);
        self
    }

    /// Runs the loop and returns the final transcript.
    pub async fn run(&self, seed_topic: &str) -> Result<Vec<Message>, RunError> {
        Ok(self.invoke(seed_topic).await?.into_messages())
    }

    /// Runs the loop and returns the final state (transcript plus usage).
    pub async fn invoke(&self, seed_topic: &str) -> Result<ReflectionState, RunError> {
        self.execute(seed_topic, &StreamWriter::noop()).await
    }

    /// Runs the loop, sending events for the enabled `modes` to `tx` as each node finishes.
    ///
    /// A dropped receiver does not stop the run.
    pub async fn invoke_stream(
        &self,
        seed_topic: &str,
        modes: HashSet<StreamMode>,
        tx: mpsc::Sender<StreamEvent<ReflectionState>>,
    ) -> Result<ReflectionState, RunError> {
        self.execute(seed_topic, &StreamWriter::new(Some(tx), modes))
            .await
    }

    /// Spawns the run on the current tokio runtime.
    ///
    /// Returns the event stream and the handle resolving to the run's result. The stream
    /// ends when the run finishes.
    pub fn stream(
        &self,
        seed_topic: impl Into<String>,
        modes: HashSet<StreamMode>,
    ) -> (
        ReceiverStream<StreamEvent<ReflectionState>>,
        JoinHandle<Result<ReflectionState, RunError>>,
    ) {
        let (tx, rx) = mpsc::channel(STREAM_CHANNEL_CAPACITY);
        let runner = self.clone();
        let seed = seed_topic.into();
        let handle = tokio::spawn(async move { runner.invoke_stream(&seed, modes, tx).await });
        (ReceiverStream::new(rx), handle)
    }

    /// Static nodes and edges of this loop.
    pub fn topology(&self) -> GraphTopology {
        GraphTopology::new()
            .node(GENERATE)
            .node(REFLECT)
            .edge(START, GENERATE)
            .conditional_edge(GENERATE, END, self.policy.describe())
            .conditional_edge(GENERATE, REFLECT, "continue")
            .edge(REFLECT, GENERATE)
    }

    async fn execute(
        &self,
        seed_topic: &str,
        writer: &StreamWriter<ReflectionState>,
    ) -> Result<ReflectionState, RunError> {
        if seed_topic.trim().is_empty() {
            return Err(RunError::EmptySeed);
        }
        log_graph_start(GRAPH_NAME);

        let mut state = ReflectionState::seed(seed_topic);
        let mut steps = 0usize;
        let mut step = Step::Start;
        loop {
            step = match step {
                Step::Start => Step::Generate,
                Step::Generate => {
                    state = self.run_node(&self.generate, state, steps, writer).await?;
                    steps += 1;
                    let next = if self.policy.should_end(&state) {
                        Step::End
                    } else {
                        Step::Reflect
                    };
                    log_node_complete(GENERATE, state.len(), next.as_str());
                    next
                }
                Step::Reflect => {
                    state = self.run_node(&self.reflect, state, steps, writer).await?;
                    steps += 1;
                    log_node_complete(REFLECT, state.len(), GENERATE);
                    Step::Generate
                }
                Step::End => break,
            };
        }

        log_graph_complete(GRAPH_NAME, steps, state.len());
        Ok(state)
    }

    async fn run_node(
        &self,
        node: &Arc<dyn Node<ReflectionState>>,
        state: ReflectionState,
        steps: usize,
        writer: &StreamWriter<ReflectionState>,
    ) -> Result<ReflectionState, RunError> {
        if let Some(limit) = self.recursion_limit {
            if steps >= limit {
                let err = RunError::RecursionLimit { limit };
                log_graph_error(GRAPH_NAME, &err);
                return Err(err);
            }
        }

        let id = node.id().to_string();
        log_node_start(&id, steps + 1);
        log_node_state(&id, &state);
        writer.emit_task_start(id.as_str()).await;

        match node.run(state).await {
            Ok(next) => {
                writer.emit_task_end(id.as_str(), Ok(())).await;
                if writer.is_mode_enabled(StreamMode::Updates) {
                    writer.emit_updates(id.as_str(), next.clone()).await;
                }
                if writer.is_mode_enabled(StreamMode::Values) {
                    writer.emit_values(next.clone()).await;
                }
                Ok(next)
            }
            Err(e) => {
                writer.emit_task_end(id.as_str(), Err(e.to_string())).await;
                log_graph_error(GRAPH_NAME, &e);
                Err(RunError::Execution(e))
            }
        }
    }
}

impl std::fmt::Debug for ReflectionRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReflectionRunner")
            .field("generate", &self.generate.id())
            .field("reflect", &self.reflect.id())
            .field("policy", &self.policy.describe())
            .field("recursion_limit", &self.recursion_limit)
            .finish()
    }
}
