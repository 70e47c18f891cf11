//! Streaming types for loop runs.
//!
//! Defines stream modes, events, and [`StreamWriter`], which the reflection runner uses to
//! report progress while it runs (`ReflectionRunner::invoke_stream` / `stream`).
//!
//! Events are delivered over a `tokio::sync::mpsc` channel. A closed receiver never fails
//! the run; emits simply return `false`.

use std::collections::HashSet;
use std::fmt::Debug;
use std::sync::Arc;

use tokio::sync::mpsc;

/// Stream mode selector: which kinds of events to emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamMode {
    /// State after each node.
    Values,
    /// Node id plus state after that node.
    Updates,
    /// Node start/end markers.
    Tasks,
}

impl StreamMode {
    /// All modes.
    pub fn all() -> HashSet<StreamMode> {
        [StreamMode::Values, StreamMode::Updates, StreamMode::Tasks]
            .into_iter()
            .collect()
    }
}

/// One event observed while a loop runs.
#[derive(Clone, Debug, PartialEq)]
pub enum StreamEvent<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Full state snapshot after a node finishes.
    Values(S),
    /// Incremental update with the node id and state after that node.
    Updates { node_id: String, state: S },
    /// A node is about to call its model.
    TaskStart { node_id: String },
    /// A node finished; `Err` carries the rendered error of a failed node.
    TaskEnd {
        node_id: String,
        result: Result<(), String>,
    },
}

/// Mode-filtered sender for [`StreamEvent`]s.
///
/// `StreamWriter` is `Clone + Send + Sync`. A writer built with [`StreamWriter::noop`]
/// drops everything, so the runner uses the same code path with and without streaming.
#[derive(Clone)]
pub struct StreamWriter<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    tx: Option<mpsc::Sender<StreamEvent<S>>>,
    modes: Arc<HashSet<StreamMode>>,
}

impl<S> StreamWriter<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    pub fn new(tx: Option<mpsc::Sender<StreamEvent<S>>>, modes: HashSet<StreamMode>) -> Self {
        Self {
            tx,
            modes: Arc::new(modes),
        }
    }

    pub fn noop() -> Self {
        Self {
            tx: None,
            modes: Arc::new(HashSet::new()),
        }
    }

    /// Checks if a specific stream mode is enabled.
    pub fn is_mode_enabled(&self, mode: StreamMode) -> bool {
        self.tx.is_some() && self.modes.contains(&mode)
    }

    async fn send(&self, mode: StreamMode, event: StreamEvent<S>) -> bool {
        if !self.modes.contains(&mode) {
            return false;
        }
        match &self.tx {
            Some(tx) => tx.send(event).await.is_ok(),
            None => false,
        }
    }

    /// Emits a full state value (`StreamMode::Values`).
    pub async fn emit_values(&self, state: S) -> bool {
        self.send(StreamMode::Values, StreamEvent::Values(state))
            .await
    }

    /// Emits an incremental update (`StreamMode::Updates`).
    pub async fn emit_updates(&self, node_id: impl Into<String>, state: S) -> bool {
        self.send(
            StreamMode::Updates,
            StreamEvent::Updates {
                node_id: node_id.into(),
                state,
            },
        )
        .await
    }

    /// Emits a task start event (`StreamMode::Tasks`).
    pub async fn emit_task_start(&self, node_id: impl Into<String>) -> bool {
        self.send(
            StreamMode::Tasks,
            StreamEvent::TaskStart {
                node_id: node_id.into(),
            },
        )
        .await
    }

    /// Emits a task end event (`StreamMode::Tasks`).
    pub async fn emit_task_end(&self, node_id: impl Into<String>, result: Result<(), String>) -> bool {
        self.send(
            StreamMode::Tasks,
            StreamEvent::TaskEnd {
                node_id: node_id.into(),
                result,
            },
        )
        .await
    }

    pub fn modes(&self) -> &HashSet<StreamMode> {
        &self.modes
    }
}

impl<S> Debug for StreamWriter<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamWriter")
            .field("has_sender", &self.tx.is_some())
            .field("modes", &self.modes)
            .finish()
    }
}
