//! The orchestrator-level output stream: a channel-backed `Stream` of
//! [`AgentDelta`] values, mirroring `reportability_agent::AgentStream`'s
//! shape one layer up (spec.md §9's "single value type `(content, role,
//! flags)` flowing through a producer/consumer pipeline" — orchestrators
//! are the producers here, the stream framer downstream is the consumer).

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;

use crate::delta::AgentDelta;

/// Channel capacity for one orchestrator run's delta stream. Generous
/// relative to `STREAM_BUFFER_SIZE` (spec.md §4.1, default 5): the
/// framer's own buffering is what bounds memory, this only needs to avoid
/// the producer task blocking on a slow consumer.
const CHANNEL_CAPACITY: usize = 64;

/// One orchestrator run's output, consumed by the stream framer (C1).
pub struct OrchestratorStream {
    rx: mpsc::Receiver<AgentDelta>,
}

impl OrchestratorStream {
    /// Build a sender/stream pair. The orchestrator's `run()` spawns a
    /// task that sends into `tx` and drops it when finished, which ends
    /// the stream.
    pub(crate) fn channel() -> (mpsc::Sender<AgentDelta>, Self) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        (tx, Self { rx })
    }
}

impl Stream for OrchestratorStream {
    type Item = AgentDelta;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_recv(cx)
    }
}
