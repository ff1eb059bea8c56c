//! Opt-in trace events for index construction.
//!
//! The indexes never print. Callers that want to observe structural changes
//! (splits, model training) pass a [`TraceSink`]; everyone else gets
//! [`NullSink`] and pays nothing.

/// Events emitted by index operations for callers that opt in.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// A full B-Tree node was split; the median key moved into its parent.
    NodeSplit { median: i64 },
    /// The B-Tree root was split and the tree grew one level.
    RootSplit { new_depth: usize },
    /// The RMI level-0 routing model finished training.
    Level0Trained { slope: f64, intercept: f64 },
    /// An RMI level-1 segment model finished training on `points` keys.
    SegmentTrained { segment: usize, points: usize },
    /// An RMI segment received no training keys; its slot stays empty.
    SegmentEmpty { segment: usize },
}

/// Receiver for trace events.
///
/// Implementations must be cheap; construction paths call `record` inline.
pub trait TraceSink {
    fn record(&mut self, event: TraceEvent);
}

/// Sink that discards every event (the default).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn record(&mut self, _event: TraceEvent) {}
}

/// Sink that buffers events in memory, for tests and demos.
#[derive(Debug, Default)]
pub struct VecSink {
    pub events: Vec<TraceEvent>,
}

impl TraceSink for VecSink {
    fn record(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}
