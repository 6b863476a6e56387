//! Message types carried by the loop queue.

use crate::op::Operation;

/// Items pulled by the loop worker.
#[derive(Debug)]
pub enum Message {
    /// Apply an operation to the in-progress surface.
    Apply(Operation),

    /// Exit the worker. Ordered after everything pushed before it.
    Stop,
}

/// Lifecycle of an [`EventLoop`](super::EventLoop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LoopState {
    /// No worker is running.
    Stopped = 0,
    /// The worker is draining the queue.
    Running = 1,
    /// The stop sentinel is queued; earlier operations still drain.
    StopRequested = 2,
}

impl LoopState {
    pub(crate) const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Running,
            2 => Self::StopRequested,
            _ => Self::Stopped,
        }
    }
}

/// Counters collected by the worker over its lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Operations pulled and applied (a batch counts once).
    pub applied: u64,
    /// Times the receiver was handed a surface.
    pub presented: u64,
}
