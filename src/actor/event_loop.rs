//! Event Loop: Dedicated worker that applies operations to double buffers.
//!
//! The worker owns two surfaces. Operations are applied to the
//! in-progress one; when an operation reports present-ready, the receiver
//! is handed the in-progress surface and the two are swapped, so the
//! handoff costs nothing per pixel.
//!
//! ```text
//! producers ──post──▶ BlockingQueue ──pull──▶ worker ──on_present──▶ Receiver
//!                                              │
//!                                   next ◀─swap─▶ prev
//! ```

use super::messages::{LoopState, LoopStats, Message};
use super::queue::BlockingQueue;
use super::receiver::Receiver;
use crate::op::{Batch, Operation};
use crate::surface::{Size, Surface, SurfaceFactory};
use std::io;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, trace};

/// Working size of the loop surfaces.
pub const SURFACE_SIZE: Size = Size::new(800, 800);

/// Configuration for the [`EventLoop`].
#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Size of both surfaces.
    pub surface_size: Size,
    /// Name of the worker thread.
    pub thread_name: String,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            surface_size: SURFACE_SIZE,
            thread_name: "painter-loop".to_string(),
        }
    }
}

/// State shared between the loop handle, posters and the worker.
#[derive(Debug)]
struct Shared {
    queue: BlockingQueue<Message>,
    state: AtomicU8,
}

impl Shared {
    fn state(&self) -> LoopState {
        LoopState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: LoopState) {
        self.state.store(state as u8, Ordering::Release);
    }

    fn post(&self, op: Operation) {
        if matches!(&op, Operation::Batch(batch) if batch.is_empty()) {
            return;
        }
        trace!(kind = op.kind(), "post");
        self.queue.push(Message::Apply(op));
    }
}

/// Cloneable handle for posting operations from any thread.
///
/// Posting after the loop has stopped is not supported: the operation
/// is queued but never applied.
#[derive(Debug, Clone)]
pub struct Poster {
    shared: Arc<Shared>,
}

impl Poster {
    /// Queue an operation (or a whole batch).
    ///
    /// Empty batches are ignored.
    pub fn post(&self, op: impl Into<Operation>) {
        self.shared.post(op.into());
    }

    /// Current lifecycle state of the loop.
    pub fn state(&self) -> LoopState {
        self.shared.state()
    }
}

/// A running execution loop.
///
/// Created by [`EventLoop::start`]; ends with [`EventLoop::stop`], which
/// consumes the handle. Dropping a running loop stops it the same way.
pub struct EventLoop {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<LoopStats>>,
}

impl EventLoop {
    /// Allocate both surfaces and spawn the worker thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the worker thread.
    pub fn start<F, R>(config: LoopConfig, factory: &F, receiver: R) -> io::Result<Self>
    where
        F: SurfaceFactory,
        F::Surface: Send + 'static,
        R: Receiver<F::Surface> + 'static,
    {
        let next = factory.new_surface(config.surface_size);
        let prev = factory.new_surface(config.surface_size);

        let shared = Arc::new(Shared {
            queue: BlockingQueue::new(),
            state: AtomicU8::new(LoopState::Running as u8),
        });
        let worker_shared = Arc::clone(&shared);

        let handle = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || Self::run_loop(&worker_shared, next, prev, receiver))?;

        debug!(
            thread = %config.thread_name,
            width = config.surface_size.width,
            height = config.surface_size.height,
            "event loop started"
        );

        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }

    /// Queue an operation (or a whole batch).
    ///
    /// Empty batches are ignored.
    pub fn post(&self, op: impl Into<Operation>) {
        self.shared.post(op.into());
    }

    /// Queue a batch produced by the interpreter.
    pub fn post_batch(&self, batch: Batch) {
        self.shared.post(Operation::Batch(batch));
    }

    /// A handle other threads can post through.
    pub fn poster(&self) -> Poster {
        Poster {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LoopState {
        self.shared.state()
    }

    /// Messages queued and not yet pulled by the worker.
    pub fn pending(&self) -> usize {
        self.shared.queue.len()
    }

    /// Stop the loop and wait for the worker to exit.
    ///
    /// Everything posted before this call is applied first. Both surfaces
    /// are released when the worker exits.
    pub fn stop(mut self) -> LoopStats {
        self.shutdown()
    }

    fn shutdown(&mut self) -> LoopStats {
        let Some(handle) = self.handle.take() else {
            return LoopStats::default();
        };

        self.shared.set_state(LoopState::StopRequested);
        self.shared.queue.push(Message::Stop);

        match handle.join() {
            Ok(stats) => {
                debug!(applied = stats.applied, presented = stats.presented, "event loop stopped");
                stats
            }
            Err(_) => {
                error!("event loop worker panicked");
                self.shared.set_state(LoopState::Stopped);
                LoopStats::default()
            }
        }
    }

    /// Worker body: pull, apply, present and swap until the stop sentinel.
    fn run_loop<S, R>(shared: &Shared, mut next: S, mut prev: S, mut receiver: R) -> LoopStats
    where
        S: Surface,
        R: Receiver<S>,
    {
        let mut stats = LoopStats::default();

        loop {
            match shared.queue.pull() {
                Message::Apply(op) => {
                    stats.applied += 1;
                    trace!(kind = op.kind(), "apply");
                    if op.apply(&mut next) {
                        receiver.on_present(&next);
                        std::mem::swap(&mut next, &mut prev);
                        stats.presented += 1;
                    }
                }
                Message::Stop => break,
            }
        }

        shared.set_state(LoopState::Stopped);
        stats
    }
}

impl Drop for EventLoop {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

impl std::fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLoop")
            .field("state", &self.state())
            .field("pending", &self.pending())
            .finish()
    }
}
