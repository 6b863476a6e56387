//! Execution loop: A single consumer applying queued operations.
//!
//! Any number of producer threads post operations; one dedicated worker
//! pulls them in order, applies them to the in-progress surface, and
//! hands finished frames to a [`Receiver`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   post(Operation)   ┌───────────────┐
//! │  Producers   │ ──────────────────▶ │ BlockingQueue │
//! └──────────────┘                     └───────┬───────┘
//!                                              │ pull
//!                                              ▼
//!                                      ┌───────────────┐   on_present   ┌──────────┐
//!                                      │  Loop Worker  │ ─────────────▶ │ Receiver │
//!                                      │  next ⇄ prev  │                └──────────┘
//!                                      └───────────────┘
//! ```
//!
//! # Lifecycle
//!
//! `Stopped -> Running -> StopRequested -> Stopped`. Stopping posts a
//! sentinel through the same queue, so every operation posted earlier is
//! applied before the worker exits.

mod event_loop;
mod messages;
mod queue;
mod receiver;

pub use event_loop::{EventLoop, LoopConfig, Poster, SURFACE_SIZE};
pub use messages::{LoopState, LoopStats, Message};
pub use queue::BlockingQueue;
pub use receiver::{ChannelReceiver, Receiver};
