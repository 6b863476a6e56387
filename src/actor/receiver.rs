//! Receivers: Consumers of presented surfaces.
//!
//! A receiver runs synchronously on the loop worker. It must return
//! promptly, since the whole loop stalls while it runs, and it must not
//! keep the surface: the loop draws into it again after the next swap.

use crossbeam_channel::{self as channel, TrySendError};
use tracing::trace;

/// Accepts surfaces that are ready to display.
pub trait Receiver<S>: Send {
    /// Called with the surface that just became present-ready.
    fn on_present(&mut self, surface: &S);
}

impl<S, F> Receiver<S> for F
where
    F: FnMut(&S) + Send,
{
    fn on_present(&mut self, surface: &S) {
        self(surface);
    }
}

/// Forwards a copy of each presented surface over a bounded channel.
///
/// When the consumer lags and the channel is full the frame is dropped
/// rather than stalling the loop.
#[derive(Debug, Clone)]
pub struct ChannelReceiver<S> {
    sender: channel::Sender<S>,
    dropped: u64,
}

impl<S> ChannelReceiver<S> {
    /// Create a receiver and the channel end that yields its frames.
    pub fn bounded(capacity: usize) -> (Self, channel::Receiver<S>) {
        let (sender, frames) = channel::bounded(capacity);
        (Self { sender, dropped: 0 }, frames)
    }

    /// Frames dropped because the channel was full.
    pub const fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl<S: Clone + Send> Receiver<S> for ChannelReceiver<S> {
    fn on_present(&mut self, surface: &S) {
        match self.sender.try_send(surface.clone()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
                trace!(dropped = self.dropped, "frame channel full, dropping frame");
            }
            // Nobody is listening any more.
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}
