//! Shutdown coordination for the service.
//!
//! One broadcast channel fans the stop signal out to three kinds of
//! listener:
//! - the HTTP server's graceful-shutdown future, which stops accepting and
//!   drains open connections
//! - the random log generator, which exits between ticks
//! - every ping handler still in its simulated delay, which cuts the delay
//!   short and answers
//!
//! Receivers created after the signal was sent do not see it, so ping
//! handlers subscribe on entry, before they start waiting.

use tokio::sync::broadcast;

/// Stop-signal fan-out. Clones share one channel, so the copy held in the
/// router state and the one held by startup trigger the same listeners.
#[derive(Clone, Debug)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver that resolves once [`Shutdown::trigger`] is called.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Signal every current receiver. Harmless when there are none.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Receivers still alive: the server, the generator and any ping
    /// waiting out its delay.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
