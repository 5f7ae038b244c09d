//! Communication between the feed thread and the poll loop
//!
//! The feed thread only produces [`FeedEvent`]s; the poll loop is the
//! single owner of the bus, the drivers and the display state.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Instant;

use rigpanel_protocol::StatusRecord;

/// Events sent from the feed thread
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// A decoded status record
    Status(StatusRecord),
    /// The feed ended; carries a human-readable reason
    Closed(String),
}

/// Sending half, owned by the feed thread
pub type FeedSender = Sender<FeedEvent>;

/// Receiving half, owned by the poll loop
pub type FeedReceiver = Receiver<FeedEvent>;

/// Create the feed channel
pub fn feed_channel() -> (FeedSender, FeedReceiver) {
    mpsc::channel()
}

/// Wait until `deadline`, passing every status record to `on_status`
///
/// Returns `Err(reason)` as soon as the feed closes, or if the sending
/// half is dropped without a close event.
pub fn wait_until(
    rx: &FeedReceiver,
    deadline: Instant,
    mut on_status: impl FnMut(StatusRecord),
) -> Result<(), String> {
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(FeedEvent::Status(record)) => on_status(record),
            Ok(FeedEvent::Closed(reason)) => return Err(reason),
            Err(RecvTimeoutError::Timeout) => return Ok(()),
            Err(RecvTimeoutError::Disconnected) => {
                return Err(String::from("feed thread exited"))
            }
        }
    }
}
