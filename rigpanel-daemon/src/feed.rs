//! Status feed client
//!
//! Connects to the rig control process over a websocket, asks for status
//! updates and forwards every decoded record to the poll loop. Runs on its
//! own thread because reads block.

use std::thread::{self, JoinHandle};

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use tungstenite::Message;

use rigpanel_core::config::FeedConfig;
use rigpanel_protocol::{decode_status, StatusRequest};

use crate::channels::{FeedEvent, FeedSender};

/// Start the feed thread
///
/// The thread always finishes by sending [`FeedEvent::Closed`].
pub fn spawn(config: FeedConfig, tx: FeedSender) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("feed".into())
        .spawn(move || {
            let reason = match run(&config, &tx) {
                Ok(()) => String::from("closed by peer"),
                Err(e) => format!("{:#}", e),
            };
            // Poll loop already gone if this fails
            let _ = tx.send(FeedEvent::Closed(reason));
        })
        .context("spawning feed thread")
}

fn run(config: &FeedConfig, tx: &FeedSender) -> Result<()> {
    let (mut socket, _response) = tungstenite::connect(config.url.as_str())
        .with_context(|| format!("connecting to {}", config.url))?;
    info!("Feed connected to {}", config.url);

    let request = StatusRequest::new(&config.method, &config.id)
        .to_json()
        .map_err(|e| anyhow!("encoding status request: {}", e))?;
    socket
        .send(Message::text(request))
        .context("sending status request")?;

    loop {
        match socket.read() {
            Ok(Message::Text(text)) => {
                if !forward(&text, tx) {
                    return Ok(());
                }
            }
            Ok(Message::Close(frame)) => {
                debug!("feed close frame: {:?}", frame);
                return Ok(());
            }
            // Pings are answered by tungstenite; binary frames are not part of the feed
            Ok(_) => {}
            Err(tungstenite::Error::ConnectionClosed) => return Ok(()),
            Err(e) => return Err(e).context("reading status feed"),
        }
    }
}

/// Decode one text message and pass it on
///
/// Malformed messages are logged and dropped. Returns false once the
/// receiving side is gone.
fn forward(text: &str, tx: &FeedSender) -> bool {
    match decode_status(text) {
        Ok(Some(record)) => tx.send(FeedEvent::Status(record)).is_ok(),
        Ok(None) => {
            debug!("feed message without status: {}", text);
            true
        }
        Err(e) => {
            warn!("dropping feed message: {}", e);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::feed_channel;
    use rigpanel_protocol::FieldValue;

    #[test]
    fn test_forward_status() {
        let (tx, rx) = feed_channel();
        assert!(forward(
            r#"{"id":"0","result":{"mode":"FM","power":5}}"#,
            &tx
        ));

        match rx.try_recv().unwrap() {
            FeedEvent::Status(record) => {
                assert_eq!(record.mode, Some(FieldValue::Text("FM".into())));
                assert_eq!(record.power, Some(FieldValue::Integer(5)));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_forward_drops_malformed() {
        let (tx, rx) = feed_channel();
        assert!(forward("{not json", &tx));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_forward_receiver_gone() {
        let (tx, rx) = feed_channel();
        drop(rx);
        assert!(!forward(r#"{"result":{"mode":"AM"}}"#, &tx));
    }

    #[test]
    fn test_unreachable_feed_reports_closed() {
        let (tx, rx) = feed_channel();
        let config = FeedConfig {
            url: String::from("ws://127.0.0.1:1"),
            ..Default::default()
        };

        spawn(config, tx).unwrap().join().unwrap();

        match rx.recv().unwrap() {
            FeedEvent::Closed(reason) => assert!(reason.contains("connecting to ws://127.0.0.1:1")),
            other => panic!("unexpected event {:?}", other),
        }
    }
}
