//! Push-notification subscription
//!
//! Consumes the server's WebSocket channel and applies `postUpdated` events
//! to the view through the notifier. There is no retry and no backpressure:
//! read errors end the subscription with a log line.

use futures_util::StreamExt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::error::ClientError;
use crate::interactions::FeedClient;
use feed_events::ServerMessage;

/// Handle to a running push subscription
///
/// Dropping it ends the reader task.
#[derive(Debug)]
pub struct SubscriptionHandle {
    task: JoinHandle<()>,
}

impl SubscriptionHandle {
    /// Stop the subscription
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Connect to the push channel and apply `postUpdated` events to the view.
///
/// Connection failures surface to the caller; once connected, read errors
/// and closure end the subscription.
pub async fn subscribe_post_updates(
    ws_url: &str,
    client: Arc<FeedClient>,
) -> Result<SubscriptionHandle, ClientError> {
    let (ws_stream, _) = connect_async(ws_url).await?;
    tracing::info!("Connected to push channel at {}", ws_url);

    let task = tokio::spawn(async move {
        let (_write, mut read) = ws_stream.split();

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => handle_push(&client, &text),
                Ok(Message::Close(reason)) => {
                    tracing::info!("Push channel closed: {:?}", reason);
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("Push channel error: {}", e);
                    break;
                }
            }
        }
    });

    Ok(SubscriptionHandle { task })
}

fn handle_push(client: &FeedClient, text: &str) {
    match ServerMessage::from_json(text) {
        Ok(ServerMessage::PostUpdated(update)) => {
            if let Err(e) = client.on_post_updated(&update) {
                tracing::error!("Failed to apply update for post {}: {}", update.id, e);
            }
        }
        Ok(other) => tracing::debug!("Ignoring push message: {:?}", other),
        Err(e) => tracing::warn!("Unparseable push message: {}", e),
    }
}
