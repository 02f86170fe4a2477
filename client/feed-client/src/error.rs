/// Error types for the feed client
///
/// Network failures on interaction requests are logged and swallowed rather
/// than surfaced, so only the push-channel connection and display targets
/// produce typed errors.
use thiserror::Error;

use crate::view::ViewError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error(transparent)]
    View(#[from] ViewError),
}
