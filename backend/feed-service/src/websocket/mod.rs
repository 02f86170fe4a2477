mod hub;
mod session;

pub use hub::{PushSender, UpdateHub};
pub use session::ws_handler;
