use actix::{Actor, ActorContext, AsyncContext, Handler, Message as ActixMessage, StreamHandler};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use feed_events::ServerMessage;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use super::hub::UpdateHub;

/// How often the server pings clients
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
/// How long a client may stay silent before the session is dropped
const CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

// Message type for pushing serialized events to the WebSocket
#[derive(ActixMessage)]
#[rtype(result = "()")]
struct PushText(String);

/// Per-connection WebSocket actor
///
/// Receives broadcasts from the hub through a bridged channel and forwards
/// them as text frames. Client-to-server frames are protocol traffic only.
struct WsSession {
    connection_id: u64,
    hub: UpdateHub,
    hb: Instant,
}

impl WsSession {
    fn new(connection_id: u64, hub: UpdateHub) -> Self {
        Self {
            connection_id,
            hub,
            hb: Instant::now(),
        }
    }

    fn hb(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
            if Instant::now().duration_since(act.hb) > CLIENT_TIMEOUT {
                tracing::warn!(
                    "WebSocket heartbeat failed for connection {}, disconnecting",
                    act.connection_id
                );
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        tracing::info!("WebSocket session {} started", self.connection_id);

        self.hb(ctx);

        match ServerMessage::connected().to_json() {
            Ok(text) => ctx.text(text),
            Err(e) => tracing::error!("Failed to serialize connected message: {}", e),
        }
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        tracing::info!("WebSocket session {} stopped", self.connection_id);

        let hub = self.hub.clone();
        let connection_id = self.connection_id;
        actix::spawn(async move {
            hub.unsubscribe(connection_id).await;
        });
    }
}

impl Handler<PushText> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: PushText, ctx: &mut Self::Context) {
        ctx.text(msg.0);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                self.hb = Instant::now();
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {
                self.hb = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                // The push channel is one-way
                tracing::debug!("Ignoring client message: {}", text);
            }
            Ok(ws::Message::Binary(_)) => {
                tracing::warn!("Binary WebSocket messages not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                tracing::info!("WebSocket close message received: {:?}", reason);
                ctx.stop();
            }
            _ => {}
        }
    }
}

/// WebSocket upgrade handler
///
/// Endpoint: GET /ws
pub async fn ws_handler(
    req: HttpRequest,
    stream: web::Payload,
    hub: web::Data<UpdateHub>,
) -> Result<HttpResponse, Error> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let connection_id = hub.subscribe(tx).await;

    let session = WsSession::new(connection_id, hub.get_ref().clone());
    let (addr, response) = ws::WsResponseBuilder::new(session, &req, stream).start_with_addr()?;

    // Bridge the hub's receiver to the session actor; the channel closes
    // when the session deregisters
    tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            match message.to_json() {
                Ok(text) => addr.do_send(PushText(text)),
                Err(e) => tracing::error!("Failed to serialize push event: {}", e),
            }
        }
    });

    Ok(response)
}
