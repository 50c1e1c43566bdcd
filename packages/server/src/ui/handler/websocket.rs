//! WebSocket connection handlers.

use std::{ops::ControlFlow, sync::Arc};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
    usecase::{ChatSession, TypingState},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the client's channel into its WebSocket sink.
///
/// Everything the server sends to this client (its own notifications as well as
/// broadcasts triggered by other clients) goes through `rx`.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    let mut session = state.coordinator.connect(tx).await;
    let mut send_task = pusher_loop(rx, sender);

    // Events of one connection are handled one at a time, in arrival order
    loop {
        tokio::select! {
            msg = receiver.next() => {
                let msg = match msg {
                    Some(Ok(msg)) => msg,
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket error on '{}': {}", session.id, e);
                        break;
                    }
                    None => break,
                };
                if handle_message(&state, &mut session, msg).await.is_break() {
                    break;
                }
            }
            _ = &mut send_task => break,
        }
    }

    send_task.abort();
    state.coordinator.disconnect(&mut session).await;
}

async fn handle_message(
    state: &AppState,
    session: &mut ChatSession,
    msg: Message,
) -> ControlFlow<()> {
    match msg {
        Message::Text(text) => {
            tracing::debug!("Received from '{}': {}", session.id, text.as_str());

            let event = match ClientEvent::parse(text.as_str()) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("Ignored frame from '{}': {}", session.id, e);
                    return ControlFlow::Continue(());
                }
            };
            dispatch(state, session, event).await;
        }
        Message::Ping(_) => {
            // Ping/pong is handled automatically by the WebSocket protocol
            tracing::debug!("Received ping");
        }
        Message::Close(_) => {
            tracing::info!("Client '{}' requested close", session.id);
            return ControlFlow::Break(());
        }
        _ => {}
    }
    ControlFlow::Continue(())
}

async fn dispatch(state: &AppState, session: &mut ChatSession, event: ClientEvent) {
    let coordinator = &state.coordinator;
    match event {
        ClientEvent::SetUsername(payload) => {
            coordinator
                .join(
                    session,
                    payload.first_name.as_deref(),
                    payload.last_name.as_deref(),
                )
                .await;
        }
        ClientEvent::Typing => coordinator.typing(session, TypingState::Started).await,
        ClientEvent::StopTyping => coordinator.typing(session, TypingState::Stopped).await,
        ClientEvent::NewMessage(text) => {
            coordinator.new_message(session, text.as_deref()).await;
        }
    }
}
