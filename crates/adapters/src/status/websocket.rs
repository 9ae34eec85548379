// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON-RPC push channel over a single websocket connection

use super::jsonrpc::{parse_notification, subscribe_request, unsubscribe_request, SUBSCRIBED_METHODS};
use super::{ChannelError, ReconnectPolicy, StatusChannel};
use crate::endpoint::Endpoint;
use async_trait::async_trait;
use dash_core::{Event, WorkspaceId};
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use url::Url;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug)]
enum Command {
    Subscribe(WorkspaceId),
    UnsubscribeAll,
}

struct Inner {
    url: Url,
    policy: ReconnectPolicy,
    events: mpsc::Sender<Event>,
    commands: Mutex<Option<mpsc::UnboundedSender<Command>>>,
}

/// Push channel speaking JSON-RPC 2.0 to the workspace master.
///
/// The connection is opened on the first subscription and owned by a
/// background task. Subscriptions are remembered so a reconnect can
/// replay them.
#[derive(Clone)]
pub struct JsonRpcStatusChannel {
    inner: Arc<Inner>,
}

impl JsonRpcStatusChannel {
    pub fn new(
        endpoint: &Endpoint,
        policy: ReconnectPolicy,
        events: mpsc::Sender<Event>,
    ) -> Result<Self, ChannelError> {
        Ok(Self {
            inner: Arc::new(Inner {
                url: endpoint.websocket_url()?,
                policy,
                events,
                commands: Mutex::new(None),
            }),
        })
    }

    fn send(&self, command: Command) -> Result<(), ChannelError> {
        let mut guard = self.inner.commands.lock();
        let tx = guard.get_or_insert_with(|| {
            let (tx, rx) = mpsc::unbounded_channel();
            tokio::spawn(connection_task(
                self.inner.url.clone(),
                self.inner.policy,
                self.inner.events.clone(),
                rx,
            ));
            tx
        });
        tx.send(command).map_err(|_| ChannelError::Closed)
    }
}

#[async_trait]
impl StatusChannel for JsonRpcStatusChannel {
    async fn subscribe(&self, id: &WorkspaceId) -> Result<(), ChannelError> {
        self.send(Command::Subscribe(id.clone()))
    }

    async fn unsubscribe_all(&self) -> Result<(), ChannelError> {
        // Never connected: nothing to release
        let Some(tx) = self.inner.commands.lock().clone() else {
            return Ok(());
        };
        tx.send(Command::UnsubscribeAll)
            .map_err(|_| ChannelError::Closed)
    }
}

enum SessionEnd {
    /// All handles dropped or the event consumer went away.
    Shutdown,
    Disconnected,
}

struct Connection {
    subscriptions: Vec<WorkspaceId>,
    next_request_id: u64,
}

impl Connection {
    fn request_id(&mut self) -> u64 {
        self.next_request_id += 1;
        self.next_request_id
    }

    async fn subscribe(
        &mut self,
        ws: &mut Socket,
        id: &WorkspaceId,
    ) -> Result<(), tokio_tungstenite::tungstenite::Error> {
        for method in SUBSCRIBED_METHODS {
            let frame = subscribe_request(self.request_id(), method, id);
            ws.send(Message::Text(frame)).await?;
        }
        Ok(())
    }

    async fn unsubscribe(
        &mut self,
        ws: &mut Socket,
        id: &WorkspaceId,
    ) -> Result<(), tokio_tungstenite::tungstenite::Error> {
        for method in SUBSCRIBED_METHODS {
            let frame = unsubscribe_request(self.request_id(), method, id);
            ws.send(Message::Text(frame)).await?;
        }
        Ok(())
    }

    /// Bookkeeping for commands received while offline.
    fn apply_offline(&mut self, command: Command) {
        match command {
            Command::Subscribe(id) => {
                if !self.subscriptions.contains(&id) {
                    self.subscriptions.push(id);
                }
            }
            Command::UnsubscribeAll => self.subscriptions.clear(),
        }
    }

    async fn run_session(
        &mut self,
        ws: &mut Socket,
        commands: &mut mpsc::UnboundedReceiver<Command>,
        events: &mpsc::Sender<Event>,
    ) -> SessionEnd {
        for id in self.subscriptions.clone() {
            if let Err(e) = self.subscribe(ws, &id).await {
                tracing::warn!(error = %e, "failed to replay subscriptions");
                return SessionEnd::Disconnected;
            }
        }

        loop {
            tokio::select! {
                command = commands.recv() => {
                    let result = match command {
                        None => {
                            let _ = ws.close(None).await;
                            return SessionEnd::Shutdown;
                        }
                        Some(Command::Subscribe(id)) => {
                            if self.subscriptions.contains(&id) {
                                Ok(())
                            } else {
                                self.subscriptions.push(id.clone());
                                self.subscribe(ws, &id).await
                            }
                        }
                        Some(Command::UnsubscribeAll) => {
                            let mut result = Ok(());
                            for id in std::mem::take(&mut self.subscriptions) {
                                result = self.unsubscribe(ws, &id).await;
                                if result.is_err() {
                                    break;
                                }
                            }
                            result
                        }
                    };
                    if let Err(e) = result {
                        tracing::warn!(error = %e, "push channel write failed");
                        return SessionEnd::Disconnected;
                    }
                }
                frame = ws.next() => match frame {
                    Some(Ok(Message::Text(text))) => {
                        match parse_notification(&text) {
                            Some(event) => {
                                if events.send(event).await.is_err() {
                                    return SessionEnd::Shutdown;
                                }
                            }
                            None => tracing::trace!(frame = %text, "ignoring frame"),
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => return SessionEnd::Disconnected,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "push channel read failed");
                        return SessionEnd::Disconnected;
                    }
                },
            }
        }
    }
}

async fn connect(url: &Url) -> Result<Socket, String> {
    match tokio::time::timeout(
        crate::env::ws_connect_timeout(),
        tokio_tungstenite::connect_async(url.as_str()),
    )
    .await
    {
        Ok(Ok((ws, _response))) => Ok(ws),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("connect timed out".to_string()),
    }
}

async fn connection_task(
    url: Url,
    policy: ReconnectPolicy,
    events: mpsc::Sender<Event>,
    mut commands: mpsc::UnboundedReceiver<Command>,
) {
    let mut conn = Connection {
        subscriptions: Vec::new(),
        next_request_id: 0,
    };
    let mut delay: Option<Duration> = None;
    // Token stays out of logs
    let target = format!("{}{}", url.origin().ascii_serialization(), url.path());

    loop {
        match connect(&url).await {
            Ok(mut ws) => {
                tracing::info!(url = %target, "push channel connected");
                delay = None;
                match conn.run_session(&mut ws, &mut commands, &events).await {
                    SessionEnd::Shutdown => return,
                    SessionEnd::Disconnected => {
                        tracing::warn!(url = %target, "push channel disconnected")
                    }
                }
            }
            Err(e) => tracing::warn!(url = %target, error = %e, "push channel connect failed"),
        }

        delay = policy.next_delay(delay);
        let Some(wait) = delay else {
            tracing::warn!("push channel closed; statuses will only refresh on fetch");
            return;
        };
        tracing::debug!(delay_ms = wait.as_millis() as u64, "push channel reconnecting");

        let sleep = tokio::time::sleep(wait);
        tokio::pin!(sleep);
        loop {
            tokio::select! {
                _ = &mut sleep => break,
                command = commands.recv() => match command {
                    Some(command) => conn.apply_offline(command),
                    None => return,
                },
            }
        }
    }
}

#[cfg(test)]
#[path = "websocket_tests.rs"]
mod tests;
