//! WebSocket chat transport.
//!
//! The socket is owned by one worker thread. The caller talks to it through
//! channels, so neither sending nor receiving blocks the player loop.

use std::io::ErrorKind;
use std::net::TcpStream;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

use super::message::{ChatMessage, ChatPayload};
use super::transport::{ChatError, ChatTransport};

/// How long a socket read waits before the worker checks its outbox.
const READ_TIMEOUT: Duration = Duration::from_millis(100);

type Socket = WebSocket<MaybeTlsStream<TcpStream>>;

enum Outgoing {
    Text(String),
    Close,
}

/// Chat over a WebSocket connection.
pub struct WsTransport {
    url: String,
    outbox: Option<Sender<Outgoing>>,
    inbox: Receiver<ChatPayload>,
    worker: Option<JoinHandle<()>>,
}

impl WsTransport {
    /// Connect to `url` (`ws://` or `wss://`) and start the worker.
    pub fn connect(url: &str) -> Result<Self, ChatError> {
        let url = url.trim();
        if !(url.starts_with("ws://") || url.starts_with("wss://")) {
            return Err(ChatError::InvalidEndpoint(url.to_string()));
        }

        let (socket, response) = tungstenite::connect(url).map_err(|source| ChatError::Connect {
            url: url.to_string(),
            source: Box::new(source),
        })?;
        info!(url, status = %response.status(), "Connected to chat");
        set_read_timeout(&socket, Some(READ_TIMEOUT));

        let (outbox, outbox_rx) = mpsc::channel();
        let (inbox_tx, inbox) = mpsc::channel();
        let worker = thread::Builder::new()
            .name("reelsync-chat".to_string())
            .spawn(move || worker_loop(socket, outbox_rx, inbox_tx))
            .map_err(|_| ChatError::Closed)?;

        Ok(Self {
            url: url.to_string(),
            outbox: Some(outbox),
            inbox,
            worker: Some(worker),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the worker is still running.
    pub fn is_open(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.is_finished())
    }
}

impl ChatTransport for WsTransport {
    fn send(&mut self, message: &ChatMessage) -> Result<(), ChatError> {
        let text = serde_json::to_string(message)?;
        let outbox = self.outbox.as_ref().ok_or(ChatError::Closed)?;
        outbox
            .send(Outgoing::Text(text))
            .map_err(|_| ChatError::Closed)
    }

    fn try_recv(&mut self) -> Option<ChatPayload> {
        self.inbox.try_recv().ok()
    }

    fn close(&mut self) {
        if let Some(outbox) = self.outbox.take() {
            // Worker may already be gone
            let _ = outbox.send(Outgoing::Close);
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Chat worker panicked");
            }
            debug!(url = %self.url, "Chat connection closed");
        }
    }
}

impl Drop for WsTransport {
    fn drop(&mut self) {
        self.close();
    }
}

fn set_read_timeout(socket: &Socket, timeout: Option<Duration>) {
    let result = match socket.get_ref() {
        MaybeTlsStream::Plain(stream) => stream.set_read_timeout(timeout),
        MaybeTlsStream::Rustls(stream) => stream.get_ref().set_read_timeout(timeout),
        _ => Ok(()),
    };
    if let Err(e) = result {
        warn!("Could not set chat read timeout: {}", e);
    }
}

/// Worker loop: flush queued messages, then wait briefly for input.
///
/// Exits on `Outgoing::Close`, when the outbox is dropped, or when the
/// server closes the connection.
fn worker_loop(mut socket: Socket, outbox: Receiver<Outgoing>, inbox: Sender<ChatPayload>) {
    loop {
        loop {
            match outbox.try_recv() {
                Ok(Outgoing::Text(text)) => {
                    if let Err(e) = socket.send(Message::Text(text)) {
                        warn!("Failed to send chat message: {}", e);
                    }
                }
                Ok(Outgoing::Close) | Err(TryRecvError::Disconnected) => {
                    let _ = socket.close(None);
                    let _ = socket.flush();
                    return;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        match socket.read() {
            Ok(Message::Text(text)) => match ChatPayload::parse(&text) {
                Ok(payload) => {
                    // Receiver gone means the transport is shutting down
                    if inbox.send(payload).is_err() {
                        return;
                    }
                }
                Err(e) => warn!("Dropping malformed chat payload: {}", e),
            },
            Ok(Message::Close(frame)) => {
                info!(?frame, "Chat server closed the connection");
                return;
            }
            Ok(_) => {}
            Err(tungstenite::Error::Io(e))
                if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {}
            Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                return;
            }
            Err(e) => {
                warn!("Chat connection error: {}", e);
                return;
            }
        }
    }
}
