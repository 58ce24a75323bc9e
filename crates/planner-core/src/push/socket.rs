//! Reconnecting push channel listener.
//!
//! A background task keeps one connection open, forwards every text frame into
//! a channel and reconnects after a fixed delay whenever the connection fails
//! or closes. Shutting the listener down closes the connection and cancels a
//! pending retry.

use std::future::Future;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

/// Delay before reconnecting after a failure or close.
pub const RECONNECT_DELAY: Duration = Duration::from_millis(1500);

/// Error type for push channel operations.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// WebSocket handshake or transport failure.
    #[error("WebSocket error: {0}")]
    WebSocket(Box<tokio_tungstenite::tungstenite::Error>),

    /// Connection could not be established for another reason.
    #[error("Connect error: {0}")]
    Connect(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for PushError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::WebSocket(Box::new(err))
    }
}

/// An open push connection.
pub trait FrameSource: Send {
    /// Next text frame, or `None` once the connection is closed.
    fn next_frame(&mut self) -> impl Future<Output = Option<Result<String, PushError>>> + Send;

    /// Closes the connection. Errors are ignored.
    fn close(&mut self) -> impl Future<Output = ()> + Send;
}

/// Opens push connections.
pub trait Connector: Send + Sync + 'static {
    /// Connection type produced.
    type Source: FrameSource;

    /// Opens a new connection.
    fn connect(&self) -> impl Future<Output = Result<Self::Source, PushError>> + Send;
}

/// Connector for the server's raw WebSocket endpoint.
#[derive(Debug, Clone)]
pub struct WsConnector {
    url: String,
}

impl WsConnector {
    /// Creates a connector for `url` (`ws://` or `wss://`).
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Target URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// WebSocket connection returned by [`WsConnector`].
#[derive(Debug)]
pub struct WsSource {
    inner: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl Connector for WsConnector {
    type Source = WsSource;

    async fn connect(&self) -> Result<WsSource, PushError> {
        debug!("Connecting push channel to {}", self.url);
        let (inner, _response) = connect_async(self.url.as_str()).await?;
        Ok(WsSource { inner })
    }
}

impl FrameSource for WsSource {
    async fn next_frame(&mut self) -> Option<Result<String, PushError>> {
        loop {
            match self.inner.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(text.as_str().to_owned())),
                Ok(Message::Binary(bytes)) => {
                    return Some(Ok(String::from_utf8_lossy(&bytes).into_owned()));
                }
                Ok(Message::Close(_)) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
        }
    }

    async fn close(&mut self) {
        if let Err(e) = self.inner.close(None).await {
            debug!("Ignoring error while closing push channel: {e}");
        }
    }
}

/// Handle to the background listener task.
#[derive(Debug)]
pub struct PushListener {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl PushListener {
    /// Spawns the listener. Frames are forwarded into `frames` until the
    /// listener is shut down or the receiving side is dropped.
    #[must_use]
    pub fn spawn<C: Connector>(connector: C, frames: mpsc::Sender<String>, delay: Duration) -> Self {
        let (shutdown, signal) = watch::channel(false);
        let handle = tokio::spawn(run(connector, frames, delay, signal));
        Self { shutdown, handle }
    }

    /// Whether the background task is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Closes the connection, cancels any pending retry and waits for the
    /// task to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            warn!("Push listener task failed: {e}");
        }
    }
}

enum Disconnect {
    Closed,
    Stop,
}

async fn run<C: Connector>(
    connector: C,
    frames: mpsc::Sender<String>,
    delay: Duration,
    mut signal: watch::Receiver<bool>,
) {
    loop {
        let connected = tokio::select! {
            _ = signal.changed() => break,
            result = connector.connect() => result,
        };

        match connected {
            Ok(mut source) => {
                info!("Push channel connected");
                let outcome = pump(&mut source, &frames, &mut signal).await;
                source.close().await;
                match outcome {
                    Disconnect::Stop => break,
                    Disconnect::Closed => info!("Push channel closed"),
                }
            }
            Err(e) => warn!("Push channel connect failed: {e}"),
        }

        debug!("Reconnecting push channel in {delay:?}");
        tokio::select! {
            _ = signal.changed() => break,
            () = tokio::time::sleep(delay) => {}
        }
    }
    debug!("Push listener stopped");
}

async fn pump<S: FrameSource>(
    source: &mut S,
    frames: &mpsc::Sender<String>,
    signal: &mut watch::Receiver<bool>,
) -> Disconnect {
    loop {
        let next = tokio::select! {
            _ = signal.changed() => return Disconnect::Stop,
            next = source.next_frame() => next,
        };

        match next {
            Some(Ok(frame)) => {
                let sent = tokio::select! {
                    _ = signal.changed() => return Disconnect::Stop,
                    sent = frames.send(frame) => sent,
                };
                if sent.is_err() {
                    debug!("Push frame receiver dropped");
                    return Disconnect::Stop;
                }
            }
            Some(Err(e)) => {
                debug!("Push channel error: {e}");
                return Disconnect::Closed;
            }
            None => return Disconnect::Closed,
        }
    }
}
