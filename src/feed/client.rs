//! Feed Client
//!
//! Drives one connection at a time through the connect / read / reconnect
//! cycle and hands every decoded frame to the dashboard.

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

use super::{FeedError, ReconnectPolicy};
use crate::dashboard::Dashboard;

/// Text frames of one open connection; the stream ends when the connection closes
pub type FrameStream = BoxStream<'static, Result<String, FeedError>>;

/// Opens feed connections
#[async_trait]
pub trait FeedConnector: Send + Sync {
    async fn connect(&self, url: &str) -> Result<FrameStream, FeedError>;
}

/// WebSocket connector over tokio-tungstenite
#[derive(Debug, Clone, Copy, Default)]
pub struct WsConnector;

#[async_trait]
impl FeedConnector for WsConnector {
    async fn connect(&self, url: &str) -> Result<FrameStream, FeedError> {
        let (stream, _response) = connect_async(url)
            .await
            .map_err(|e| FeedError::Connect(e.to_string()))?;

        let frames = stream.filter_map(|message| async move {
            match message {
                Ok(Message::Text(text)) => Some(Ok(text)),
                Ok(Message::Binary(bytes)) => {
                    Some(String::from_utf8(bytes).map_err(|e| FeedError::Decode(e.to_string())))
                }
                Ok(Message::Close(frame)) => {
                    let reason = frame
                        .map(|f| f.reason.to_string())
                        .unwrap_or_else(|| "none".to_string());
                    debug!(reason = %reason, "Feed close frame received");
                    None
                }
                // Pings are answered by tungstenite
                Ok(_) => None,
                Err(e) => Some(Err(FeedError::from(e))),
            }
        });

        Ok(frames.boxed())
    }
}

/// Reconnecting feed subscription
pub struct FeedClient<C = WsConnector> {
    url: String,
    connector: C,
    policy: ReconnectPolicy,
}

impl FeedClient<WsConnector> {
    pub fn new(url: impl Into<String>, policy: ReconnectPolicy) -> Self {
        Self::with_connector(url, WsConnector, policy)
    }
}

impl<C: FeedConnector + 'static> FeedClient<C> {
    pub fn with_connector(url: impl Into<String>, connector: C, policy: ReconnectPolicy) -> Self {
        Self {
            url: url.into(),
            connector,
            policy,
        }
    }

    pub fn spawn(self, dashboard: Arc<Dashboard>) -> JoinHandle<()> {
        tokio::spawn(self.run(dashboard))
    }

    /// Run until dashboard shutdown or until the reconnect policy gives up
    pub async fn run(self, dashboard: Arc<Dashboard>) {
        let mut shutdown = dashboard.shutdown_receiver();
        let mut attempt: u32 = 0;

        loop {
            if *shutdown.borrow() {
                break;
            }

            dashboard.feed_connecting(attempt).await;

            let opened = tokio::select! {
                _ = shutdown.changed() => break,
                opened = self.session(&dashboard) => opened,
            };

            info!(url = %self.url, "Feed disconnected");
            dashboard.feed_closed().await;

            if opened {
                attempt = 0;
            }
            attempt += 1;

            if !self.policy.allows(attempt) {
                error!(attempts = attempt - 1, "Feed reconnect limit reached");
                dashboard.feed_gave_up(attempt - 1).await;
                break;
            }

            let delay = self.policy.delay_for(attempt);
            info!(
                attempt,
                delay_ms = delay.as_millis() as u64,
                "Reconnecting feed"
            );

            tokio::select! {
                _ = shutdown.changed() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        info!("Feed client stopped");
    }

    /// One connection lifetime. Returns whether the connection opened.
    async fn session(&self, dashboard: &Dashboard) -> bool {
        info!(url = %self.url, "Connecting to feed");

        let mut frames = match self.connector.connect(&self.url).await {
            Ok(frames) => frames,
            Err(e) => {
                warn!(error = %e, "Feed connection failed");
                dashboard.feed_error(&e).await;
                return false;
            }
        };

        info!(url = %self.url, "Feed connected");
        dashboard.feed_opened().await;

        while let Some(frame) = frames.next().await {
            match frame {
                Ok(text) => dashboard.handle_frame(&text).await,
                Err(e) => {
                    // The transport closes after reporting an error
                    error!(error = %e, "Feed error");
                    dashboard.feed_error(&e).await;
                    break;
                }
            }
        }

        true
    }
}
