use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use dacanews_logging::{widget_debug, widget_error, widget_info, widget_warn};
use tokio_util::sync::CancellationToken;

use crate::decode::{decode_html, decode_html_lossy};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::page::fragment_pagination_urls;
use crate::{EngineEvent, FailureKind, FetchError, FetchedFragment, RequestId};

type PageReply = mpsc::Sender<Result<FetchedFragment, FetchError>>;

enum EngineCommand {
    Fetch { request_id: RequestId, url: String },
    LoadPage { url: String, reply: PageReply },
}

type Inflight = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

/// Runs fetches on a background tokio runtime and reports completions over a
/// channel. Each request can be cancelled by id.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    inflight: Inflight,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Self {
        Self::with_fetcher(Arc::new(ReqwestFetcher::new(settings)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let inflight: Inflight = Arc::new(Mutex::new(HashMap::new()));
        let registry = inflight.clone();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    widget_error!("cannot start fetch runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                let registry = registry.clone();
                runtime.spawn(async move {
                    handle_command(fetcher.as_ref(), command, event_tx, registry).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx,
            inflight,
        }
    }

    pub fn fetch(&self, request_id: RequestId, url: impl Into<String>) {
        // Register before queueing so a cancel issued right after always
        // finds the token.
        if let Ok(mut inflight) = self.inflight.lock() {
            inflight.insert(request_id, CancellationToken::new());
        }
        let _ = self.cmd_tx.send(EngineCommand::Fetch {
            request_id,
            url: url.into(),
        });
    }

    pub fn cancel(&self, request_id: RequestId) {
        let token = self
            .inflight
            .lock()
            .ok()
            .and_then(|mut inflight| inflight.remove(&request_id));
        if let Some(token) = token {
            widget_debug!("cancelling request {}", request_id);
            token.cancel();
        }
    }

    /// Fetches a whole page and waits for it. Used once at start-up, before
    /// the widget exists.
    pub fn load_page(&self, url: impl Into<String>) -> Result<FetchedFragment, FetchError> {
        let url = url.into();
        let (reply, response) = mpsc::channel();
        self.cmd_tx
            .send(EngineCommand::LoadPage {
                url: url.clone(),
                reply,
            })
            .map_err(|_| FetchError::new(FailureKind::Network, "fetch engine stopped"))?;
        response
            .recv()
            .map_err(|_| FetchError::new(FailureKind::Network, "fetch engine stopped"))?
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    fetcher: &dyn Fetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
    registry: Inflight,
) {
    match command {
        EngineCommand::Fetch { request_id, url } => {
            let token = registry
                .lock()
                .ok()
                .and_then(|inflight| inflight.get(&request_id).cloned());
            let result = match token {
                Some(token) => {
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => Err(FetchError::for_url(FailureKind::Cancelled, &url)),
                        result = fetch_fragment(fetcher, &url) => result,
                    }
                }
                // Cancelled before the runtime picked the command up.
                None => Err(FetchError::for_url(FailureKind::Cancelled, &url)),
            };
            if let Ok(mut inflight) = registry.lock() {
                inflight.remove(&request_id);
            }
            let _ = event_tx.send(EngineEvent::FetchCompleted { request_id, result });
        }
        EngineCommand::LoadPage { url, reply } => {
            widget_info!("loading page {}", url);
            let _ = reply.send(fetch_fragment(fetcher, &url).await);
        }
    }
}

async fn fetch_fragment(fetcher: &dyn Fetcher, url: &str) -> Result<FetchedFragment, FetchError> {
    let output = fetcher.fetch(url).await?;
    let content_type = output.metadata.content_type.as_deref();
    // A 2xx body is always shown, even with a few bytes that do not fit its charset.
    let decoded = decode_html(&output.bytes, content_type).unwrap_or_else(|err| {
        widget_warn!("{} from {}, replacing bad bytes", err, url);
        decode_html_lossy(&output.bytes, content_type)
    });
    let pagination_urls = fragment_pagination_urls(&decoded.html).unwrap_or_else(|err| {
        widget_error!("pagination scan failed: {}", err);
        Vec::new()
    });
    Ok(FetchedFragment {
        html: decoded.html,
        encoding_label: decoded.encoding_label,
        pagination_urls,
        metadata: output.metadata,
    })
}
