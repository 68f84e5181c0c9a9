use dacanews_core::{Effect, Msg};
use dacanews_engine::{EngineEvent, EngineHandle};
use dacanews_logging::{widget_debug, widget_info};

/// Executes widget effects against the fetch engine and turns engine events
/// back into widget messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    /// Runs fetch effects and returns the alerts the host has to show.
    pub fn enqueue(&self, effects: Vec<Effect>) -> Vec<String> {
        let mut alerts = Vec::new();
        for effect in effects {
            match effect {
                Effect::Fetch {
                    request_id,
                    url,
                    kind,
                } => {
                    widget_info!("Fetch request_id={} kind={:?} url={}", request_id, kind, url);
                    self.engine.fetch(request_id, url);
                }
                Effect::CancelFetch { request_id } => {
                    self.engine.cancel(request_id);
                }
                Effect::ShowAlert { message } => alerts.push(message),
            }
        }
        alerts
    }

    pub fn poll(&self) -> Option<Msg> {
        self.engine.try_recv().map(into_msg)
    }
}

fn into_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::FetchCompleted { request_id, result } => match result {
            Ok(fragment) => {
                widget_debug!(
                    "request {} done: {} bytes ({}) from {}",
                    request_id,
                    fragment.metadata.byte_len,
                    fragment.encoding_label,
                    fragment.metadata.final_url
                );
                Msg::FragmentLoaded {
                    request_id,
                    html: fragment.html,
                    pagination_urls: fragment.pagination_urls,
                }
            }
            Err(err) if err.is_cancelled() => Msg::RequestCancelled { request_id },
            Err(err) => Msg::RequestFailed {
                request_id,
                message: err.message,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dacanews_engine::{FailureKind, FetchError, FetchMetadata, FetchedFragment};

    #[test]
    fn engine_outcomes_become_messages() {
        let fragment = FetchedFragment {
            html: "<p>x</p>".into(),
            encoding_label: "UTF-8".into(),
            pagination_urls: vec!["search/?page=2".into()],
            metadata: FetchMetadata {
                original_url: "http://dacanews.test/search/?q=x".into(),
                final_url: "http://dacanews.test/search/?q=x".into(),
                redirect_count: 0,
                content_type: None,
                byte_len: 8,
            },
        };
        assert_eq!(
            into_msg(EngineEvent::FetchCompleted {
                request_id: 2,
                result: Ok(fragment),
            }),
            Msg::FragmentLoaded {
                request_id: 2,
                html: "<p>x</p>".into(),
                pagination_urls: vec!["search/?page=2".into()],
            }
        );

        let cancelled = FetchError {
            kind: FailureKind::Cancelled,
            message: "Cannot request x: cancelled".into(),
        };
        assert_eq!(
            into_msg(EngineEvent::FetchCompleted {
                request_id: 1,
                result: Err(cancelled),
            }),
            Msg::RequestCancelled { request_id: 1 }
        );

        let missing = FetchError {
            kind: FailureKind::HttpStatus(404),
            message: "Cannot request x, got 404".into(),
        };
        assert_eq!(
            into_msg(EngineEvent::FetchCompleted {
                request_id: 3,
                result: Err(missing),
            }),
            Msg::RequestFailed {
                request_id: 3,
                message: "Cannot request x, got 404".into(),
            }
        );
    }
}
