use hd_core::Digest;
use crate::error::ClientError;
use crate::render::render;
use crate::source::DigestSource;
use crate::view::{Phase, ViewState};

/// Drives one page: a trigger issues a single digest request and the outcome replaces the view.
///
/// `trigger` borrows the controller mutably, so a second request cannot start
/// while one is in flight.
pub struct DigestController<S> {
    source: S,
    view: ViewState,
}

impl<S: DigestSource> DigestController<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            view: ViewState::default(),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn trigger(&mut self) -> Phase {
        self.view.loading();
        let result = self.source.fetch_digest().await;
        self.apply(result)
    }

    /// Applies the outcome of a request to the view.
    pub fn apply(&mut self, result: Result<Digest, ClientError>) -> Phase {
        match result {
            Ok(digest) => {
                tracing::debug!("Rendering digest with {} articles", digest.articles.len());
                self.view.success(render(&digest));
            }
            Err(e) => {
                tracing::error!("Fetch error: {}", e);
                self.view.failure(e.to_string());
            }
        }
        self.view.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use hd_core::DigestArticle;
    use crate::render::NO_ARTICLES;
    use crate::view::{REFRESH_LABEL, START_LABEL};

    /// Replays queued responses, one per request.
    #[derive(Default)]
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<Digest, ClientError>>>,
        requests: Mutex<usize>,
    }

    impl ScriptedSource {
        fn push(self, response: Result<Digest, ClientError>) -> Self {
            self.responses.lock().unwrap().push_back(response);
            self
        }

        fn requests(&self) -> usize {
            *self.requests.lock().unwrap()
        }
    }

    #[async_trait]
    impl DigestSource for ScriptedSource {
        async fn fetch_digest(&self) -> Result<Digest, ClientError> {
            *self.requests.lock().unwrap() += 1;
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ClientError::Status(503)))
        }
    }

    fn digest(n: usize, summary: &str) -> Digest {
        Digest {
            summary: summary.to_string(),
            articles: (0..n)
                .map(|i| DigestArticle {
                    id: i.to_string(),
                    title: format!("Story {}", i),
                    url: format!("https://example.com/{}", i),
                    score: 100 - i as u32,
                    age_text: "2 hours ago".to_string(),
                    date: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_initial_view() {
        let controller = DigestController::new(ScriptedSource::default());
        let view = controller.view();
        assert_eq!(view.phase, Phase::Idle);
        assert!(view.trigger_visible);
        assert_eq!(view.trigger_label, START_LABEL);
        assert!(!view.loading_visible && !view.error_visible && !view.results_visible);
    }

    #[test]
    fn test_loading_hides_trigger() {
        let mut view = ViewState::default();
        view.failure("old".to_string());
        view.loading();
        assert_eq!(view.phase, Phase::Loading);
        assert!(!view.trigger_visible);
        assert!(view.loading_visible);
        assert!(!view.error_visible);
        assert!(!view.results_visible);
    }

    #[tokio::test]
    async fn test_success_renders_cards() {
        let source = ScriptedSource::default().push(Ok(digest(3, "one\n\ntwo\n\n\n\nthree")));
        let mut controller = DigestController::new(source);

        assert_eq!(controller.trigger().await, Phase::Success);
        let view = controller.view();
        assert!(view.results_visible);
        assert!(!view.loading_visible);
        assert!(!view.error_visible);
        assert!(view.trigger_visible);
        assert_eq!(view.trigger_label, REFRESH_LABEL);
        assert_eq!(view.rendered.summary_blocks.len(), 3);
        assert_eq!(view.rendered.cards.len(), 3);
        assert_eq!(controller.source().requests(), 1);
    }

    #[tokio::test]
    async fn test_success_without_articles() {
        let source = ScriptedSource::default().push(Ok(digest(0, "nothing today")));
        let mut controller = DigestController::new(source);

        controller.trigger().await;
        let cards = &controller.view().rendered.cards;
        assert_eq!(cards.len(), 1);
        assert!(cards[0].contains(NO_ARTICLES));
    }

    #[tokio::test]
    async fn test_status_error_shows_panel() {
        let source = ScriptedSource::default().push(Err(ClientError::Status(502)));
        let mut controller = DigestController::new(source);

        assert_eq!(controller.trigger().await, Phase::Error);
        let view = controller.view();
        assert!(view.error_visible);
        assert!(!view.loading_visible);
        assert!(view.trigger_visible);
        assert_eq!(view.trigger_label, START_LABEL);
        assert_eq!(view.error_message, "HTTP error! status: 502");
    }

    #[tokio::test]
    async fn test_decode_error_message_is_verbatim() {
        let decode = serde_json::from_str::<Digest>("{").unwrap_err();
        let expected = decode.to_string();
        let source = ScriptedSource::default().push(Err(ClientError::Decode(decode)));
        let mut controller = DigestController::new(source);

        controller.trigger().await;
        assert_eq!(controller.view().error_message, expected);
    }

    #[tokio::test]
    async fn test_retrigger_replaces_content() {
        let source = ScriptedSource::default()
            .push(Ok(digest(4, "first")))
            .push(Ok(digest(2, "second\n\nrun")));
        let mut controller = DigestController::new(source);

        controller.trigger().await;
        assert_eq!(controller.view().rendered.cards.len(), 4);

        controller.trigger().await;
        let view = controller.view();
        assert_eq!(view.rendered.cards.len(), 2);
        assert_eq!(view.rendered.summary_blocks, vec!["<p>second</p>", "<p>run</p>"]);
        assert_eq!(controller.source().requests(), 2);
    }

    #[tokio::test]
    async fn test_success_after_error_hides_panel() {
        let source = ScriptedSource::default()
            .push(Err(ClientError::Status(500)))
            .push(Ok(digest(1, "back")));
        let mut controller = DigestController::new(source);

        controller.trigger().await;
        assert!(controller.view().error_visible);

        controller.trigger().await;
        let view = controller.view();
        assert_eq!(view.phase, Phase::Success);
        assert!(!view.error_visible);
        assert!(view.results_visible);
    }
}
