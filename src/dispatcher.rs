/// Classification dispatcher: runs in the background service worker and
/// relays text from the popup to the classifier.
use crate::classifier::Classifier;
use crate::error::ClassifyError;
use crate::protocol::{Request, SentimentResponse};

pub struct ClassificationDispatcher<C> {
    classifier: C,
}

impl<C: Classifier> ClassificationDispatcher<C> {
    pub fn new(classifier: C) -> ClassificationDispatcher<C> {
        ClassificationDispatcher { classifier }
    }

    /// Reply to a request addressed to the background, `None` for anything
    /// else so another listener can answer it.
    pub async fn handle(&self, request: &Request) -> Option<SentimentResponse> {
        match request {
            Request::AnalyzeSentiment { text } => Some(self.analyze(text).await),
            Request::GetTweetText => None,
        }
    }

    /// Classify `text`. Failures come back as `{error}`, never as a panic
    /// or a dropped reply.
    pub async fn analyze(&self, text: &str) -> SentimentResponse {
        if text.trim().is_empty() {
            log::warn!("Refusing to classify empty text");
            return ClassifyError::EmptyText.into();
        }

        match self.classifier.classify(text).await {
            Ok(verdict) => {
                log::info!("Classified as {}", verdict.label);
                verdict.into()
            }
            Err(e) => {
                log::error!("Classification failed: {}", e);
                e.into()
            }
        }
    }
}
