/// Page inspector: answers text extraction requests inside the host page
use crate::config::TWEET_TEXT_SELECTOR;
use crate::protocol::{ExtractResponse, Request};
use crate::text_source::TextSource;

pub struct PageInspector<S> {
    source: S,
    selector: String,
}

impl<S: TextSource> PageInspector<S> {
    /// Inspector looking for the tweet body element
    pub fn new(source: S) -> PageInspector<S> {
        PageInspector::with_selector(source, TWEET_TEXT_SELECTOR)
    }

    pub fn with_selector(source: S, selector: impl Into<String>) -> PageInspector<S> {
        PageInspector {
            source,
            selector: selector.into(),
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Read the designated element once. A missing element is reported
    /// with the not-found placeholder and never retried.
    pub fn extract_text(&self) -> ExtractResponse {
        match self.source.text_of(&self.selector) {
            Some(text) => ExtractResponse::new(text),
            None => {
                log::warn!("No element matches {}", self.selector);
                ExtractResponse::not_found()
            }
        }
    }

    /// Reply to a request addressed to the page, `None` for anything else
    pub fn handle(&self, request: &Request) -> Option<ExtractResponse> {
        match request {
            Request::GetTweetText => Some(self.extract_text()),
            Request::AnalyzeSentiment { .. } => None,
        }
    }
}
