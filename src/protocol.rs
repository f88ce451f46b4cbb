/// Messages exchanged between the popup, the content script and the
/// background service worker.
///
/// The shapes match what `chrome.runtime` / `chrome.tabs` carry as plain
/// JS objects:
///
/// - `{action: "getTweetText"}` → `{tweetText}`
/// - `{action: "analyzeSentiment", text}` → `{sentiment, score?}` or `{error}`
use serde::{Deserialize, Serialize};

use crate::config::TEXT_NOT_FOUND;
use crate::error::ClassifyError;
use crate::label::{SentimentLabel, Verdict};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    /// Popup → content script
    GetTweetText,
    /// Popup → background
    AnalyzeSentiment { text: String },
}

/// Content script reply to `GetTweetText`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub tweet_text: String,
}

impl ExtractResponse {
    pub fn new(tweet_text: impl Into<String>) -> ExtractResponse {
        ExtractResponse {
            tweet_text: tweet_text.into(),
        }
    }

    pub fn not_found() -> ExtractResponse {
        ExtractResponse::new(TEXT_NOT_FOUND)
    }

    /// False when the page had no tweet element.
    ///
    /// The wire reply carries only `tweetText`, so the placeholder is the
    /// signal: a tweet whose text is literally the placeholder reads as
    /// not found too.
    pub fn is_found(&self) -> bool {
        self.tweet_text != TEXT_NOT_FOUND
    }
}

/// Background reply to `AnalyzeSentiment`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SentimentResponse {
    Sentiment {
        sentiment: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        score: Option<f64>,
    },
    Error {
        error: String,
    },
}

impl SentimentResponse {
    /// The verdict carried by a successful reply.
    ///
    /// A reply with a blank label counts as a failure, same as `{error}`.
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            SentimentResponse::Sentiment { sentiment, score } => {
                SentimentLabel::new(sentiment.as_str()).map(|label| Verdict::new(label, *score))
            }
            SentimentResponse::Error { .. } => None,
        }
    }
}

impl From<Verdict> for SentimentResponse {
    fn from(verdict: Verdict) -> Self {
        SentimentResponse::Sentiment {
            sentiment: verdict.label.to_string(),
            score: verdict.score,
        }
    }
}

impl From<ClassifyError> for SentimentResponse {
    fn from(error: ClassifyError) -> Self {
        SentimentResponse::Error {
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        assert_eq!(
            serde_json::to_value(&Request::GetTweetText).unwrap(),
            json!({"action": "getTweetText"})
        );
        assert_eq!(
            serde_json::to_value(&Request::AnalyzeSentiment { text: "gm".to_string() }).unwrap(),
            json!({"action": "analyzeSentiment", "text": "gm"})
        );
    }

    #[test]
    fn test_request_from_js_object() {
        let request: Request =
            serde_json::from_value(json!({"action": "analyzeSentiment", "text": "so good"})).unwrap();
        assert_eq!(request, Request::AnalyzeSentiment { text: "so good".to_string() });
    }

    #[test]
    fn test_unknown_action_rejected() {
        let result = serde_json::from_value::<Request>(json!({"action": "closeTab"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_response_uses_camel_case() {
        let response = ExtractResponse::new("hello world");
        assert_eq!(serde_json::to_value(&response).unwrap(), json!({"tweetText": "hello world"}));
    }

    #[test]
    fn test_extract_response_not_found() {
        assert!(!ExtractResponse::not_found().is_found());
        assert!(ExtractResponse::new("an actual tweet").is_found());
    }

    #[test]
    fn test_placeholder_text_reads_as_not_found() {
        let response: ExtractResponse =
            serde_json::from_value(json!({"tweetText": "Tweet text not found!"})).unwrap();
        assert!(!response.is_found());
        assert!(ExtractResponse::new("Tweet text not found").is_found());
    }

    #[test]
    fn test_sentiment_response_variants() {
        let ok: SentimentResponse = serde_json::from_value(json!({"sentiment": "positive"})).unwrap();
        assert_eq!(ok.verdict().unwrap().label.as_str(), "positive");

        let scored: SentimentResponse =
            serde_json::from_value(json!({"sentiment": "negative", "score": 0.2})).unwrap();
        assert_eq!(scored.verdict().unwrap().score, Some(0.2));

        let err: SentimentResponse = serde_json::from_value(json!({"error": "boom"})).unwrap();
        assert_eq!(err, SentimentResponse::Error { error: "boom".to_string() });
        assert_eq!(err.verdict(), None);
    }

    #[test]
    fn test_blank_sentiment_is_not_a_verdict() {
        let response = SentimentResponse::Sentiment { sentiment: "".to_string(), score: None };
        assert_eq!(response.verdict(), None);
    }

    #[test]
    fn test_empty_object_is_not_a_sentiment_response() {
        assert!(serde_json::from_value::<SentimentResponse>(json!({})).is_err());
    }

    #[test]
    fn test_from_classify_error() {
        let response = SentimentResponse::from(ClassifyError::Transport("connection refused".to_string()));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"error": "Transport error: connection refused"})
        );
    }
}
