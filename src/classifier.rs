/// Sentiment classification over HTTP
use js_sys::Promise;
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request as HttpRequest, RequestInit, Response, Window, WorkerGlobalScope};

use crate::config::DispatcherConfig;
use crate::error::ClassifyError;
use crate::label::{SentimentLabel, Verdict};

/// Turns text into a sentiment verdict.
///
/// Every call is one attempt: implementations must not retry.
#[allow(async_fn_in_trait)]
pub trait Classifier {
    async fn classify(&self, text: &str) -> Result<Verdict, ClassifyError>;
}

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ClassifyReply {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    error: Option<String>,
}

/// Posts `{text}` to the configured endpoint with `fetch`
pub struct HttpClassifier {
    config: DispatcherConfig,
}

impl HttpClassifier {
    pub fn new(config: DispatcherConfig) -> HttpClassifier {
        HttpClassifier { config }
    }

    pub fn endpoint(&self) -> &str {
        self.config.endpoint.as_str()
    }
}

impl Classifier for HttpClassifier {
    async fn classify(&self, text: &str) -> Result<Verdict, ClassifyError> {
        let body = serde_json::to_string(&ClassifyRequest { text })
            .map_err(|e| ClassifyError::Malformed(format!("Failed to serialize request: {}", e)))?;

        log::debug!("POST {} ({} bytes)", self.endpoint(), body.len());

        let (status, reply) = post_json(self.endpoint(), &body)
            .await
            .map_err(ClassifyError::Transport)?;

        parse_reply(status, &reply)
    }
}

/// Interpret the classification service's HTTP reply.
///
/// The service answers `{label, score}` on success and `{error}` with a
/// 4xx/5xx status otherwise. A reply carrying only a score still yields
/// a label.
pub fn parse_reply(status: u16, body: &str) -> Result<Verdict, ClassifyError> {
    let reply = serde_json::from_str::<ClassifyReply>(body);

    if !(200..300).contains(&status) {
        let message = reply
            .ok()
            .and_then(|r| r.error)
            .unwrap_or_else(|| body.trim().to_string());
        return Err(ClassifyError::Status { status, message });
    }

    let reply = reply.map_err(|e| ClassifyError::Malformed(e.to_string()))?;

    if let Some(error) = reply.error {
        return Err(ClassifyError::Service(error));
    }

    match (reply.label.and_then(SentimentLabel::new), reply.score) {
        (Some(label), score) => Ok(Verdict::new(label, score)),
        (None, Some(score)) => Ok(Verdict::new(SentimentLabel::from_score(score), Some(score))),
        (None, None) => Err(ClassifyError::Malformed("response has no label".to_string())),
    }
}

async fn post_json(url: &str, body: &str) -> Result<(u16, String), String> {
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(body));

    let request = HttpRequest::new_with_str_and_init(url, &init).map_err(js_error)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(js_error)?;

    let response: Response = JsFuture::from(fetch(&request)?)
        .await
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;

    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;

    Ok((response.status(), text.as_string().unwrap_or_default()))
}

// The dispatcher lives in a service worker, where there is no `window`
fn fetch(request: &HttpRequest) -> Result<Promise, String> {
    let global = js_sys::global();

    if let Some(worker) = global.dyn_ref::<WorkerGlobalScope>() {
        Ok(worker.fetch_with_request(request))
    } else if let Some(window) = global.dyn_ref::<Window>() {
        Ok(window.fetch_with_request(request))
    } else {
        Err("fetch is not available in this context".to_string())
    }
}

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_and_score() {
        let verdict = parse_reply(200, r#"{"label": "positive", "score": 0.91}"#).unwrap();
        assert_eq!(verdict.label.as_str(), "positive");
        assert_eq!(verdict.score, Some(0.91));
    }

    #[test]
    fn test_parse_label_only() {
        let verdict = parse_reply(200, r#"{"label": "neutral"}"#).unwrap();
        assert_eq!(verdict.label.as_str(), "neutral");
        assert_eq!(verdict.score, None);
    }

    #[test]
    fn test_parse_score_only_derives_label() {
        let verdict = parse_reply(200, r#"{"score": 0.2}"#).unwrap();
        assert_eq!(verdict.label.as_str(), "negative");
    }

    #[test]
    fn test_parse_service_error_status() {
        let err = parse_reply(400, r#"{"error": "No text provided"}"#).unwrap_err();
        assert_eq!(
            err,
            ClassifyError::Status { status: 400, message: "No text provided".to_string() }
        );
    }

    #[test]
    fn test_parse_non_json_error_status() {
        let err = parse_reply(502, "Bad Gateway\n").unwrap_err();
        assert_eq!(err, ClassifyError::Status { status: 502, message: "Bad Gateway".to_string() });
    }

    #[test]
    fn test_parse_error_in_success_body() {
        let err = parse_reply(200, r#"{"error": "model not loaded"}"#).unwrap_err();
        assert_eq!(err, ClassifyError::Service("model not loaded".to_string()));
    }

    #[test]
    fn test_parse_malformed_bodies() {
        assert!(matches!(parse_reply(200, "<html>"), Err(ClassifyError::Malformed(_))));
        assert!(matches!(parse_reply(200, "{}"), Err(ClassifyError::Malformed(_))));
        assert!(matches!(parse_reply(200, r#"{"label": ""}"#), Err(ClassifyError::Malformed(_))));
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_string(&ClassifyRequest { text: "great day" }).unwrap();
        assert_eq!(body, r#"{"text":"great day"}"#);
    }
}
