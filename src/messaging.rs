/// Typed request/response channels over the extension messaging APIs.
///
/// The JS bridges only move plain objects between `chrome.*` and Rust;
/// (de)serialization and routing live here.
use js_sys::Promise;
use serde::de::DeserializeOwned;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::classifier::Classifier;
use crate::dispatcher::ClassificationDispatcher;
use crate::inspector::PageInspector;
use crate::protocol::{ExtractResponse, Request, SentimentResponse};
use crate::text_source::TextSource;

// Popup side
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn sendToActiveTab(message: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendToBackground(message: JsValue) -> Result<JsValue, JsValue>;
}

// Content script side
#[wasm_bindgen(module = "/content.js")]
extern "C" {
    fn listenForPageRequests(handler: &js_sys::Function);
}

#[derive(Clone, Copy, Debug)]
enum Target {
    ActiveTab,
    Background,
}

/// Ask the content script in the active tab for the tweet text
pub async fn request_page_text() -> Option<ExtractResponse> {
    exchange(Target::ActiveTab, &Request::GetTweetText).await
}

/// Ask the background dispatcher to classify `text`
pub async fn request_sentiment(text: String) -> Option<SentimentResponse> {
    exchange(Target::Background, &Request::AnalyzeSentiment { text }).await
}

/// Send one request and wait for its reply
async fn exchange<R: DeserializeOwned>(target: Target, request: &Request) -> Option<R> {
    let message = match serde_wasm_bindgen::to_value(request) {
        Ok(message) => message,
        Err(e) => {
            log::error!("Failed to serialize {:?}: {:?}", request, e);
            return None;
        }
    };

    log::debug!("Sending {:?} to {:?}", request, target);

    let reply = match target {
        Target::ActiveTab => sendToActiveTab(message).await,
        Target::Background => sendToBackground(message).await,
    };

    match reply {
        Ok(reply) => decode_reply(reply),
        Err(e) => {
            log::warn!("Message to {:?} failed: {:?}", target, e);
            None
        }
    }
}

/// Decode a reply. No receiver (`undefined`), `null` and a wrong shape are
/// all `None`.
pub fn decode_reply<R: DeserializeOwned>(reply: JsValue) -> Option<R> {
    if reply.is_null() || reply.is_undefined() {
        log::warn!("No reply");
        return None;
    }

    match serde_wasm_bindgen::from_value(reply) {
        Ok(response) => Some(response),
        Err(e) => {
            log::warn!("Unexpected reply: {:?}", e);
            None
        }
    }
}

fn parse_request(message: JsValue) -> Option<Request> {
    match serde_wasm_bindgen::from_value(message) {
        Ok(request) => Some(request),
        Err(e) => {
            log::debug!("Ignoring message: {:?}", e);
            None
        }
    }
}

/// The content script's reply to `message`, `undefined` when the message
/// is not addressed to the page
pub fn page_reply<S: TextSource>(inspector: &PageInspector<S>, message: JsValue) -> JsValue {
    parse_request(message)
        .and_then(|request| inspector.handle(&request))
        .and_then(|response| serde_wasm_bindgen::to_value(&response).ok())
        .unwrap_or(JsValue::UNDEFINED)
}

/// A promise of the dispatcher's reply to `message`, or `None` when the
/// message is not an `AnalyzeSentiment` request
pub fn background_reply<C: Classifier + 'static>(
    dispatcher: &Rc<ClassificationDispatcher<C>>,
    message: JsValue,
) -> Option<Promise> {
    let request = parse_request(message)?;
    if !matches!(request, Request::AnalyzeSentiment { .. }) {
        return None;
    }

    let dispatcher = Rc::clone(dispatcher);
    Some(future_to_promise(async move {
        let response = dispatcher.handle(&request).await;
        serde_wasm_bindgen::to_value(&response).map_err(JsValue::from)
    }))
}

/// Answer `GetTweetText` from the page this content script runs in
pub fn serve_page_requests<S: TextSource + 'static>(inspector: PageInspector<S>) {
    let handler = Closure::<dyn Fn(JsValue) -> JsValue>::new(move |message: JsValue| {
        page_reply(&inspector, message)
    });

    listenForPageRequests(handler.as_ref().unchecked_ref());
    // The listener lives as long as the page
    handler.forget();
}

/// Handler for the background loader's `onMessage` listener.
///
/// The loader registers its listener on the worker's first turn, before
/// wasm is ready, keeps every channel open and calls this once it is.
/// The handler returns a `Promise` of the reply, or `undefined` for
/// messages the dispatcher does not own.
pub fn classification_handler<C: Classifier + 'static>(
    dispatcher: ClassificationDispatcher<C>,
) -> js_sys::Function {
    let dispatcher = Rc::new(dispatcher);

    let handler = Closure::<dyn Fn(JsValue) -> JsValue>::new(move |message: JsValue| {
        background_reply(&dispatcher, message)
            .map(JsValue::from)
            .unwrap_or(JsValue::UNDEFINED)
    });

    handler.into_js_value().unchecked_into()
}
