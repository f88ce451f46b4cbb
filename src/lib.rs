/// Tweet Sentiment - Chrome Extension for tweet sentiment analysis
/// Built with Rust + WASM + Yew

mod config;
mod error;
mod label;
mod protocol;
mod text_source;
mod inspector;
mod classifier;
mod dispatcher;
mod controller;
mod messaging;
pub mod ui;

use wasm_bindgen::prelude::*;

use crate::classifier::HttpClassifier;
use crate::config::{DispatcherConfig, DEFAULT_ENDPOINT};
use crate::dispatcher::ClassificationDispatcher;
use crate::inspector::PageInspector;
use crate::text_source::DocumentTextSource;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Answer text extraction requests from inside the host page
#[wasm_bindgen]
pub fn start_page_inspector() {
    match DocumentTextSource::current() {
        Some(source) => {
            let inspector = PageInspector::new(source);
            log::info!("Page inspector watching {}", inspector.selector());
            messaging::serve_page_requests(inspector);
        }
        None => log::error!("No document to inspect"),
    }
}

// Build the handler the background loader forwards messages to.
// `None` when the dispatcher cannot be configured.
#[wasm_bindgen]
pub fn start_dispatcher() -> Option<js_sys::Function> {
    match DispatcherConfig::new(DEFAULT_ENDPOINT) {
        Ok(config) => {
            log::info!("Classification dispatcher using {}", config.endpoint);
            let classifier = HttpClassifier::new(config);
            Some(messaging::classification_handler(ClassificationDispatcher::new(classifier)))
        }
        Err(e) => {
            log::error!("Dispatcher not started: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    const MANIFEST: &str = include_str!("../extension/manifest.json");
    const BACKGROUND_LOADER: &str = include_str!("../extension/background_loader.js");
    const POPUP_HTML: &str = include_str!("../extension/popup.html");

    #[test]
    fn test_background_loader_has_no_top_level_await() {
        let manifest: serde_json::Value = serde_json::from_str(MANIFEST).unwrap();
        assert_eq!(manifest["background"]["type"], "module");

        let top_level_await = BACKGROUND_LOADER
            .lines()
            .any(|line| line.starts_with("await ") || (line.starts_with("const ") && line.contains("= await ")));
        assert!(!top_level_await);
    }

    #[test]
    fn test_background_listener_registered_before_wasm_is_ready() {
        // Registered at the top level, not inside the init continuation
        assert!(BACKGROUND_LOADER.lines().any(|line| line.starts_with("chrome.runtime.onMessage.addListener(")));
        assert!(BACKGROUND_LOADER.contains("return true;"));
        assert!(BACKGROUND_LOADER.contains("handlerReady"));
    }

    #[test]
    fn test_popup_links_patternfly_styles() {
        assert!(POPUP_HTML.contains("href=\"patternfly/patternfly.css\""));
        let patternfly = POPUP_HTML.find("patternfly.css").unwrap();
        let own = POPUP_HTML.find("popup.css").unwrap();
        assert!(patternfly < own);
    }
}
