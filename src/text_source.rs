/// Read access to the text of the host page
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

/// Something that can look up one element and return its visible text
pub trait TextSource {
    /// Visible text of the first element matching `selector`, or `None`
    /// when nothing matches.
    fn text_of(&self, selector: &str) -> Option<String>;
}

/// The live DOM of the page the content script runs in
pub struct DocumentTextSource {
    document: Document,
}

impl DocumentTextSource {
    pub fn new(document: Document) -> DocumentTextSource {
        DocumentTextSource { document }
    }

    /// The current window's document, if there is one
    pub fn current() -> Option<DocumentTextSource> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(DocumentTextSource::new)
    }
}

impl TextSource for DocumentTextSource {
    fn text_of(&self, selector: &str) -> Option<String> {
        // query_selector errors only on a bad selector; treat that as absent
        let element = self.document.query_selector(selector).ok()??;

        match element.dyn_into::<HtmlElement>() {
            Ok(html) => Some(html.inner_text()),
            Err(element) => element.text_content(),
        }
    }
}
