//! WASM bindings for the absurl rewriter.
//!
//! Exposes an `AbsUrlReplacer` class and a one-shot `rewrite()` to JavaScript
//! via wasm-bindgen. Byte methods take and return `Uint8Array`s.

use absurl_rewrite::{Dialect, Replacer};
use wasm_bindgen::prelude::*;

/// Reusable replacer bound to one base URL.
#[wasm_bindgen]
pub struct AbsUrlReplacer {
    inner: Replacer,
}

#[wasm_bindgen]
impl AbsUrlReplacer {
    #[wasm_bindgen(constructor)]
    pub fn new(base_url: &str) -> AbsUrlReplacer {
        AbsUrlReplacer {
            inner: Replacer::new(base_url),
        }
    }

    /// The normalized base URL, without trailing slash.
    #[wasm_bindgen(getter)]
    pub fn base(&self) -> String {
        self.inner.rules().base().to_string()
    }

    #[wasm_bindgen(js_name = replaceInHtml)]
    pub fn replace_in_html(&self, content: &[u8]) -> Vec<u8> {
        self.inner.replace_in_html(content)
    }

    #[wasm_bindgen(js_name = replaceInXml)]
    pub fn replace_in_xml(&self, content: &[u8]) -> Vec<u8> {
        self.inner.replace_in_xml(content)
    }

    #[wasm_bindgen(js_name = replaceHtmlString)]
    pub fn replace_html_string(&self, content: &str) -> String {
        into_string(self.inner.replace_in_html(content.as_bytes()))
    }

    #[wasm_bindgen(js_name = replaceXmlString)]
    pub fn replace_xml_string(&self, content: &str) -> String {
        into_string(self.inner.replace_in_xml(content.as_bytes()))
    }
}

/// Rewrite a document in one call.
///
/// `dialect` is `"html"` or `"xml"`; anything else throws.
#[wasm_bindgen]
pub fn rewrite(content: &str, base_url: &str, dialect: &str) -> Result<String, JsError> {
    let dialect = parse_dialect(dialect)
        .ok_or_else(|| JsError::new(&format!("Unknown dialect: '{dialect}'")))?;
    let replacer = Replacer::new(base_url);
    Ok(into_string(replacer.replace(content.as_bytes(), dialect)))
}

/// Get the rewriter version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn parse_dialect(name: &str) -> Option<Dialect> {
    match name.to_ascii_lowercase().as_str() {
        "html" => Some(Dialect::Html),
        "xml" => Some(Dialect::Xml),
        _ => None,
    }
}

// Rewriting only splices in ASCII quotes and the base string, so UTF-8 input
// stays valid UTF-8.
fn into_string(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
