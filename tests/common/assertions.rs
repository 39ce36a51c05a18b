//! Assertion helpers for tests.

use std::path::Path;

use lopdf::{Document, Object};
use pdfdarkmode::services::page_content::{content_stream_ids, decode_stream, latin1_decode};

/// Load a PDF, failing the test with the path on error
pub fn load_pdf(path: &Path) -> Document {
    assert!(path.exists(), "Expected output file {}", path.display());
    Document::load(path).unwrap_or_else(|e| panic!("Invalid PDF {}: {e}", path.display()))
}

/// Decoded content streams of a 1-based page, in drawing order
pub fn page_contents(doc: &Document, page: u32) -> Vec<String> {
    let page_id = doc.get_pages()[&page];
    content_stream_ids(doc, page_id)
        .unwrap()
        .into_iter()
        .map(|id| {
            let stream = doc.get_object(id).and_then(Object::as_stream).unwrap();
            latin1_decode(&decode_stream(stream).unwrap())
        })
        .collect()
}

/// Assert `haystack` contains `needle`, printing the haystack on failure
pub fn assert_contains(haystack: &str, needle: &str) {
    assert!(
        haystack.contains(needle),
        "Expected to find {needle:?} in:\n{haystack}"
    );
}

pub fn assert_not_contains(haystack: &str, needle: &str) {
    assert!(
        !haystack.contains(needle),
        "Did not expect {needle:?} in:\n{haystack}"
    );
}
