//! Query context assembly.
//!
//! Each grounding document becomes one pretty-printed JSON block. Text
//! that already parses as JSON is passed through re-formatted, anything
//! else is wrapped in a small envelope. Blocks are joined with blank
//! lines and each one ends with a `---` divider.

use serde_json::{json, Value};

use super::QueryDocument;

/// Build the context string handed to the answer backend.
pub fn build_context(documents: &[QueryDocument]) -> String {
    documents
        .iter()
        .map(document_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn document_block(doc: &QueryDocument) -> String {
    // A nameless, textless document still yields a block, the backend
    // sees at least the file name.
    let source = if doc.text.is_empty() {
        doc.name.clone()
    } else {
        doc.text.clone()
    };

    let payload = match serde_json::from_str::<Value>(&source) {
        Ok(value) => value,
        Err(_) => json!({
            "fileName": doc.name,
            "content": source,
            "fileType": if doc.doc_type.is_empty() { "unknown" } else { doc.doc_type.as_str() },
        }),
    };
    let rendered = serde_json::to_string_pretty(&payload)
        .unwrap_or_else(|_| payload.to_string());

    format!("Document JSON:\n{rendered}\n---")
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
