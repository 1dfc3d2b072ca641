//! Resolution of the final document order.
//!
//! Without a manifest, documents are sorted by relative path. With one,
//! manifest entries come first in manifest order and every remaining
//! document follows, sorted by relative path. Each document appears exactly once.

use std::collections::HashMap;

use crate::models::{Document, Manifest, Resolution};

pub fn resolve(mut documents: Vec<Document>, manifest: Option<&Manifest>) -> Resolution {
    documents.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    let Some(manifest) = manifest else {
        return Resolution {
            documents,
            manifest_used: false,
            missing: Vec::new(),
        };
    };

    let index: HashMap<String, usize> = documents
        .iter()
        .enumerate()
        .map(|(i, doc)| (doc.relative_path.clone(), i))
        .collect();

    let mut consumed = vec![false; documents.len()];
    let mut order = Vec::with_capacity(documents.len());
    let mut missing = Vec::new();

    for entry in &manifest.entries {
        match index.get(&entry.normalized_path()) {
            Some(&i) if consumed[i] => {
                tracing::debug!(document = %entry.document, "Duplicate manifest entry skipped");
            }
            Some(&i) => {
                consumed[i] = true;
                order.push(i);
            }
            None => {
                tracing::warn!(
                    "Specified file '{}' not found in repository",
                    entry.document
                );
                missing.push(entry.document.clone());
            }
        }
    }

    // Unlisted documents keep their sorted order.
    order.extend((0..documents.len()).filter(|&i| !consumed[i]));

    let mut slots: Vec<Option<Document>> = documents.into_iter().map(Some).collect();
    let documents = order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect();

    Resolution {
        documents,
        manifest_used: true,
        missing,
    }
}
