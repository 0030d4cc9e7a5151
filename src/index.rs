//! Alphabetical index over the doc model.
//!
//! Every type and method files into a bucket keyed by the uppercased first
//! character of its simple name (types) or method name (methods). Buckets
//! are get-or-insert into an ordered map; entries within a bucket follow
//! their sort keys.

use crate::model::DocModel;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Type,
    Method,
}

/// One line in the alphabetical index.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    /// Link text, e.g. `String` or `reverse()`.
    pub label: String,
    /// Target relative to the output root.
    pub href: String,
    /// Trailing description, e.g. `Class in java.lang`.
    pub blurb: String,
    pub kind: IndexKind,
    sort_key: String,
}

/// Build the index buckets from the doc tree.
pub fn build_index(model: &DocModel) -> BTreeMap<char, Vec<IndexEntry>> {
    let mut buckets: BTreeMap<char, Vec<IndexEntry>> = BTreeMap::new();

    for doc_type in model.types() {
        let simple = doc_type.simple_name();
        buckets
            .entry(bucket_of(simple))
            .or_default()
            .push(IndexEntry {
                label: simple.to_string(),
                href: doc_type.page_path(),
                blurb: format!("{} in {}", doc_type.kind(), doc_type.package_name()),
                kind: IndexKind::Type,
                sort_key: doc_type.sort_key(),
            });

        for method in doc_type.methods() {
            buckets
                .entry(bucket_of(method.name()))
                .or_default()
                .push(IndexEntry {
                    label: method.anchor(),
                    href: format!("{}#{}", doc_type.page_path(), method.anchor()),
                    blurb: format!("Method extending {}", doc_type.fqcn),
                    kind: IndexKind::Method,
                    sort_key: method.sort_key(),
                });
        }
    }

    for entries in buckets.values_mut() {
        entries.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));
    }
    buckets
}

fn bucket_of(name: &str) -> char {
    name.chars()
        .next()
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('?')
}
