//! Javadoc comment block parsing - description/tag split and first sentence.

use crate::model::TagEntry;
use regex::Regex;
use std::sync::LazyLock;

static RE_BLOCK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z][A-Za-z0-9.]*)\s*(.*)$").unwrap());

static RE_FIRST_SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(.*?\.)(\s|$)").unwrap());

/// Split a javadoc body (delimiters already removed) into the free-form
/// description and its block tags.
///
/// Lines are stripped of the leading `*` decoration. A line whose first
/// token is `@word` starts a block tag; following lines without a tag of
/// their own continue the current tag's value. Inline `{@code}` / `{@link}`
/// markup is left in place for the renderer.
pub fn split(body: &str) -> (String, Vec<TagEntry>) {
    let mut description = String::new();
    let mut tags: Vec<TagEntry> = Vec::new();
    let mut current: Option<TagEntry> = None;

    for raw in body.lines() {
        let line = strip_star(raw);

        if let Some(caps) = RE_BLOCK_TAG.captures(line.trim_start()) {
            if let Some(tag) = current.take() {
                tags.push(tag);
            }
            current = Some(TagEntry {
                name: caps[1].to_string(),
                value: caps[2].trim_end().to_string(),
            });
            continue;
        }

        match current {
            Some(ref mut tag) => {
                // Continuation of a multi-line tag value.
                let text = line.trim();
                if !text.is_empty() {
                    if !tag.value.is_empty() {
                        tag.value.push(' ');
                    }
                    tag.value.push_str(text);
                }
            }
            None => {
                if !description.is_empty() {
                    description.push('\n');
                }
                description.push_str(line.trim_end());
            }
        }
    }
    if let Some(tag) = current.take() {
        tags.push(tag);
    }

    (description.trim().to_string(), tags)
}

/// Strip the raw comment delimiters from a `/** ... */` block.
pub fn strip_delimiters(raw: &str) -> &str {
    let body = raw.trim();
    let body = body.strip_prefix("/**").unwrap_or(body);
    body.strip_suffix("*/").unwrap_or(body).trim_matches('\n')
}

/// First sentence of a description: text through the first period that ends
/// a word, or the whole text when none is found.
pub fn first_sentence(text: &str) -> &str {
    match RE_FIRST_SENTENCE.captures(text) {
        Some(caps) => {
            let m = caps.get(1).unwrap();
            &text[m.start()..m.end()]
        }
        None => text,
    }
}

/// Remove the leading ` * ` decoration from one comment line.
fn strip_star(line: &str) -> &str {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed.strip_prefix("* ") {
        rest
    } else if trimmed == "*" {
        ""
    } else if let Some(rest) = trimmed.strip_prefix('*') {
        rest
    } else {
        trimmed
    }
}
