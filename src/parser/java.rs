//! Java source scanner - line-by-line extraction of the constructs the
//! pipeline consumes: package and import declarations, type declarations,
//! method signatures, and the javadoc blocks attached to them.
//!
//! This is deliberately not a full Java parser. Signatures may span lines
//! (buffered until the parameter list balances), bodies are tracked only by
//! brace depth, and anything that fails to parse as a declaration is ignored.

use crate::model::{ParsedClass, ParsedMethod, ParsedParam};
use crate::parser::javadoc;
use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_PACKAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*package\s+([\w.]+)\s*;").unwrap());

static RE_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*import\s+(static\s+)?([\w.]+(?:\.\*)?)\s*;").unwrap());

static RE_TYPE_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:public|final|abstract|strictfp)\s+)*(class|interface|enum)\s+([A-Za-z_$][\w$]*)")
        .unwrap()
});

static RE_DEPRECATED_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*@Deprecated\b").unwrap());

static RE_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*@[A-Za-z_$][\w$]*").unwrap());

static RE_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][\w$]*$").unwrap());

static RE_RETURN_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w$.<>\[\]&?, ]+$").unwrap());

const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "final",
    "abstract",
    "synchronized",
    "native",
    "strictfp",
    "default",
];

const KEYWORDS: &[&str] = &[
    "return", "new", "throw", "if", "while", "for", "else", "case", "assert", "switch", "do",
];

// -- Scanner state ------------------------------------------------------------

#[derive(Default)]
struct ScanState {
    classes: Vec<ParsedClass>,
    package: String,
    imports: Vec<String>,
    /// Brace depth; 0 = top level, 1 = inside a type body.
    depth: i32,
    in_javadoc: bool,
    in_block_comment: bool,
    comment_buf: String,
    /// Completed javadoc block waiting for the declaration it documents.
    pending_comment: Option<String>,
    pending_deprecated: bool,
    /// Declaration whose parameter list has not balanced yet.
    signature_buf: Option<String>,
}

/// Parse one Java source file into its declared classes.
pub fn parse(input: &str) -> Vec<ParsedClass> {
    let mut state = ScanState::default();
    for line in input.lines() {
        process_line(&mut state, line);
    }
    state.classes
}

// -- Line processing ----------------------------------------------------------

fn process_line(s: &mut ScanState, line: &str) {
    // Inside a plain block comment (license headers and the like).
    if s.in_block_comment {
        if line.contains("*/") {
            s.in_block_comment = false;
        }
        return;
    }

    // Inside a javadoc block.
    if s.in_javadoc {
        s.comment_buf.push('\n');
        s.comment_buf.push_str(line);
        if line.contains("*/") {
            s.in_javadoc = false;
            s.pending_comment = Some(std::mem::take(&mut s.comment_buf));
        }
        return;
    }

    let trimmed = line.trim_start();

    if trimmed.starts_with("/**") {
        if trimmed.contains("*/") {
            s.pending_comment = Some(trimmed.to_string());
        } else {
            s.comment_buf = line.to_string();
            s.in_javadoc = true;
        }
        return;
    }
    if trimmed.starts_with("/*") {
        if !trimmed.contains("*/") {
            s.in_block_comment = true;
        }
        return;
    }
    if trimmed.starts_with("//") {
        return;
    }

    // A declaration whose parameter list spans lines.
    if let Some(mut buf) = s.signature_buf.take() {
        buf.push(' ');
        buf.push_str(trimmed);
        if parens_balanced(&buf) {
            finish_method(s, &buf);
        } else {
            s.signature_buf = Some(buf);
        }
        return;
    }

    if let Some(caps) = RE_PACKAGE.captures(line) {
        s.package = caps[1].to_string();
        return;
    }

    if let Some(caps) = RE_IMPORT.captures(line) {
        // Only explicit single-type imports resolve simple names.
        if caps.get(1).is_none() && !caps[2].ends_with(".*") {
            s.imports.push(caps[2].to_string());
        }
        return;
    }

    if RE_DEPRECATED_ANNOTATION.is_match(line) {
        s.pending_deprecated = true;
        return;
    }
    // Other annotations, with or without an argument list, keep the pending
    // javadoc attached to the declaration that follows.
    if annotation_only(trimmed) {
        return;
    }

    if s.depth == 0 {
        if let Some(caps) = RE_TYPE_DECL.captures(line) {
            let comment = s.pending_comment.take();
            let deprecated = s.pending_deprecated || comment_deprecates(comment.as_deref());
            s.pending_deprecated = false;
            s.classes.push(ParsedClass {
                package: s.package.clone(),
                name: caps[2].to_string(),
                is_interface: &caps[1] == "interface",
                deprecated,
                imports: s.imports.clone(),
                methods: Vec::new(),
            });
            s.depth += brace_delta(line);
            return;
        }
    }

    // Candidate method declaration inside a type body.
    if s.depth == 1 && !s.classes.is_empty() && line.contains('(') && !trimmed.starts_with('}') {
        if parens_balanced(line) {
            finish_method(s, line);
        } else {
            s.signature_buf = Some(trimmed.to_string());
        }
        return;
    }

    s.depth += brace_delta(line);
    if !trimmed.is_empty() {
        s.pending_comment = None;
        s.pending_deprecated = false;
    }
}

/// Parse a balanced declaration line, attach it to the current class, and
/// account for the brace that opens its body.
fn finish_method(s: &mut ScanState, decl: &str) {
    let comment = s.pending_comment.take();
    let deprecated_annotation = s.pending_deprecated;
    s.pending_deprecated = false;

    if let Some(mut method) = parse_method_decl(decl) {
        if let Some(raw) = comment.as_deref() {
            let (desc, tags) = javadoc::split(javadoc::strip_delimiters(raw));
            method.comment = desc;
            method.tags = tags;
        }
        method.deprecated = deprecated_annotation
            || method.tags.iter().any(|t| t.name == "deprecated");
        if let Some(class) = s.classes.last_mut() {
            class.methods.push(method);
        }
    }
    s.depth += brace_delta(decl);
}

// -- Declaration parsing ------------------------------------------------------

/// Parse `modifiers <T>? ReturnType name(params) throws ... [{;]` into a
/// ParsedMethod. Returns None for anything that is not a method declaration
/// (constructors, field initializers, statements).
fn parse_method_decl(decl: &str) -> Option<ParsedMethod> {
    let open = decl.find('(')?;
    let head = decl[..open].trim();
    let params_str = balanced_parens_content(&decl[open..])?;

    // Strip leading modifiers.
    let mut rest = head;
    let mut is_public = false;
    let mut is_static = false;
    loop {
        let word = rest.split_whitespace().next().unwrap_or("");
        if MODIFIERS.contains(&word) {
            is_public |= word == "public";
            is_static |= word == "static";
            rest = rest[word.len()..].trim_start();
        } else {
            break;
        }
    }

    // Skip a generic type-parameter section.
    if rest.starts_with('<') {
        let end = matching_angle(rest)?;
        rest = rest[end + 1..].trim_start();
    }

    // What remains is "ReturnType name"; the name starts after the last
    // whitespace outside angle brackets.
    let split_at = last_top_level_space(rest)?;
    let return_type = rest[..split_at].trim();
    let name = rest[split_at..].trim();

    if !RE_IDENTIFIER.is_match(name) {
        return None;
    }
    if return_type.is_empty()
        || return_type.ends_with('.')
        || !RE_RETURN_TYPE.is_match(return_type)
        || KEYWORDS.contains(&return_type)
    {
        return None;
    }

    let params = parse_params(&params_str)?;

    Some(ParsedMethod {
        name: name.to_string(),
        return_type: return_type.to_string(),
        params,
        is_public,
        is_static,
        ..Default::default()
    })
}

/// Split and parse a parameter list. Returns None when any entry does not
/// read as `Type name` (which marks the whole line as a non-declaration).
fn parse_params(params_str: &str) -> Option<Vec<ParsedParam>> {
    let trimmed = params_str.trim();
    if trimmed.is_empty() {
        return Some(Vec::new());
    }

    let mut params = Vec::new();
    for piece in split_top_level(trimmed) {
        let mut piece = piece.trim();
        // Drop parameter annotations and `final`.
        loop {
            if piece.starts_with('@') {
                let word_end = piece
                    .find(char::is_whitespace)
                    .unwrap_or(piece.len());
                piece = piece[word_end..].trim_start();
            } else if let Some(rest) = piece.strip_prefix("final ") {
                piece = rest.trim_start();
            } else {
                break;
            }
        }
        let split_at = last_top_level_space(piece)?;
        let mut type_name = piece[..split_at].trim().to_string();
        let name = piece[split_at..].trim();
        if !RE_IDENTIFIER.is_match(name) {
            return None;
        }
        if let Some(base) = type_name.strip_suffix("...") {
            type_name = format!("{}[]", base.trim_end());
        }
        params.push(ParsedParam {
            type_name,
            name: name.to_string(),
        });
    }
    Some(params)
}

// -- Text helpers -------------------------------------------------------------

/// Content of the parenthesized section starting at `text[0] == '('`.
fn balanced_parens_content(text: &str) -> Option<String> {
    let mut depth = 0u32;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(text[1..i].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

/// True when the line is nothing but one annotation, with or without a
/// balanced argument list: `@Deprecated`, `@SuppressWarnings("unchecked")`.
fn annotation_only(trimmed: &str) -> bool {
    let Some(m) = RE_ANNOTATION.find(trimmed) else {
        return false;
    };
    let rest = trimmed[m.end()..].trim_start();
    if rest.is_empty() {
        return true;
    }
    if !rest.starts_with('(') {
        return false;
    }
    let mut depth = 0i32;
    for (i, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return rest[i + 1..].trim().is_empty();
                }
            }
            _ => {}
        }
    }
    false
}

/// True when every '(' on the line has a matching ')'.
fn parens_balanced(line: &str) -> bool {
    let mut depth = 0i32;
    for c in line.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
    }
    depth <= 0
}

/// Index past the '>' matching the leading '<'.
fn matching_angle(text: &str) -> Option<usize> {
    let mut depth = 0i32;
    for (i, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Byte index of the last whitespace outside `<>` nesting, so generic types
/// with internal spaces stay intact.
fn last_top_level_space(text: &str) -> Option<usize> {
    let mut depth = 0i32;
    let mut last = None;
    for (i, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            c if c.is_whitespace() && depth == 0 => last = Some(i),
            _ => {}
        }
    }
    last
}

/// Split on commas outside any `<>`, `()`, or `[]` nesting.
fn split_top_level(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth -= 1,
            ',' if depth == 0 => {
                pieces.push(text[start..i].to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(text[start..].to_string());
    pieces
}

/// Brace balance of one line, skipping string and char literals.
fn brace_delta(line: &str) -> i32 {
    let mut delta = 0;
    let mut in_str = false;
    let mut in_char = false;
    let mut escaped = false;
    for c in line.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_str || in_char => escaped = true,
            '"' if !in_char => in_str = !in_str,
            '\'' if !in_str => in_char = !in_char,
            '{' if !in_str && !in_char => delta += 1,
            '}' if !in_str && !in_char => delta -= 1,
            _ => {}
        }
    }
    delta
}

fn comment_deprecates(raw: Option<&str>) -> bool {
    match raw {
        Some(raw) => {
            let (_, tags) = javadoc::split(javadoc::strip_delimiters(raw));
            tags.iter().any(|t| t.name == "deprecated")
        }
        None => false,
    }
}
