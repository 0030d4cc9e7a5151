//! Cross-reference resolver - rewrites `{@code ...}` and `{@link ...}`
//! inline javadoc markup into HTML.
//!
//! Resolution is purely textual: the target class name is mapped to a
//! documentation URL by naming convention, with no check that the class or
//! method actually exists.

use crate::model;
use html_escape::{encode_double_quoted_attribute, encode_text};
use regex::Regex;
use std::sync::LazyLock;

static RE_INLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{@(code|link)\s+([^}]*)\}").unwrap());

/// Link resolution context for one run. Borrowed into the renderer.
#[derive(Debug, Clone, Copy)]
pub struct LinkResolver<'a> {
    /// Package prefixes of the extension library's own namespace.
    pub library_prefixes: &'a [String],
    /// Base URL for references into the library namespace.
    pub library_docs_url: Option<&'a str>,
    /// Base URL for everything else.
    pub jdk_docs_url: &'a str,
}

impl LinkResolver<'_> {
    /// Rewrite inline markup in documentation text rendered on the page for
    /// `origin_package`. Plain text is HTML-escaped; `{@code x}` becomes a
    /// code span; `{@link ref}` becomes an anchor when resolvable.
    pub fn render_inline(&self, text: &str, origin_package: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in RE_INLINE.captures_iter(text) {
            let whole = caps.get(0).unwrap();
            out.push_str(&encode_text(&text[last..whole.start()]));
            let payload = caps[2].trim();
            match &caps[1] {
                "code" => {
                    out.push_str("<code>");
                    out.push_str(&encode_text(payload));
                    out.push_str("</code>");
                }
                _ => out.push_str(&self.resolve_link(payload, origin_package)),
            }
            last = whole.end();
        }
        out.push_str(&encode_text(&text[last..]));
        out
    }

    /// Resolve one `{@link}` reference to an anchor tag, or to the escaped
    /// reference text when it cannot be resolved.
    pub fn resolve_link(&self, reference: &str, origin_package: &str) -> String {
        // Library-internal shorthand `#method(ReceiverType,Args...)`: the
        // receiver moves in front and is dropped from the argument list.
        let (target, internal) = if reference.starts_with('#') {
            match rewrite_shorthand(reference) {
                Some(t) => (t, true),
                None => return encode_text(reference).into_owned(),
            }
        } else {
            (reference.to_string(), false)
        };

        let (class_part, fragment) = match target.split_once('#') {
            Some((c, f)) => (c.trim(), Some(f)),
            None => (target.as_str(), None),
        };
        let class_name = normalize_placeholder(class_part);
        let package = package_of(&class_name);
        if package.is_empty() {
            // No package name means no place to link to.
            return encode_text(reference).into_owned();
        }

        let base = if internal {
            "../".repeat(package_depth(origin_package))
        } else if model::in_namespace(&class_name, self.library_prefixes) {
            self.library_docs_url.unwrap_or(self.jdk_docs_url).to_string()
        } else {
            self.jdk_docs_url.to_string()
        };

        let mut href = format!(
            "{}{}/{}.html",
            base,
            package.replace('.', "/"),
            model::simple_name_of(&class_name)
        );
        if let Some(f) = fragment {
            href.push('#');
            href.push_str(f);
        }

        let title = if internal {
            format!("extension methods added to {class_name}")
        } else {
            format!("class in {package}")
        };

        let display = match fragment {
            Some(f) => format!("{class_name}#{f}"),
            None => class_name.clone(),
        };
        format!(
            "<a href=\"{}\" title=\"{}\"><code>{}</code></a>",
            encode_double_quoted_attribute(&href),
            encode_double_quoted_attribute(&title),
            encode_text(&display)
        )
    }
}

/// `#method(ReceiverType,Args...)` -> `ReceiverType#method(Args...)`.
fn rewrite_shorthand(reference: &str) -> Option<String> {
    let rest = &reference[1..];
    let open = rest.find('(')?;
    let close = rest.rfind(')')?;
    if close < open {
        return None;
    }
    let method = &rest[..open];
    let args: Vec<&str> = rest[open + 1..close]
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect();
    let receiver = *args.first()?;
    Some(format!("{receiver}#{method}({})", args[1..].join(",")))
}

/// Map single-uppercase-letter type parameters to the generic object type,
/// keeping array suffixes: `T` -> `java.lang.Object`, `T[]` ->
/// `java.lang.Object[]`.
fn normalize_placeholder(class_name: &str) -> String {
    let elem = model::element_type(class_name);
    let suffix = &class_name[elem.len()..];
    let mut chars = elem.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => format!("java.lang.Object{suffix}"),
        _ => class_name.to_string(),
    }
}

/// Package of a qualified class name, "" when unqualified.
fn package_of(class_name: &str) -> String {
    match model::element_type(class_name).rfind('.') {
        Some(pos) => class_name[..pos].to_string(),
        None => String::new(),
    }
}

/// Number of directory levels a page for `package` sits below the root.
fn package_depth(package: &str) -> usize {
    if package.is_empty() {
        0
    } else {
        package.split('.').count()
    }
}
