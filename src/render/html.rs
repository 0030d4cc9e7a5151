//! HTML fragment builders - the repeated pieces the templates cannot
//! express: navigation lists, summary tables, method detail sections and
//! the alphabetical index body.

use crate::index::{IndexEntry, IndexKind};
use crate::links::LinkResolver;
use crate::model::{DocMethod, DocModel, DocType};
use crate::parser::javadoc;
use html_escape::{encode_double_quoted_attribute as attr, encode_text};
use std::collections::BTreeMap;

/// `<li>` items for the package navigation frame.
pub fn package_list_items(model: &DocModel) -> String {
    let mut out = String::new();
    for package in model.packages() {
        out.push_str(&format!(
            "  <li><a href=\"{}/package-frame.html\" target=\"packageFrame\">{}</a></li>\n",
            attr(&package.dir_path()),
            encode_text(&package.name)
        ));
    }
    out
}

/// Overview table: one row per package with its type count.
pub fn package_summary_table(model: &DocModel) -> String {
    let mut out = String::from("<table class=\"summary\">\n<tr><th>Package</th><th>Types</th></tr>\n");
    for package in model.packages() {
        out.push_str(&format!(
            "<tr><td><a href=\"{}/package-frame.html\" target=\"packageFrame\">{}</a></td><td>{}</td></tr>\n",
            attr(&package.dir_path()),
            encode_text(&package.name),
            package.types.len()
        ));
    }
    out.push_str("</table>\n");
    out
}

/// `<li>` items for a class navigation frame. `from_root` switches between
/// hrefs relative to the output root (the all-classes frame) and plain file
/// names (a per-package frame, which sits next to its class pages).
pub fn class_list_items<'a>(
    types: impl Iterator<Item = &'a DocType>,
    from_root: bool,
) -> String {
    let mut out = String::new();
    for doc_type in types {
        let href = if from_root {
            doc_type.page_path()
        } else {
            format!("{}.html", doc_type.simple_name())
        };
        let name = encode_text(doc_type.simple_name());
        let label = if doc_type.is_interface {
            format!("<i>{name}</i>")
        } else {
            name.into_owned()
        };
        out.push_str(&format!(
            "  <li><a href=\"{}\" target=\"classFrame\">{}</a></li>\n",
            attr(&href),
            label
        ));
    }
    out
}

/// Body of the alphabetical index page: one section per letter bucket.
pub fn index_sections(buckets: &BTreeMap<char, Vec<IndexEntry>>) -> String {
    let mut out = String::new();

    // Letter bar at the top.
    out.push_str("<p>");
    for letter in buckets.keys() {
        out.push_str(&format!("<a href=\"#idx-{letter}\">{letter}</a> "));
    }
    out.push_str("</p>\n");

    for (letter, entries) in buckets {
        out.push_str(&format!(
            "<h2 class=\"index-letter\" id=\"idx-{letter}\">{letter}</h2>\n<dl>\n"
        ));
        for entry in entries {
            let label = encode_text(&entry.label);
            let label = match entry.kind {
                IndexKind::Type => format!("<strong>{label}</strong>"),
                IndexKind::Method => format!("<code>{label}</code>"),
            };
            out.push_str(&format!(
                "  <dt><a href=\"{}\">{}</a></dt>\n  <dd>{}</dd>\n",
                attr(&entry.href),
                label,
                encode_text(&entry.blurb)
            ));
        }
        out.push_str("</dl>\n");
    }
    out
}

/// Summary table rows for one type page: return type, linked method name
/// with its display parameters, and the first sentence of the description.
pub fn method_summary_rows(doc_type: &DocType, links: &LinkResolver) -> String {
    let package = doc_type.package_name();
    let mut out = String::new();
    for method in doc_type.methods() {
        let mut cell = format!(
            "<a href=\"#{}\"><strong>{}</strong></a>({})",
            attr(&method.anchor()),
            encode_text(method.name()),
            display_params(method)
        );
        let sentence = javadoc::first_sentence(&method.parsed.comment);
        if !sentence.is_empty() {
            cell.push_str("<br>\n");
            cell.push_str(&links.render_inline(sentence, &package));
        }
        out.push_str(&format!(
            "<tr><td class=\"return\"><code>{}</code></td><td>{}</td></tr>\n",
            encode_text(&method.parsed.return_type),
            cell
        ));
    }
    out
}

/// Method detail sections for one type page.
pub fn method_details(doc_type: &DocType, links: &LinkResolver) -> String {
    let package = doc_type.package_name();
    let mut out = String::new();
    for method in doc_type.methods() {
        out.push_str(&format!(
            "<h3 id=\"{}\">{}</h3>\n",
            attr(&method.anchor()),
            encode_text(method.name())
        ));
        out.push_str(&format!(
            "<pre class=\"signature\">public static {} {}({})</pre>\n",
            encode_text(&method.parsed.return_type),
            encode_text(method.name()),
            display_params(method)
        ));

        if !method.parsed.comment.is_empty() {
            out.push_str(&format!(
                "<p>{}</p>\n",
                links.render_inline(&method.parsed.comment, &package)
            ));
        }
        out.push_str(&tag_sections(method, &package, links));
    }
    out
}

/// `Type name, Type name` with the receiver already dropped, escaped.
fn display_params(method: &DocMethod) -> String {
    method
        .params()
        .iter()
        .map(|p| format!("{} {}", encode_text(&p.type_name), encode_text(&p.name)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parameters / Returns / Since / See Also lists from the block tags. The
/// `@param` entry for the hidden receiver is dropped along with the
/// parameter itself.
fn tag_sections(method: &DocMethod, package: &str, links: &LinkResolver) -> String {
    let mut out = String::new();
    let receiver_name = method.receiver().name.clone();

    let params: Vec<(&str, &str)> = method
        .parsed
        .tags_named("param")
        .filter_map(|v| {
            let (name, desc) = match v.split_once(char::is_whitespace) {
                Some((n, d)) => (n, d.trim()),
                None => (v, ""),
            };
            (name != receiver_name).then_some((name, desc))
        })
        .collect();
    if !params.is_empty() {
        out.push_str("<dl>\n<dt>Parameters:</dt>\n");
        for (name, desc) in params {
            out.push_str(&format!(
                "  <dd><code>{}</code> - {}</dd>\n",
                encode_text(name),
                links.render_inline(desc, package)
            ));
        }
        out.push_str("</dl>\n");
    }

    for (tag, heading) in [("return", "Returns:"), ("since", "Since:")] {
        if let Some(value) = method.parsed.tag_named(tag) {
            out.push_str(&format!(
                "<dl>\n<dt>{}</dt>\n  <dd>{}</dd>\n</dl>\n",
                heading,
                links.render_inline(value, package)
            ));
        }
    }

    let see: Vec<&str> = method.parsed.tags_named("see").collect();
    if !see.is_empty() {
        out.push_str("<dl>\n<dt>See Also:</dt>\n");
        for reference in see {
            out.push_str(&format!(
                "  <dd>{}</dd>\n",
                links.resolve_link(reference, package)
            ));
        }
        out.push_str("</dl>\n");
    }
    out
}
