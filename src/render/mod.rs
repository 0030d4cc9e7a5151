//! Renderer - fills the page templates with slices of the doc model and
//! writes the output file set.
//!
//! Five template resources are embedded in the binary; a `--templates`
//! directory substitutes files of the same names at run time. Templates use
//! `${slot}` placeholders; a slot the renderer does not know is a malformed
//! template and fails the run. Repeated fragments (tables, lists, method
//! sections) are built in code by the `html` module.

pub mod html;

use crate::index;
use crate::links::LinkResolver;
use crate::model::DocModel;
use anyhow::{bail, Context, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static RE_SLOT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_]+)\}").unwrap());

/// Static resources copied verbatim into the output root.
const STYLESHEET: &str = include_str!("assets/stylesheet.css");
const ICON: &str = include_str!("assets/extdoc.svg");

const TPL_INDEX: &str = include_str!("templates/index.html");
const TPL_OVERVIEW_SUMMARY: &str = include_str!("templates/overview-summary.html");
const TPL_OVERVIEW_FRAME: &str = include_str!("templates/overview-frame.html");
const TPL_PACKAGE_FRAME: &str = include_str!("templates/package-frame.html");
const TPL_CLASS: &str = include_str!("templates/class.html");

/// The five named template resources.
pub struct Templates {
    index: String,
    overview_summary: String,
    overview_frame: String,
    package_frame: String,
    class: String,
}

impl Templates {
    pub fn embedded() -> Self {
        Templates {
            index: TPL_INDEX.to_string(),
            overview_summary: TPL_OVERVIEW_SUMMARY.to_string(),
            overview_frame: TPL_OVERVIEW_FRAME.to_string(),
            package_frame: TPL_PACKAGE_FRAME.to_string(),
            class: TPL_CLASS.to_string(),
        }
    }

    /// Embedded templates, with any same-named file in `dir` taking over.
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        let mut templates = Templates::embedded();
        if let Some(dir) = dir {
            for (name, slot) in [
                ("index.html", &mut templates.index),
                ("overview-summary.html", &mut templates.overview_summary),
                ("overview-frame.html", &mut templates.overview_frame),
                ("package-frame.html", &mut templates.package_frame),
                ("class.html", &mut templates.class),
            ] {
                let path = dir.join(name);
                if path.is_file() {
                    *slot = fs::read_to_string(&path)
                        .with_context(|| format!("failed to read template {}", path.display()))?;
                }
            }
        }
        Ok(templates)
    }
}

/// Replace every `${slot}` in `template`. A slot without a value is an
/// error naming the template and the slot.
pub fn fill(name: &str, template: &str, slots: &[(&str, &str)]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for caps in RE_SLOT.captures_iter(template) {
        let whole = caps.get(0).unwrap();
        out.push_str(&template[last..whole.start()]);
        let slot = &caps[1];
        match slots.iter().find(|(k, _)| *k == slot) {
            Some((_, value)) => out.push_str(value),
            None => bail!("unresolved slot ${{{slot}}} in template {name}"),
        }
        last = whole.end();
    }
    out.push_str(&template[last..]);
    Ok(out)
}

/// Render context for one run.
pub struct SiteOptions<'a> {
    pub title: &'a str,
    pub templates: &'a Templates,
    pub links: LinkResolver<'a>,
}

/// Write the whole site under `out`. Returns the number of HTML pages
/// written. Files are written independently; a failure leaves earlier
/// output in place.
pub fn render_site(model: &DocModel, opts: &SiteOptions, out: &Path) -> Result<usize> {
    fs::create_dir_all(out)
        .with_context(|| format!("failed to create output directory {}", out.display()))?;
    let t = opts.templates;
    let mut pages = 0;

    write_file(&out.join("stylesheet.css"), STYLESHEET)?;
    write_file(&out.join("extdoc.svg"), ICON)?;

    // package-list: one package name per line, sort order, plain text.
    let mut package_list = String::new();
    for package in model.packages() {
        package_list.push_str(&package.name);
        package_list.push('\n');
    }
    write_file(&out.join("package-list"), &package_list)?;

    let page = fill("index.html", &t.index, &[("title", opts.title)])?;
    write_file(&out.join("index.html"), &page)?;
    pages += 1;

    let page = fill(
        "overview-frame.html",
        &t.overview_frame,
        &[
            ("title", opts.title),
            ("packages", &html::package_list_items(model)),
        ],
    )?;
    write_file(&out.join("overview-frame.html"), &page)?;
    pages += 1;

    let page = fill(
        "overview-summary.html",
        &t.overview_summary,
        &[
            ("title", opts.title),
            ("heading", opts.title),
            ("body", &html::package_summary_table(model)),
        ],
    )?;
    write_file(&out.join("overview-summary.html"), &page)?;
    pages += 1;

    // The alphabetical index reuses the main-page scaffold.
    let buckets = index::build_index(model);
    let title = format!("Index - {}", opts.title);
    let page = fill(
        "overview-summary.html",
        &t.overview_summary,
        &[
            ("title", &title),
            ("heading", "Index"),
            ("body", &html::index_sections(&buckets)),
        ],
    )?;
    write_file(&out.join("index-all.html"), &page)?;
    pages += 1;

    // The all-classes frame reuses the package frame template with every
    // type and root-relative links.
    let page = fill(
        "package-frame.html",
        &t.package_frame,
        &[
            ("title", "All Classes"),
            ("base", ""),
            ("header", "All Classes"),
            ("classes", &html::class_list_items(model.types(), true)),
        ],
    )?;
    write_file(&out.join("allclasses-frame.html"), &page)?;
    pages += 1;

    for package in model.packages() {
        let dir = out.join(package.dir_path());
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create package directory {}", dir.display()))?;
        let base = "../".repeat(package.dir_path().split('/').count());

        let page = fill(
            "package-frame.html",
            &t.package_frame,
            &[
                ("title", &package.name),
                ("base", &base),
                ("header", &package.name),
                ("classes", &html::class_list_items(package.types(), false)),
            ],
        )?;
        write_file(&dir.join("package-frame.html"), &page)?;
        pages += 1;

        for doc_type in package.types() {
            let title = format!("{} - {}", doc_type.simple_name(), opts.title);
            let page = fill(
                "class.html",
                &t.class,
                &[
                    ("title", &title),
                    ("base", &base),
                    ("package", &package.name),
                    ("kind", doc_type.kind()),
                    ("name", doc_type.simple_name()),
                    ("summary", &html::method_summary_rows(doc_type, &opts.links)),
                    ("details", &html::method_details(doc_type, &opts.links)),
                ],
            )?;
            write_file(&out.join(doc_type.page_path()), &page)?;
            pages += 1;
        }
    }

    Ok(pages)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder;
    use crate::model::{ParsedClass, ParsedMethod, ParsedParam};
    use tempfile::TempDir;

    #[test]
    fn fill_substitutes_known_slots() {
        let out = fill("t", "<h1>${title}</h1>${body}", &[("title", "X"), ("body", "Y")]).unwrap();
        assert_eq!(out, "<h1>X</h1>Y");
    }

    #[test]
    fn fill_rejects_unknown_slots() {
        let err = fill("class.html", "${mystery}", &[("title", "X")]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("${mystery}"));
        assert!(message.contains("class.html"));
    }

    #[test]
    fn slot_values_are_not_rescanned() {
        // A value containing `${...}` lands in the page untouched.
        let out = fill("t", "${body}", &[("body", "literal ${x}")]).unwrap();
        assert_eq!(out, "literal ${x}");
    }

    #[test]
    fn embedded_templates_fill_cleanly() {
        let t = Templates::embedded();
        fill("index.html", &t.index, &[("title", "T")]).unwrap();
        fill(
            "overview-summary.html",
            &t.overview_summary,
            &[("title", "T"), ("heading", "H"), ("body", "B")],
        )
        .unwrap();
        fill(
            "overview-frame.html",
            &t.overview_frame,
            &[("title", "T"), ("packages", "")],
        )
        .unwrap();
        fill(
            "package-frame.html",
            &t.package_frame,
            &[("title", "T"), ("base", ""), ("header", "H"), ("classes", "")],
        )
        .unwrap();
        fill(
            "class.html",
            &t.class,
            &[
                ("title", "T"),
                ("base", ""),
                ("package", "p"),
                ("kind", "Class"),
                ("name", "N"),
                ("summary", ""),
                ("details", ""),
            ],
        )
        .unwrap();
    }

    #[test]
    fn render_site_writes_full_layout() {
        let mut class = ParsedClass {
            package: "p".to_string(),
            name: "Ext".to_string(),
            ..Default::default()
        };
        class.methods.push(ParsedMethod {
            name: "reverse".to_string(),
            return_type: "String".to_string(),
            is_public: true,
            is_static: true,
            params: vec![ParsedParam {
                type_name: "String".to_string(),
                name: "self".to_string(),
            }],
            ..Default::default()
        });
        let model = builder::build(vec![class], &[]);

        let templates = Templates::embedded();
        let opts = SiteOptions {
            title: "Extension API",
            templates: &templates,
            links: LinkResolver {
                library_prefixes: &[],
                library_docs_url: None,
                jdk_docs_url: "https://docs.oracle.com/javase/8/docs/api/",
            },
        };
        let dir = TempDir::new().unwrap();
        let pages = render_site(&model, &opts, dir.path()).unwrap();

        for name in [
            "index.html",
            "overview-summary.html",
            "overview-frame.html",
            "allclasses-frame.html",
            "index-all.html",
            "package-list",
            "stylesheet.css",
            "extdoc.svg",
        ] {
            assert!(dir.path().join(name).exists(), "missing {name}");
        }
        assert!(dir.path().join("java/lang/package-frame.html").exists());
        assert!(dir.path().join("java/lang/String.html").exists());
        // index, overview x2, index-all, allclasses, package frame, type page
        assert_eq!(pages, 7);

        let list = fs::read_to_string(dir.path().join("package-list")).unwrap();
        assert_eq!(list, "java.lang\n");
    }
}
