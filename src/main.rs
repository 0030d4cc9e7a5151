//! extdoc - generate javadoc-style HTML for extension methods.
//!
//! Parses Java source files, keeps the public static methods whose first
//! parameter names the type they extend, groups them into a
//! package -> type -> method tree and renders a static HTML site:
//!
//! ```text
//! extdoc -o docs/api --library-prefix org.example.ext src/main/**/*.java
//! ```

mod builder;
mod index;
mod links;
mod model;
mod parser;
mod render;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use report::Reporter;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(
    name = "extdoc",
    version,
    about = "Generate HTML documentation for Java extension methods"
)]
struct Cli {
    /// Input source files, directories, or glob patterns.
    files: Vec<String>,

    /// Output directory
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Documentation title
    #[arg(long, default_value = "Extension API")]
    title: String,

    /// Package prefix of the extension library's own namespace.
    /// Can be given multiple times.
    #[arg(long = "library-prefix")]
    library_prefix: Vec<String>,

    /// Base URL for references into the library namespace
    #[arg(long)]
    library_docs_url: Option<String>,

    /// Base URL for standard-library references
    #[arg(long, default_value = "https://docs.oracle.com/javase/8/docs/api/")]
    jdk_docs_url: String,

    /// Extension-class registry: one fully-qualified class name per line,
    /// each resolved to a source path under --source-root
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Root directory for registry-derived source paths
    #[arg(long, default_value = "src/main")]
    source_root: PathBuf,

    /// Directory with template files overriding the built-in ones
    #[arg(long)]
    templates: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let started = Instant::now();
    let mut reporter = Reporter::new();

    let mut inputs = expand_inputs(&cli.files, &mut reporter)?;
    if let Some(registry) = &cli.registry {
        inputs.extend(registry_paths(registry, &cli.source_root, &mut reporter));
    }
    inputs.sort();
    inputs.dedup();

    let mut classes = Vec::new();
    for path in &inputs {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                reporter.warn(format!("skipping {}: {}", path.display(), e));
                continue;
            }
        };
        match parser::parse_file(path, &content) {
            Ok(mut parsed) => classes.append(&mut parsed),
            Err(e) => reporter.warn(format!("skipping {}: {}", path.display(), e)),
        }
    }

    let doc = builder::build(classes, &cli.library_prefix);

    let templates = render::Templates::load(cli.templates.as_deref())?;
    let opts = render::SiteOptions {
        title: &cli.title,
        templates: &templates,
        links: links::LinkResolver {
            library_prefixes: &cli.library_prefix,
            library_docs_url: cli.library_docs_url.as_deref(),
            jdk_docs_url: &cli.jdk_docs_url,
        },
    };
    let pages = render::render_site(&doc, &opts, &cli.output)?;

    reporter.info(format!(
        "generated {} pages for {} types ({} methods) in {:.2}s, {} warnings",
        pages,
        doc.type_count(),
        doc.method_count(),
        started.elapsed().as_secs_f64(),
        reporter.warning_count()
    ));
    Ok(())
}

/// Expand file arguments: literal paths, directories (scanned for `.java`,
/// non-recursive) and glob patterns. Sorted and deduplicated for
/// deterministic runs; an argument matching nothing is a warning, not an
/// error.
fn expand_inputs(patterns: &[String], reporter: &mut Reporter) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("java") {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {pattern}"))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            reporter.warn(format!("no files matched: {pattern}"));
        }
        files.extend(matches);
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Resolve the extension-class registry to source paths: one fully-qualified
/// class name per line (`#` comments and blanks ignored), inner-class
/// markers stripped, dots mapped to path separators under `root`. A registry
/// that cannot be read means no additional classes.
fn registry_paths(path: &Path, root: &Path, reporter: &mut Reporter) -> Vec<PathBuf> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            reporter.warn(format!(
                "cannot read registry {}: {} (no additional classes)",
                path.display(),
                e
            ));
            return Vec::new();
        }
    };
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|name| {
            let name = name.split('$').next().unwrap_or(name);
            root.join(format!("{}.java", name.replace('.', "/")))
        })
        .collect()
}
