use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_extdoc")))
}

fn write_source(dir: &Path, rel: &str, content: &str) -> PathBuf {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// Concatenated contents of every generated HTML page under `dir`.
fn read_all_html(dir: &Path) -> String {
    let mut out = String::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        for entry in fs::read_dir(&current).unwrap().flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().and_then(|e| e.to_str()) == Some("html") {
                out.push_str(&fs::read_to_string(&path).unwrap());
            }
        }
    }
    out
}

const STRING_EXTENSIONS: &str = r#"
package demo;

public class StringExtensions {
    /**
     * Reverses a string.
     *
     * @param self the string to reverse
     * @return the reversed string
     */
    public static String reverse(String self) {
        return new StringBuilder(self).reverse().toString();
    }
}
"#;

// -- end-to-end scenarios --

#[test]
fn reverse_extension_lands_on_string_page() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let file = write_source(src.path(), "StringExtensions.java", STRING_EXTENSIONS);

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(file.to_str().unwrap())
        .assert()
        .success();

    let page = fs::read_to_string(out.path().join("java/lang/String.html")).unwrap();
    // Receiver dropped: signature has an empty parameter list.
    assert!(page.contains("public static String reverse()"));
    assert!(page.contains("href=\"#reverse()\""));
    assert!(page.contains("the reversed string"));
    // The receiver's own @param entry is hidden along with the parameter.
    assert!(!page.contains("the string to reverse"));
}

#[test]
fn deprecated_methods_never_appear() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_source(
        src.path(),
        "OldExtensions.java",
        r#"
package demo;

public class OldExtensions {
    /**
     * The old way.
     *
     * @deprecated use keep instead
     */
    @Deprecated
    public static String shout(String self) {
        return self.toUpperCase();
    }

    /** Still current. */
    public static String keep(String self) {
        return self;
    }
}
"#,
    );

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(src.path().to_str().unwrap())
        .assert()
        .success();

    let all = read_all_html(out.path());
    assert!(!all.contains("shout"));
    assert!(all.contains("keep"));
}

#[test]
fn primitive_receivers_share_the_pseudo_package() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_source(
        src.path(),
        "NumberExtensions.java",
        r#"
package demo;

public class NumberExtensions {
    /** Runs a body that many times. */
    public static void times(int self) {
    }

    /** Sums the elements. */
    public static int sum(int[] self) {
        return 0;
    }
}
"#,
    );

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(src.path().to_str().unwrap())
        .assert()
        .success();

    // Two distinct types, one pseudo-package.
    assert!(out.path().join("primitive-types/int.html").exists());
    assert!(out.path().join("primitive-types/int[].html").exists());

    let list = fs::read_to_string(out.path().join("package-list")).unwrap();
    let hits = list.lines().filter(|l| *l == "primitive-types").count();
    assert_eq!(hits, 1);
}

// -- output layout --

#[test]
fn output_root_has_the_full_file_set() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_source(src.path(), "StringExtensions.java", STRING_EXTENSIONS);

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .args(["--title", "Demo API"])
        .arg(src.path().to_str().unwrap())
        .assert()
        .success();

    for name in [
        "index.html",
        "overview-summary.html",
        "overview-frame.html",
        "package-list",
        "allclasses-frame.html",
        "index-all.html",
        "stylesheet.css",
        "extdoc.svg",
    ] {
        assert!(out.path().join(name).exists(), "missing {name}");
    }
    assert!(out.path().join("java/lang/package-frame.html").exists());

    let overview = fs::read_to_string(out.path().join("overview-summary.html")).unwrap();
    assert!(overview.contains("Demo API"));
    let index = fs::read_to_string(out.path().join("index-all.html")).unwrap();
    assert!(index.contains("reverse()"));
    assert!(index.contains("String"));
}

// -- filtering --

#[test]
fn library_namespace_receivers_are_excluded() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_source(
        src.path(),
        "SelfExtensions.java",
        r#"
package org.example.ext;

public class SelfExtensions {
    /** Extends the library's own type. */
    public static void touch(org.example.ext.Helper self) {
    }

    /** Extends a foreign type. */
    public static void poke(String self) {
    }
}
"#,
    );

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .args(["--library-prefix", "org.example.ext"])
        .arg(src.path().to_str().unwrap())
        .assert()
        .success();

    let all = read_all_html(out.path());
    assert!(!all.contains("touch"));
    assert!(all.contains("poke"));
    assert!(!out.path().join("org/example/ext/Helper.html").exists());
}

// -- error handling --

#[test]
fn missing_input_warns_but_succeeds() {
    let out = TempDir::new().unwrap();

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg("/no/such/place/*.java")
        .assert()
        .success()
        .stderr(predicate::str::contains("no files matched"));

    // The empty site is still written.
    assert!(out.path().join("index.html").exists());
}

#[test]
fn missing_registry_is_treated_as_no_additional_classes() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let file = write_source(src.path(), "StringExtensions.java", STRING_EXTENSIONS);

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .args(["--registry", "/no/such/registry.txt"])
        .arg(file.to_str().unwrap())
        .assert()
        .success()
        .stderr(predicate::str::contains("no additional classes"));

    assert!(out.path().join("java/lang/String.html").exists());
}

#[test]
fn unresolved_template_slot_fails_the_run() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let templates = TempDir::new().unwrap();
    write_source(src.path(), "StringExtensions.java", STRING_EXTENSIONS);
    fs::write(
        templates.path().join("class.html"),
        "<html><body>${mystery}</body></html>",
    )
    .unwrap();

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .args(["--templates", templates.path().to_str().unwrap()])
        .arg(src.path().to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unresolved slot"));
}

// -- registry --

#[test]
fn registry_classes_are_resolved_to_source_paths() {
    let root = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_source(
        root.path(),
        "src/main/demo/StringExtensions.java",
        STRING_EXTENSIONS,
    );
    let registry = root.path().join("extensions.txt");
    fs::write(&registry, "# registered extension classes\ndemo.StringExtensions\n").unwrap();

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .args(["--registry", registry.to_str().unwrap()])
        .args([
            "--source-root",
            root.path().join("src/main").to_str().unwrap(),
        ])
        .assert()
        .success();

    let page = fs::read_to_string(out.path().join("java/lang/String.html")).unwrap();
    assert!(page.contains("reverse"));
}

// -- template overrides --

#[test]
fn template_override_replaces_the_embedded_page() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let templates = TempDir::new().unwrap();
    write_source(src.path(), "StringExtensions.java", STRING_EXTENSIONS);
    fs::write(
        templates.path().join("index.html"),
        "<html><title>${title}</title>custom scaffold</html>",
    )
    .unwrap();

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .args(["--templates", templates.path().to_str().unwrap()])
        .arg(src.path().to_str().unwrap())
        .assert()
        .success();

    let index = fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(index.contains("custom scaffold"));
    assert!(index.contains("Extension API"));
}
