//! Data model - parsed Java constructs and the package/type/method doc tree.

use std::collections::BTreeMap;

/// Reserved pseudo-package for primitive receiver types.
pub const PRIMITIVE_PACKAGE: &str = "primitive-types";

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

/// A single type declaration parsed from one source file.
#[derive(Debug, Default, Clone)]
pub struct ParsedClass {
    /// Package declared at the top of the file ("" for the default package).
    pub package: String,
    /// Simple name of the declared type.
    pub name: String,
    pub is_interface: bool,
    pub deprecated: bool,
    /// Explicit single-type imports in scope, fully qualified.
    pub imports: Vec<String>,
    pub methods: Vec<ParsedMethod>,
}

impl ParsedClass {
    /// Fully-qualified name of the declared type.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

/// A method signature plus its raw javadoc text and block tags.
///
/// Owned transiently by the loader; the builder moves surviving methods into
/// the doc tree.
#[derive(Debug, Default, Clone)]
pub struct ParsedMethod {
    pub name: String,
    pub return_type: String,
    pub params: Vec<ParsedParam>,
    pub is_public: bool,
    pub is_static: bool,
    /// True when carrying the `@Deprecated` annotation or a `@deprecated` tag.
    pub deprecated: bool,
    /// Javadoc description with comment decoration stripped.
    pub comment: String,
    /// Javadoc block tags in source order.
    pub tags: Vec<TagEntry>,
}

impl ParsedMethod {
    /// All values of the block tag with the given name.
    pub fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.tags
            .iter()
            .filter(move |t| t.name == name)
            .map(|t| t.value.as_str())
    }

    /// First value of the block tag with the given name.
    pub fn tag_named<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        self.tags_named(name).next()
    }
}

/// One declared parameter: type as written (arrays normalized to `T[]`).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedParam {
    pub type_name: String,
    pub name: String,
}

/// One javadoc block tag, e.g. `name = "return"`, `value = "the result"`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagEntry {
    pub name: String,
    pub value: String,
}

// -- Doc tree -----------------------------------------------------------------

/// The package -> type -> method tree. Built once per run, read-only after.
#[derive(Debug, Default)]
pub struct DocModel {
    /// Keyed by package name; iteration is alphabetical.
    pub packages: BTreeMap<String, DocPackage>,
}

impl DocModel {
    pub fn packages(&self) -> impl Iterator<Item = &DocPackage> {
        self.packages.values()
    }

    /// Every documented type across all packages, in package order then
    /// type sort-key order.
    pub fn types(&self) -> impl Iterator<Item = &DocType> {
        self.packages().flat_map(|p| p.types())
    }

    pub fn type_count(&self) -> usize {
        self.packages.values().map(|p| p.types.len()).sum()
    }

    pub fn method_count(&self) -> usize {
        self.types().map(|t| t.methods.len()).sum()
    }
}

/// A package grouping of extended types.
#[derive(Debug, Default)]
pub struct DocPackage {
    pub name: String,
    /// Keyed by type sort key; iteration follows it.
    pub types: BTreeMap<String, DocType>,
}

impl DocPackage {
    pub fn new(name: &str) -> Self {
        DocPackage {
            name: name.to_string(),
            types: BTreeMap::new(),
        }
    }

    pub fn types(&self) -> impl Iterator<Item = &DocType> {
        self.types.values()
    }

    /// Package name mapped to a relative directory path.
    pub fn dir_path(&self) -> String {
        self.name.replace('.', "/")
    }
}

/// One extended type and the extension methods grouped under it.
#[derive(Debug, Default)]
pub struct DocType {
    /// Fully-qualified receiver name, e.g. `java.lang.String` or `int[]`.
    pub fqcn: String,
    pub is_interface: bool,
    /// Keyed by method sort key; iteration follows it.
    pub methods: BTreeMap<String, DocMethod>,
}

impl DocType {
    pub fn new(fqcn: &str, is_interface: bool) -> Self {
        DocType {
            fqcn: fqcn.to_string(),
            is_interface,
            methods: BTreeMap::new(),
        }
    }

    /// Package this type files under; primitives go to the pseudo-package.
    pub fn package_name(&self) -> String {
        receiver_package(&self.fqcn)
    }

    /// Simple name including any array suffix.
    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.fqcn)
    }

    /// Stable ordering key: simple name first so listings read alphabetically,
    /// fully-qualified name as the tiebreak.
    pub fn sort_key(&self) -> String {
        format!("{} {}", self.simple_name(), self.fqcn)
    }

    pub fn methods(&self) -> impl Iterator<Item = &DocMethod> {
        self.methods.values()
    }

    /// Relative page path from the output root, e.g. `java/lang/String.html`.
    pub fn page_path(&self) -> String {
        format!(
            "{}/{}.html",
            self.package_name().replace('.', "/"),
            self.simple_name()
        )
    }

    pub fn kind(&self) -> &'static str {
        if self.is_interface {
            "Interface"
        } else {
            "Class"
        }
    }
}

/// One documented extension method. Holds the parsed method and the
/// fully-qualified name of its declaring type (a back-reference, the tree
/// owns the type itself).
#[derive(Debug, Clone)]
pub struct DocMethod {
    pub declaring: String,
    pub parsed: ParsedMethod,
}

impl DocMethod {
    pub fn new(declaring: &str, parsed: ParsedMethod) -> Self {
        DocMethod {
            declaring: declaring.to_string(),
            parsed,
        }
    }

    pub fn name(&self) -> &str {
        &self.parsed.name
    }

    /// The hidden receiver: the first declared parameter.
    pub fn receiver(&self) -> &ParsedParam {
        &self.parsed.params[0]
    }

    /// Display parameters: everything after the receiver.
    pub fn params(&self) -> &[ParsedParam] {
        &self.parsed.params[1..]
    }

    /// Anchor-form parameter signature: declared types joined without spaces,
    /// matching the fragment form of javadoc links.
    pub fn param_signature(&self) -> String {
        self.params()
            .iter()
            .map(|p| p.type_name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Page anchor, e.g. `reverse()` or `getAt(int)`.
    pub fn anchor(&self) -> String {
        format!("{}({})", self.name(), self.param_signature())
    }

    /// Stable ordering key: name, then parameter signature to order
    /// overloads, then the declaring type as the final tiebreak.
    pub fn sort_key(&self) -> String {
        format!("{} {} {}", self.name(), self.param_signature(), self.declaring)
    }
}

// -- Type-name helpers --------------------------------------------------------

/// True for a primitive type name, with or without array suffixes.
pub fn is_primitive(type_name: &str) -> bool {
    PRIMITIVES.contains(&element_type(type_name))
}

/// Strip array suffixes: `int[][]` -> `int`.
pub fn element_type(type_name: &str) -> &str {
    type_name.trim_end_matches("[]")
}

/// Package a receiver type files under. Primitive receivers (and arrays of
/// them) go to the pseudo-package; unqualified names have no package.
pub fn receiver_package(fqcn: &str) -> String {
    if is_primitive(fqcn) {
        return PRIMITIVE_PACKAGE.to_string();
    }
    match element_type(fqcn).rfind('.') {
        Some(pos) => fqcn[..pos].to_string(),
        None => String::new(),
    }
}

/// Simple name of a possibly-qualified type, keeping array suffixes:
/// `java.lang.Object[]` -> `Object[]`.
pub fn simple_name_of(fqcn: &str) -> &str {
    match element_type(fqcn).rfind('.') {
        Some(pos) => &fqcn[pos + 1..],
        None => fqcn,
    }
}

/// True when `fqcn` falls under one of the given package prefixes.
/// A prefix matches whole segments only: `org.example` covers
/// `org.example.Foo` but not `org.examples.Foo`.
pub fn in_namespace(fqcn: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|p| {
        let p = p.trim_end_matches('.');
        !p.is_empty() && (fqcn == p || (fqcn.starts_with(p) && fqcn[p.len()..].starts_with('.')))
    })
}
