//! Method filter and doc-model builder.
//!
//! The filter keeps the extension methods: public static methods whose first
//! parameter names the type they extend, excluding anything deprecated and
//! anything whose receiver sits in the extension library's own namespace.
//! The builder then groups the survivors by receiver type and receivers by
//! package into the `DocModel` tree.

use crate::model::{
    self, DocMethod, DocModel, DocPackage, DocType, ParsedClass, ParsedMethod,
};
use std::collections::HashMap;

/// Keep rule for one method, evaluated in its declaring class's scope
/// (imports are needed to resolve the receiver's package, and a deprecated
/// declaring class deprecates everything it contains).
pub fn is_extension_method(class: &ParsedClass, method: &ParsedMethod, prefixes: &[String]) -> bool {
    if class.deprecated || !method.is_public || !method.is_static || method.deprecated {
        return false;
    }
    // Zero-parameter methods cannot be extension methods; skip before
    // inspecting parameter 0.
    let Some(first) = method.params.first() else {
        return false;
    };
    !model::in_namespace(&resolve_receiver(&first.type_name, class), prefixes)
}

/// Drop every method that is not an extension method. Pure and idempotent:
/// running it over an already-filtered set changes nothing.
pub fn filter(mut classes: Vec<ParsedClass>, prefixes: &[String]) -> Vec<ParsedClass> {
    for class in &mut classes {
        let methods = std::mem::take(&mut class.methods);
        let kept: Vec<ParsedMethod> = methods
            .into_iter()
            .filter(|m| is_extension_method(class, m, prefixes))
            .collect();
        class.methods = kept;
    }
    classes
}

/// Build the package -> type -> method tree from parsed classes.
///
/// Receivers sharing a fully-qualified name accumulate under one `DocType`
/// regardless of input order; lookups are get-or-insert on ordered maps, so
/// retrieval order is independent of insertion order.
pub fn build(classes: Vec<ParsedClass>, prefixes: &[String]) -> DocModel {
    let classes = filter(classes, prefixes);

    // A receiver is known to be an interface only when one of the parsed
    // sources declares it as one.
    let interfaces: HashMap<String, bool> = classes
        .iter()
        .map(|c| (c.qualified_name(), c.is_interface))
        .collect();

    let mut doc = DocModel::default();
    for class in classes {
        let declaring = class.qualified_name();
        for method in &class.methods {
            let receiver = resolve_receiver(&method.params[0].type_name, &class);
            let package_name = model::receiver_package(&receiver);
            let package = doc
                .packages
                .entry(package_name.clone())
                .or_insert_with(|| DocPackage::new(&package_name));

            let is_interface = interfaces.get(&receiver).copied().unwrap_or(false);
            let doc_type = DocType::new(&receiver, is_interface);
            let doc_type = package.types.entry(doc_type.sort_key()).or_insert(doc_type);

            let doc_method = DocMethod::new(&declaring, method.clone());
            doc_type.methods.insert(doc_method.sort_key(), doc_method);
        }
    }
    doc
}

/// Resolve a declared receiver type to its fully-qualified form.
///
/// Generic arguments are dropped (`List<String>` -> `List`), array suffixes
/// kept. Single-uppercase-letter type parameters normalize to
/// `java.lang.Object`. Unqualified reference types resolve through the
/// class's explicit imports, then fall back to `java.lang`.
pub fn resolve_receiver(declared: &str, class: &ParsedClass) -> String {
    let stripped = strip_generics(declared.trim());
    let elem = model::element_type(&stripped);
    let suffix = &stripped[elem.len()..];

    let resolved = if model::is_primitive(elem) {
        elem.to_string()
    } else if is_type_parameter(elem) {
        "java.lang.Object".to_string()
    } else if elem.contains('.') {
        elem.to_string()
    } else if let Some(import) = class
        .imports
        .iter()
        .find(|i| i.rsplit('.').next() == Some(elem))
    {
        import.clone()
    } else {
        format!("java.lang.{elem}")
    };
    format!("{resolved}{suffix}")
}

/// Single uppercase ASCII letter, the javadoc convention for type parameters.
fn is_type_parameter(name: &str) -> bool {
    let mut chars = name.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_uppercase())
}

/// Remove `<...>` sections, keeping what surrounds them: `Map<K, V>[]` -> `Map[]`.
fn strip_generics(type_name: &str) -> String {
    let mut out = String::with_capacity(type_name.len());
    let mut depth = 0i32;
    for c in type_name.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}
