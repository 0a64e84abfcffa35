use quick_xml::escape::escape;

use crate::tree::tree_model::UiNode;

/// Attributes that change between captures of the same screen (typed text,
/// slider positions) and must not influence the fingerprint.
pub const VOLATILE_ATTRIBUTES: &[&str] = &["value"];

fn is_volatile(key: &str) -> bool {
    VOLATILE_ATTRIBUTES.contains(&key)
}

/// Deep copy of `root` with every volatile attribute removed.
pub fn strip_volatile(root: &UiNode) -> UiNode {
    UiNode {
        tag: root.tag.clone(),
        attributes: root
            .attributes
            .iter()
            .filter(|(k, _)| !is_volatile(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        children: root.children.iter().map(strip_volatile).collect(),
    }
}

/// Deterministic serialization of the stable part of a tree.
///
/// Attributes come out sorted by key, children in document order. The input
/// is not modified.
pub fn canonical_bytes(root: &UiNode) -> Vec<u8> {
    let mut out = String::new();
    write_node(root, &mut out);
    out.into_bytes()
}

fn write_node(node: &UiNode, out: &mut String) {
    out.push('<');
    out.push_str(&node.tag);

    for (key, value) in &node.attributes {
        if is_volatile(key) {
            continue;
        }
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }

    if node.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &node.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&node.tag);
    out.push('>');
}
