use std::fmt;

use crate::tree::tree_model::UiNode;

/// Which generation rule produced a candidate. Rules run in declaration
/// order, so the order of a candidate list is its preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateRule {
    Name,
    Label,
    Value,
    NameAndLabel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorCandidate {
    pub rule: CandidateRule,
    pub expression: String,
}

impl fmt::Display for LocatorCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

/// Attribute-based class chain queries (`**/Tag[@key='v']`) that re-select
/// `node` anywhere in the tree. Empty when the node has no non-empty
/// `name`, `label` or `value`.
pub fn candidates(node: &UiNode) -> Vec<LocatorCandidate> {
    let name = node.non_empty_attr("name");
    let label = node.non_empty_attr("label");
    let value = node.non_empty_attr("value");

    let tag = node.tag.as_str();
    let mut out = Vec::new();

    if let Some(name) = name {
        out.push(candidate(CandidateRule::Name, tag, &[("name", name)]));
    }

    if let Some(label) = label {
        if name != Some(label) {
            out.push(candidate(CandidateRule::Label, tag, &[("label", label)]));
        }
    }

    if let Some(value) = value {
        out.push(candidate(CandidateRule::Value, tag, &[("value", value)]));
    }

    if let (Some(name), Some(label)) = (name, label) {
        out.push(candidate(
            CandidateRule::NameAndLabel,
            tag,
            &[("name", name), ("label", label)],
        ));
    }

    out
}

fn candidate(rule: CandidateRule, tag: &str, preds: &[(&str, &str)]) -> LocatorCandidate {
    let conditions = preds
        .iter()
        .map(|(key, value)| format!("@{}={}", key, quote(value)))
        .collect::<Vec<_>>()
        .join(" and ");

    LocatorCandidate {
        rule,
        expression: format!("**/{}[{}]", tag, conditions),
    }
}

fn quote(value: &str) -> String {
    if value.contains('\'') && !value.contains('"') {
        format!("\"{}\"", value)
    } else {
        format!("'{}'", value)
    }
}

/// Identity of an element across snapshots: two nodes agreeing on all eight
/// fields are the same logical element. Missing attributes count as "".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UniqueKey {
    pub tag: String,
    pub name: String,
    pub label: String,
    pub value: String,
    pub x: String,
    pub y: String,
    pub width: String,
    pub height: String,
}

pub fn unique_key(node: &UiNode) -> UniqueKey {
    let get = |key: &str| node.attr(key).unwrap_or_default().to_string();

    UniqueKey {
        tag: node.tag.clone(),
        name: get("name"),
        label: get("label"),
        value: get("value"),
        x: get("x"),
        y: get("y"),
        width: get("width"),
        height: get("height"),
    }
}
