use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{HarvestError, Result};
use crate::tree::tree_model::UiNode;

/// Parse a serialized page source into a `UiNode` tree.
///
/// Only elements and their attributes are kept. Declarations, comments,
/// processing instructions and CDATA are skipped; stray text outside the
/// root element makes the document malformed.
pub fn parse_markup(markup: &str) -> Result<UiNode> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<UiNode> = Vec::new();
    let mut root: Option<UiNode> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            HarvestError::MalformedMarkup(format!(
                "at byte {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(start) => {
                stack.push(open_node(&start)?);
            }
            Event::Empty(start) => {
                let node = open_node(&start)?;
                attach(node, &mut stack, &mut root)?;
            }
            Event::End(end) => {
                let node = stack.pop().ok_or_else(|| {
                    HarvestError::MalformedMarkup(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(end.name().as_ref())
                    ))
                })?;
                attach(node, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                if stack.is_empty() && text.iter().any(|b| !b.is_ascii_whitespace()) {
                    return Err(HarvestError::MalformedMarkup(
                        "text outside of the root element".into(),
                    ));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(HarvestError::MalformedMarkup(format!(
            "element <{}> is never closed",
            open.tag
        )));
    }

    root.ok_or_else(|| HarvestError::MalformedMarkup("document has no root element".into()))
}

fn open_node(start: &BytesStart<'_>) -> Result<UiNode> {
    let mut node = UiNode::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());

    for attr in start.attributes() {
        let attr = attr.map_err(|e| {
            HarvestError::MalformedMarkup(format!("bad attribute on <{}>: {}", node.tag, e))
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| {
                HarvestError::MalformedMarkup(format!(
                    "bad value for {}=... on <{}>: {}",
                    key, node.tag, e
                ))
            })?
            .into_owned();
        node.attributes.insert(key, value);
    }

    Ok(node)
}

fn attach(node: UiNode, stack: &mut [UiNode], root: &mut Option<UiNode>) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_some() => {
            return Err(HarvestError::MalformedMarkup(format!(
                "second top-level element <{}>",
                node.tag
            )));
        }
        None => *root = Some(node),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_with_attributes() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<AppRoot type="app">
  <Button name="ok" label="OK &amp; go"/>
  <Group>
    <Text value="hi"></Text>
  </Group>
</AppRoot>"#;

        let root = parse_markup(xml).unwrap();
        assert_eq!(root.tag, "AppRoot");
        assert_eq!(root.attr("type"), Some("app"));
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].attr("label"), Some("OK & go"));
        assert_eq!(root.children[1].children[0].tag, "Text");
    }

    #[test]
    fn rejects_mismatched_and_unclosed_tags() {
        assert!(parse_markup("<a><b></a>").is_err());
        assert!(parse_markup("<a><b/>").is_err());
        assert!(parse_markup("</a>").is_err());
    }

    #[test]
    fn rejects_documents_without_single_root() {
        assert!(parse_markup("").is_err());
        assert!(parse_markup("not xml at all").is_err());
        assert!(parse_markup("<a/><b/>").is_err());
    }
}
