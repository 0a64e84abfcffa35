use crate::screen::screen_model::{Classification, ClassifierConfig};
use crate::tree::tree_model::UiNode;

pub fn classify(node: &UiNode, config: &ClassifierConfig) -> Classification {
    if config.is_actionable_tag(&node.tag) && is_enabled(node) && is_visible(node) {
        Classification::Interactive
    } else {
        Classification::NonInteractive
    }
}

fn is_enabled(node: &UiNode) -> bool {
    state_flag(node, "enabled")
}

fn is_visible(node: &UiNode) -> bool {
    state_flag(node, "visible")
}

// Elements that do not report a state flag are not excluded by it.
fn state_flag(node: &UiNode, key: &str) -> bool {
    match node.attr(key) {
        None => true,
        Some(v) => v.eq_ignore_ascii_case("true"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_flags_compare_case_insensitively() {
        let config = ClassifierConfig::default();
        let node = UiNode::new("XCUIElementTypeButton")
            .with_attr("enabled", "TRUE")
            .with_attr("visible", "True");

        assert_eq!(classify(&node, &config), Classification::Interactive);
    }

    #[test]
    fn empty_state_flag_counts_as_false() {
        let config = ClassifierConfig::default();
        let node = UiNode::new("XCUIElementTypeButton").with_attr("visible", "");

        assert_eq!(classify(&node, &config), Classification::NonInteractive);
    }
}
