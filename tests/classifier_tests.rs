use locator_harvest::screen::{
    classifier::classify,
    screen_model::{Classification, ClassifierConfig},
};
use locator_harvest::tree::tree_model::UiNode;

#[test]
fn actionable_tag_without_state_flags_is_interactive() {
    let config = ClassifierConfig::default();
    let node = UiNode::new("XCUIElementTypeButton");

    assert_eq!(classify(&node, &config), Classification::Interactive);
}

#[test]
fn disabled_element_is_not_interactive() {
    let config = ClassifierConfig::default();
    let node = UiNode::new("XCUIElementTypeButton").with_attr("enabled", "false");

    assert_eq!(classify(&node, &config), Classification::NonInteractive);
}

#[test]
fn invisible_element_is_not_interactive() {
    let config = ClassifierConfig::default();
    let node = UiNode::new("XCUIElementTypeCell")
        .with_attr("enabled", "true")
        .with_attr("visible", "false");

    assert_eq!(classify(&node, &config), Classification::NonInteractive);
}

#[test]
fn unlisted_tag_is_never_interactive() {
    let config = ClassifierConfig::default();
    let node = UiNode::new("XCUIElementTypeOther")
        .with_attr("enabled", "true")
        .with_attr("visible", "true");

    assert_eq!(classify(&node, &config), Classification::NonInteractive);
}

#[test]
fn actionable_tags_are_configuration() {
    let node = UiNode::new("XCUIElementTypeStaticText");
    let default = ClassifierConfig::default();
    let strict = ClassifierConfig::with_tags(["XCUIElementTypeButton"]);

    assert_eq!(classify(&node, &default), Classification::Interactive);
    assert_eq!(classify(&node, &strict), Classification::NonInteractive);

    let custom = ClassifierConfig::with_tags(["android.widget.Button"]);
    assert_eq!(
        classify(&UiNode::new("android.widget.Button"), &custom),
        Classification::Interactive
    );
}

#[test]
fn classification_display_labels() {
    assert_eq!(Classification::Interactive.to_string(), "Interactive");
    assert_eq!(Classification::NonInteractive.to_string(), "Non-Interactive");
}
