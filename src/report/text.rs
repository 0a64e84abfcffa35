use crate::report::catalog::MasterCatalog;
use crate::report::report_model::{ElementReport, SnapshotReport};

// ============================================================================
// Plain-text reporters — stable, diffable layouts
// ============================================================================

const SEPARATOR_WIDTH: usize = 80;
const UNRESOLVED_PATH: &str = "<unresolved>";

const SUMMARY_KEYS: &[&str] = &["name", "label", "value", "enabled", "visible"];
const POSITION_KEYS: &[&str] = &["x", "y", "width", "height"];

/// Format one snapshot's report.
///
/// Produces output like:
/// ```text
/// === Locators for page_1.xml ===
///
/// Tag: XCUIElementTypeButton
/// Attributes: name='login', label='Log In', enabled='true', visible='true'
/// Position: x=20, y=400, width=335, height=44
/// Classification: Interactive
/// Absolute XPath: /XCUIElementTypeApplication/XCUIElementTypeButton[1]
/// iOS Class Chain Candidates:
///   - **/XCUIElementTypeButton[@name='login']
///   - **/XCUIElementTypeButton[@label='Log In']
///   - **/XCUIElementTypeButton[@name='login' and @label='Log In']
/// --------------------------------------------------------------------------------
/// ```
pub fn format_snapshot_report(report: &SnapshotReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== Locators for {} ===\n", report.source));

    let separator = "-".repeat(SEPARATOR_WIDTH);
    for element in &report.elements {
        out.push('\n');
        out.push_str(&format_element_block(element));
        out.push('\n');
        out.push_str(&separator);
    }

    out
}

fn format_element_block(element: &ElementReport) -> String {
    let mut lines = vec![
        format!("Tag: {}", element.tag),
        format!("Attributes: {}", attribute_summary(element)),
    ];

    let position = position_summary(element);
    if !position.is_empty() {
        lines.push(format!("Position: {}", position));
    }

    lines.push(format!("Classification: {}", element.classification));
    lines.push(format!("Absolute XPath: {}", path_or_marker(element)));
    push_candidates(&mut lines, element);

    lines.join("\n")
}

/// Format the master catalog of unique Interactive elements.
pub fn format_master_catalog(catalog: &MasterCatalog) -> String {
    let mut out = String::from("=== MASTER LIST OF UNIQUE INTERACTIVE ELEMENTS ===\n\n");

    for element in catalog.entries() {
        out.push_str(&format_catalog_entry(element));
        out.push_str("\n\n");
    }

    out
}

fn format_catalog_entry(element: &ElementReport) -> String {
    let get = |key: &str| element.attr(key).unwrap_or_default();

    let mut lines = vec![
        format!("Tag: {}", element.tag),
        format!(
            "name='{}', label='{}', value='{}'",
            get("name"),
            get("label"),
            get("value")
        ),
        format!(
            "Position: x={}, y={}, width={}, height={}",
            get("x"),
            get("y"),
            get("width"),
            get("height")
        ),
        format!("Absolute XPath: {}", path_or_marker(element)),
    ];
    push_candidates(&mut lines, element);

    lines.join("\n")
}

// ============================================================================
// Helpers
// ============================================================================

fn attribute_summary(element: &ElementReport) -> String {
    SUMMARY_KEYS
        .iter()
        .filter_map(|key| {
            element
                .attr(key)
                .filter(|v| !v.is_empty())
                .map(|v| format!("{}='{}'", key, v))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn position_summary(element: &ElementReport) -> String {
    POSITION_KEYS
        .iter()
        .filter_map(|key| element.attr(key).map(|v| format!("{}={}", key, v)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn path_or_marker(element: &ElementReport) -> &str {
    element.path.as_deref().unwrap_or(UNRESOLVED_PATH)
}

fn push_candidates(lines: &mut Vec<String>, element: &ElementReport) {
    if element.candidates.is_empty() {
        return;
    }

    lines.push("iOS Class Chain Candidates:".to_string());
    for candidate in &element.candidates {
        lines.push(format!("  - {}", candidate));
    }
}
