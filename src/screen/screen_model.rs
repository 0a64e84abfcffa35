use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Tags treated as actionable when no configuration overrides them.
///
/// StaticText is here because apps often use plain text as tap targets,
/// not because text is inherently operable.
pub const DEFAULT_ACTIONABLE_TAGS: &[&str] = &[
    "XCUIElementTypeButton",
    "XCUIElementTypeLink",
    "XCUIElementTypeCell",
    "XCUIElementTypeStaticText",
    "XCUIElementTypeMenuItem",
    "XCUIElementTypeCheckBox",
    "XCUIElementTypeSwitch",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Interactive,
    NonInteractive,
}

impl Classification {
    pub fn is_interactive(self) -> bool {
        matches!(self, Classification::Interactive)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Interactive => f.write_str("Interactive"),
            Classification::NonInteractive => f.write_str("Non-Interactive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_actionable_tags")]
    pub actionable_tags: BTreeSet<String>,
}

impl ClassifierConfig {
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            actionable_tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_actionable_tag(&self, tag: &str) -> bool {
        self.actionable_tags.contains(tag)
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            actionable_tags: default_actionable_tags(),
        }
    }
}

fn default_actionable_tags() -> BTreeSet<String> {
    DEFAULT_ACTIONABLE_TAGS.iter().map(|t| t.to_string()).collect()
}
