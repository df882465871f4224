//! Human-facing labels for folders and classification values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const LEARN_ABOUT: &str = "Learn About";

/// Label settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LabelConfig {
    /// Heading shown at the root
    pub root_title: String,
    /// Status folder whose heading reads "Learn About Year-Round Residents"
    pub resident_status: String,
    /// Friendly names for local status folders on buttons
    pub status_names: BTreeMap<String, String>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        let status_names = [
            ("Native", "Year-Round Residents"),
            ("Non-Native", "Just Passing Through"),
            ("Invasive", "I Don't Belong Here"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            root_title: "Who Lives Here?".into(),
            resident_status: "Native".into(),
            status_names,
        }
    }
}

impl LabelConfig {
    /// Heading for the folder at `path`.
    pub fn folder_label<S: AsRef<str>>(&self, path: &[S]) -> String {
        match path {
            [] => self.root_title.clone(),
            [status] if status.as_ref() == self.resident_status => {
                format!("{LEARN_ABOUT} {}", self.status_display_name(status.as_ref()))
            }
            [status] => format!("{LEARN_ABOUT} {} Species", status.as_ref()),
            [first, .., last] => format!("{} {}", first.as_ref(), last.as_ref()),
        }
    }

    /// Label for the "up" button: the parent's heading without the lead-in.
    pub fn up_label<S: AsRef<str>>(&self, path: &[S]) -> Option<String> {
        if path.is_empty() {
            return None;
        }
        let parent = &path[..path.len() - 1];
        let label = self.folder_label(parent);
        Some(label.replacen(LEARN_ABOUT, "", 1).trim().to_string())
    }

    /// Button text for a folder or item name.
    pub fn status_display_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.status_names.get(name).map(String::as_str).unwrap_or(name)
    }
}
