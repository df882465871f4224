//! Domain entities: catalog records and the column keys they are read from

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Zero-width space inserted after `/` so long slash-joined values can wrap.
pub const WRAP_HINT: char = '\u{200B}';

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// A single wildlife record, the payload of an item node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Common name, unique within the containing folder
    #[serde(rename = "commonName")]
    pub name: String,
    #[serde(default)]
    pub scientific_name: String,
    #[serde(default)]
    pub habitat: String,
    #[serde(default)]
    pub diet: String,
    #[serde(default)]
    pub fun_fact: String,
    /// First classification level (e.g. "Native", "Invasive")
    pub local_status: String,
    /// Second classification level (taxonomic order)
    pub order: String,
    /// Optional third classification level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
}

impl Item {
    /// Folder names leading from the root to the folder holding this item.
    pub fn classification_path(&self) -> Vec<String> {
        let mut path = vec![self.local_status.clone(), self.order.clone()];
        if let Some(family) = self.family.as_ref().filter(|f| !f.is_empty()) {
            path.push(family.clone());
        }
        path
    }
}

/// Recognized header columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    CommonName,
    ScientificName,
    Habitat,
    Diet,
    FunFact,
    LocalStatus,
    Order,
    Family,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::CommonName,
        Column::ScientificName,
        Column::Habitat,
        Column::Diet,
        Column::FunFact,
        Column::LocalStatus,
        Column::Order,
        Column::Family,
    ];

    /// Canonical key as produced by [`normalize_header`].
    pub fn key(self) -> &'static str {
        match self {
            Column::CommonName => "common-name",
            Column::ScientificName => "scientific-name",
            Column::Habitat => "habitat",
            Column::Diet => "diet",
            Column::FunFact => "fun-fact",
            Column::LocalStatus => "local-status",
            Column::Order => "order",
            Column::Family => "family",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    pub fn is_required(self) -> bool {
        matches!(self, Column::CommonName | Column::LocalStatus | Column::Order)
    }
}

fn separator_regex() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    SEPARATORS.get_or_init(|| Regex::new(r"[\s_]+").expect("static separator pattern"))
}

/// Normalize a header cell into a canonical column key.
///
/// `"\u{FEFF} Common_Name "` → `"common-name"`
pub fn normalize_header(raw: &str) -> String {
    let stripped = raw.strip_prefix(BYTE_ORDER_MARK).unwrap_or(raw);
    let lowered = stripped.trim().to_lowercase();
    separator_regex().replace_all(&lowered, "-").into_owned()
}

/// Trim a cell and insert a wrap hint after every `/`.
pub fn clean_cell(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut out = String::with_capacity(trimmed.len() + 3 * trimmed.matches('/').count());
    for ch in trimmed.chars() {
        out.push(ch);
        if ch == '/' {
            out.push(WRAP_HINT);
        }
    }
    out
}
