//! Tree builder: folds parsed rows into a catalog tree.

use std::collections::HashMap;

use tracing::{debug, instrument, trace, warn};

use crate::domain::arena::CatalogTree;
use crate::domain::entities::{clean_cell, normalize_header, Column, Item};
use crate::domain::parser::{parse_rows, Row};

/// Counters collected during the last build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Rows that produced an item
    pub records: usize,
    /// Rows with nothing but blank cells
    pub skipped_blank: usize,
    /// Rows missing a name, local status or order
    pub skipped_incomplete: usize,
}

/// Constructs catalog trees from tabular rows.
///
/// Row 0 is the header. Every later row is a candidate record classified
/// under `local status / order / family?`. Malformed rows are skipped, so
/// building never fails.
pub struct TreeBuilder {
    columns: HashMap<Column, usize>,
    stats: BuildStats,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            columns: HashMap::new(),
            stats: BuildStats::default(),
        }
    }

    /// Statistics for the most recent [`Self::build`] call.
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Parse `text` as comma-separated data and build the tree.
    pub fn build_from_text(&mut self, text: &str) -> CatalogTree {
        let rows = parse_rows(text);
        self.build(&rows)
    }

    #[instrument(level = "debug", skip(self, rows), fields(rows = rows.len()))]
    pub fn build(&mut self, rows: &[Row]) -> CatalogTree {
        // Reset state for a fresh build
        self.columns.clear();
        self.stats = BuildStats::default();

        let mut tree = CatalogTree::new();
        let Some((header, records)) = rows.split_first() else {
            return tree;
        };
        self.map_columns(header);

        for (line, cells) in records.iter().enumerate() {
            if cells.iter().all(|c| c.trim().is_empty()) {
                self.stats.skipped_blank += 1;
                continue;
            }
            let Some(item) = self.record(cells) else {
                trace!("row {}: missing required field, skipped", line + 1);
                self.stats.skipped_incomplete += 1;
                continue;
            };

            let folder = item
                .classification_path()
                .iter()
                .fold(tree.root(), |parent, segment| tree.ensure_folder(parent, segment));
            tree.put_item(folder, item);
            self.stats.records += 1;
        }

        debug!(
            "built tree: {} records, {} blank rows, {} incomplete rows",
            self.stats.records, self.stats.skipped_blank, self.stats.skipped_incomplete
        );
        tree
    }

    fn map_columns(&mut self, header: &[String]) {
        for (position, raw) in header.iter().enumerate() {
            let key = normalize_header(raw);
            match Column::from_key(&key) {
                Some(column) => {
                    // First occurrence wins
                    self.columns.entry(column).or_insert(position);
                }
                None => trace!("ignoring column '{}'", key),
            }
        }
        debug!("mapped {} of {} header columns", self.columns.len(), header.len());
        for column in Column::ALL.into_iter().filter(|c| c.is_required()) {
            if !self.columns.contains_key(&column) {
                warn!("required column '{}' missing from header", column.key());
            }
        }
    }

    fn cell(&self, cells: &[String], column: Column) -> String {
        self.columns
            .get(&column)
            .and_then(|&i| cells.get(i))
            .map(|raw| clean_cell(raw))
            .unwrap_or_default()
    }

    fn record(&self, cells: &[String]) -> Option<Item> {
        let name = self.cell(cells, Column::CommonName);
        let local_status = self.cell(cells, Column::LocalStatus);
        let order = self.cell(cells, Column::Order);
        if name.is_empty() || local_status.is_empty() || order.is_empty() {
            return None;
        }
        let family = self.cell(cells, Column::Family);

        Some(Item {
            name,
            scientific_name: self.cell(cells, Column::ScientificName),
            habitat: self.cell(cells, Column::Habitat),
            diet: self.cell(cells, Column::Diet),
            fun_fact: self.cell(cells, Column::FunFact),
            local_status,
            order,
            family: (!family.is_empty()).then_some(family),
        })
    }
}
