//! Session state: load once, refilter many times.

use tracing::debug;

use pinmap_model::{AddressDataset, AddressRecord, TagPalette};

use crate::filter::{PlottedPoint, TagSelection, missing_rows, visible_points};
use crate::legend::{LegendEntry, legend_entries};

/// State for one viewing session.
///
/// Owns the loaded records and the palette built from the full tag
/// set. The tag selection is the only mutable piece; views are
/// recomputed from scratch on every [`MapSession::snapshot`] call.
#[derive(Debug, Clone)]
pub struct MapSession {
    records: Vec<AddressRecord>,
    palette: TagPalette,
    selection: TagSelection,
}

/// Everything one render needs: points, legend, and diagnostics.
#[derive(Debug, Clone)]
pub struct MapView {
    pub points: Vec<PlottedPoint>,
    /// Rows lacking coordinates, from the full set.
    pub missing: Vec<AddressRecord>,
    /// `(tag, color)` pairs in palette order.
    pub legend: Vec<LegendEntry>,
    /// The selection the points were computed for, sorted.
    pub selected_tags: Vec<String>,
    pub total_records: usize,
}

impl MapView {
    pub fn visible_count(&self) -> usize {
        self.points.len()
    }
}

impl MapSession {
    /// Builds a session from a loaded dataset. Every tag starts
    /// selected, matching the page's initial state.
    pub fn new(dataset: AddressDataset) -> Self {
        let palette = TagPalette::build(dataset.tag_values());
        let selection = TagSelection::all(&palette);
        Self {
            records: dataset.records,
            palette,
            selection,
        }
    }

    pub fn records(&self) -> &[AddressRecord] {
        &self.records
    }

    pub fn palette(&self) -> &TagPalette {
        &self.palette
    }

    pub fn selection(&self) -> &TagSelection {
        &self.selection
    }

    /// Tags that can be selected, in sorted order.
    pub fn available_tags(&self) -> Vec<String> {
        self.palette.tags().map(String::from).collect()
    }

    /// Replaces the tag selection. The palette is left untouched, so
    /// colors stay stable across selection changes.
    pub fn set_selection(&mut self, selection: TagSelection) {
        self.selection = selection;
    }

    /// Selects every known tag.
    pub fn select_all(&mut self) {
        self.selection = TagSelection::all(&self.palette);
    }

    /// Recomputes the view for the current selection.
    pub fn snapshot(&self) -> MapView {
        let points = visible_points(&self.records, &self.palette, &self.selection);
        let missing = missing_rows(&self.records);
        debug!(
            points = points.len(),
            missing = missing.len(),
            "view recomputed"
        );
        MapView {
            points,
            missing,
            legend: legend_entries(&self.palette),
            selected_tags: self.selection.tags().map(String::from).collect(),
            total_records: self.records.len(),
        }
    }
}
