use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One row of the primary table, projected down to the three working
/// columns. Values are trimmed at load time; a tag that is empty after
/// trimming becomes `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRow {
    pub name: String,
    /// Join key against the geocode cache.
    pub address: String,
    pub tag: Option<String>,
}

/// Cached geocoder output for one address.
///
/// Either coordinate may be missing: the external geocoder records
/// addresses it failed to resolve with empty fields.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeocodeEntry {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl GeocodeEntry {
    pub fn new(lat: Option<f64>, lon: Option<f64>) -> Self {
        Self { lat, lon }
    }

    /// Returns true when both coordinates are present.
    pub fn is_complete(&self) -> bool {
        self.lat.is_some() && self.lon.is_some()
    }
}

/// The merged working record: exactly one per distinct address in the
/// primary table.
///
/// `name` and `tag` come from the primary table; `lat`/`lon` come from
/// the geocode cache when a matching address exists there, else `None`.
/// Records are built once at load time and never mutated afterward;
/// filtering produces derived views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub name: String,
    pub address: String,
    pub tag: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl AddressRecord {
    /// Builds a record from a source row and its cache lookup result.
    pub fn from_parts(row: SourceRow, entry: Option<GeocodeEntry>) -> Self {
        let entry = entry.unwrap_or_default();
        Self {
            name: row.name,
            address: row.address,
            tag: row.tag,
            lat: entry.lat,
            lon: entry.lon,
        }
    }

    /// Returns true when both coordinates are known.
    pub fn has_coordinates(&self) -> bool {
        self.lat.is_some() && self.lon.is_some()
    }
}

/// The unified row set produced by one load, plus load diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressDataset {
    pub records: Vec<AddressRecord>,
    /// True when a cache file existed and was merged.
    pub cache_used: bool,
    /// Primary-table rows dropped because an earlier row had the same
    /// address.
    pub duplicate_addresses: usize,
    /// Primary-table rows dropped because the address field was empty.
    pub empty_addresses: usize,
}

impl AddressDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct non-null tag values in sorted order. This is the full
    /// selectable set, independent of any filter.
    pub fn tag_values(&self) -> Vec<String> {
        let tags: BTreeSet<&str> = self
            .records
            .iter()
            .filter_map(|record| record.tag.as_deref())
            .collect();
        tags.into_iter().map(String::from).collect()
    }

    /// Number of records with both coordinates present.
    pub fn geocoded_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.has_coordinates())
            .count()
    }
}
