//! Geocode cache loading.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::warn;

use pinmap_model::{CACHE_LAT_COLUMN, CACHE_LON_COLUMN, GeocodeEntry};

use crate::error::{DataLoadError, Result};
use crate::values::parse_f64;

/// Address-keyed geocoder output loaded from the cache file.
///
/// The cache is written by the companion geocoder as a comma-delimited
/// table with the address column plus `lat` and `lon`. Entries whose
/// coordinates could not be resolved carry empty fields and load as
/// `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeocodeCache {
    entries: BTreeMap<String, GeocodeEntry>,
}

impl GeocodeCache {
    /// Coordinates recorded for an address, if any.
    pub fn lookup(&self, address: &str) -> Option<GeocodeEntry> {
        self.entries.get(address).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Loads the cache file. Duplicate addresses keep the first entry;
/// blank or non-numeric coordinate fields load as `None`.
///
/// Callers decide whether the file exists; a present but unreadable or
/// malformed cache is an error, never a silent fallback.
pub fn load_geocode_cache(path: &Path, address_column: &str) -> Result<GeocodeCache> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| cache_error(path, &e))?;

    let headers = reader.headers().map_err(|e| cache_error(path, &e))?.clone();
    let address_idx = cache_column(&headers, address_column, path)?;
    let lat_idx = cache_column(&headers, CACHE_LAT_COLUMN, path)?;
    let lon_idx = cache_column(&headers, CACHE_LON_COLUMN, path)?;

    let mut entries: BTreeMap<String, GeocodeEntry> = BTreeMap::new();
    let mut duplicates = 0usize;
    for record in reader.records() {
        let record = record.map_err(|e| cache_error(path, &e))?;
        let address = record.get(address_idx).unwrap_or("").trim();
        if address.is_empty() {
            continue;
        }
        if entries.contains_key(address) {
            duplicates += 1;
            continue;
        }
        let lat = parse_f64(record.get(lat_idx).unwrap_or(""));
        let lon = parse_f64(record.get(lon_idx).unwrap_or(""));
        entries.insert(address.to_string(), GeocodeEntry::new(lat, lon));
    }

    if duplicates > 0 {
        warn!(
            path = %path.display(),
            duplicates,
            "cache contains duplicate addresses, keeping first entries"
        );
    }

    Ok(GeocodeCache { entries })
}

fn cache_column(headers: &csv::StringRecord, name: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.trim_matches('\u{feff}').trim() == name)
        .ok_or_else(|| DataLoadError::MissingColumn {
            column: name.to_string(),
            path: path.to_path_buf(),
            available: headers
                .iter()
                .map(|header| header.trim_matches('\u{feff}').trim())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

fn cache_error(path: &Path, err: &csv::Error) -> DataLoadError {
    DataLoadError::CsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
