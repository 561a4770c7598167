//! Dataset assembly: primary table plus geocode cache merge.
//!
//! The load runs once per session, in order:
//! 1. **Read**: validate encoding, header, and required columns, then
//!    read the primary table
//! 2. **Project**: extract (name, address, tag) source rows
//! 3. **Merge**: left-join the geocode cache by address, falling back
//!    to null coordinates when no cache file exists

use std::collections::BTreeSet;

use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, warn};

use pinmap_model::{AddressDataset, AddressRecord, MapConfig, SourceRow};

use crate::cache::{GeocodeCache, load_geocode_cache};
use crate::error::Result;
use crate::table::{ensure_columns, read_header, read_table, validate_encoding};
use crate::values::{any_to_string, any_to_string_non_empty};

/// Loads and merges the primary table and the geocode cache.
///
/// The primary table must exist and carry the configured columns.
/// A missing cache file is not an error: every record then loads with
/// null coordinates and the map shows no points until the companion
/// geocoder has run.
pub fn load_dataset(config: &MapConfig) -> Result<AddressDataset> {
    let span = info_span!("load_dataset", data = %config.data_path.display());
    let _guard = span.enter();

    let df = read_primary_table(config)?;
    let rows = project_source_rows(&df, config)?;
    let (rows, duplicate_addresses, empty_addresses) = dedupe_source_rows(rows);

    let cache = if config.cache_path.exists() {
        let cache = load_geocode_cache(&config.cache_path, &config.address_column)?;
        info!(
            cache = %config.cache_path.display(),
            entries = cache.len(),
            "geocode cache loaded"
        );
        Some(cache)
    } else {
        info!(
            cache = %config.cache_path.display(),
            "no geocode cache found, coordinates will be empty"
        );
        None
    };

    let records = merge_rows(rows, cache.as_ref());
    let dataset = AddressDataset {
        records,
        cache_used: cache.is_some(),
        duplicate_addresses,
        empty_addresses,
    };

    info!(
        records = dataset.len(),
        geocoded = dataset.geocoded_count(),
        tags = dataset.tag_values().len(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Loads the primary table alone, skipping the geocode cache even
/// when the file exists. Every record carries null coordinates.
pub fn load_primary(config: &MapConfig) -> Result<AddressDataset> {
    let span = info_span!("load_primary", data = %config.data_path.display());
    let _guard = span.enter();

    let df = read_primary_table(config)?;
    let rows = project_source_rows(&df, config)?;
    let (rows, duplicate_addresses, empty_addresses) = dedupe_source_rows(rows);

    let records = merge_rows(rows, None);
    let dataset = AddressDataset {
        records,
        cache_used: false,
        duplicate_addresses,
        empty_addresses,
    };

    info!(
        records = dataset.len(),
        tags = dataset.tag_values().len(),
        "primary table loaded"
    );
    Ok(dataset)
}

// ============================================================================
// Stage 1: Read
// ============================================================================

fn read_primary_table(config: &MapConfig) -> Result<DataFrame> {
    validate_encoding(&config.data_path)?;
    let header = read_header(&config.data_path, config.delimiter)?;
    ensure_columns(&header, &config.required_columns(), &config.data_path)?;

    let df = read_table(&config.data_path, config.delimiter)?;
    debug!(rows = df.height(), columns = df.width(), "primary table read");
    Ok(df)
}

// ============================================================================
// Stage 2: Project
// ============================================================================

/// Projects the primary table down to the three working columns.
/// Name and address are trimmed; a tag that is empty after trimming
/// becomes `None`.
fn project_source_rows(df: &DataFrame, config: &MapConfig) -> Result<Vec<SourceRow>> {
    let names = df.column(&config.name_column)?;
    let addresses = df.column(&config.address_column)?;
    let tags = df.column(&config.tag_column)?;

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let name = any_to_string(names.get(idx)?);
        let address = any_to_string(addresses.get(idx)?);
        let tag = any_to_string_non_empty(tags.get(idx)?);
        rows.push(SourceRow {
            name: name.trim().to_string(),
            address: address.trim().to_string(),
            tag,
        });
    }
    Ok(rows)
}

/// Drops rows without an address and all but the first row per
/// address. Returns the kept rows plus (duplicate, empty) drop counts.
fn dedupe_source_rows(rows: Vec<SourceRow>) -> (Vec<SourceRow>, usize, usize) {
    let mut seen = BTreeSet::new();
    let mut kept = Vec::with_capacity(rows.len());
    let mut duplicates = 0usize;
    let mut empties = 0usize;

    for row in rows {
        if row.address.is_empty() {
            empties += 1;
            warn!(name = %row.name, "skipping row with empty address");
            continue;
        }
        if !seen.insert(row.address.clone()) {
            duplicates += 1;
            warn!(address = %row.address, "duplicate address, keeping first row");
            continue;
        }
        kept.push(row);
    }

    (kept, duplicates, empties)
}

// ============================================================================
// Stage 3: Merge
// ============================================================================

/// Left-join: every source row yields exactly one record; cache
/// entries without a matching source address are dropped here simply
/// by never being looked up.
fn merge_rows(rows: Vec<SourceRow>, cache: Option<&GeocodeCache>) -> Vec<AddressRecord> {
    rows.into_iter()
        .map(|row| {
            let entry = cache.and_then(|cache| cache.lookup(&row.address));
            AddressRecord::from_parts(row, entry)
        })
        .collect()
}
