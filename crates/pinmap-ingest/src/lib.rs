//! Dataset loading for the address map.
//!
//! This crate reads the semicolon-delimited primary table into a
//! Polars DataFrame, validates its schema, merges the optional
//! comma-delimited geocode cache by address, and produces the unified
//! record set the render pipeline consumes.
//!
//! # Example
//!
//! ```ignore
//! use pinmap_model::MapConfig;
//! use pinmap_ingest::load_dataset;
//!
//! let config = MapConfig::default()
//!     .with_data_path("data/addresses.csv")
//!     .with_cache_path("data/geocode_cache.csv");
//!
//! let dataset = load_dataset(&config)?;
//! println!("{} records, {} geocoded", dataset.len(), dataset.geocoded_count());
//! ```

mod cache;
mod dataset;
mod error;
mod table;
mod values;

// === Error Types ===
pub use error::{DataLoadError, Result};

// === Dataset Loading ===
pub use dataset::{load_dataset, load_primary};

// === Cache Loading ===
pub use cache::{GeocodeCache, load_geocode_cache};

// === Table Reading ===
pub use table::{ensure_columns, parse_header_line, read_header, read_table, validate_encoding};

// === Value Conversion ===
pub use values::{any_to_string, any_to_string_non_empty, format_numeric, parse_f64};
