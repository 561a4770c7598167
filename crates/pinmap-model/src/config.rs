use std::path::{Path, PathBuf};

/// Default primary table file name.
pub const DEFAULT_DATA_FILE: &str = "addresses.csv";

/// Default geocode cache file name, written by the companion geocoder.
pub const DEFAULT_CACHE_FILE: &str = "geocode_cache.csv";

/// Default base map style.
pub const DEFAULT_MAP_STYLE: &str = "mapbox://styles/mapbox/streets-v11";

/// Cache column holding latitude. The cache address column reuses the
/// configured primary address column name.
pub const CACHE_LAT_COLUMN: &str = "lat";

/// Cache column holding longitude.
pub const CACHE_LON_COLUMN: &str = "lon";

/// Initial map viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            latitude: 49.8,
            longitude: 15.5,
            zoom: 7.0,
            pitch: 0.0,
        }
    }
}

/// File locations, table schema, and viewport constants for one load.
///
/// Defaults reproduce the deployed configuration; the CLI overrides
/// paths, delimiter, and column names per invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// Primary table location.
    pub data_path: PathBuf,
    /// Geocode cache location; merged only when the file exists.
    pub cache_path: PathBuf,
    /// Primary-table field delimiter.
    pub delimiter: u8,
    /// Column holding the display name.
    pub name_column: String,
    /// Column holding the address (the join key).
    pub address_column: String,
    /// Column holding the category tag.
    pub tag_column: String,
    pub view: Viewport,
    /// Marker radius in meters.
    pub radius_meters: f64,
    /// Pixel clamp bounds for the marker radius.
    pub radius_min_pixels: u32,
    pub radius_max_pixels: u32,
    pub map_style: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            cache_path: PathBuf::from(DEFAULT_CACHE_FILE),
            delimiter: b';',
            name_column: "name".to_string(),
            address_column: "address".to_string(),
            tag_column: "tag".to_string(),
            view: Viewport::default(),
            radius_meters: 500.0,
            radius_min_pixels: 5,
            radius_max_pixels: 30,
            map_style: DEFAULT_MAP_STYLE.to_string(),
        }
    }
}

impl MapConfig {
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = path.into();
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_columns(
        mut self,
        name: impl Into<String>,
        address: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        self.name_column = name.into();
        self.address_column = address.into();
        self.tag_column = tag.into();
        self
    }

    /// The three required primary-table columns, in projection order.
    pub fn required_columns(&self) -> [&str; 3] {
        [&self.name_column, &self.address_column, &self.tag_column]
    }
}

/// Default cache location for a primary table: `geocode_cache.csv` in
/// the same directory.
pub fn default_cache_path(data_path: &Path) -> PathBuf {
    match data_path.parent() {
        Some(dir) => dir.join(DEFAULT_CACHE_FILE),
        None => PathBuf::from(DEFAULT_CACHE_FILE),
    }
}
