pub mod config;
pub mod palette;
pub mod record;

pub use config::{
    CACHE_LAT_COLUMN, CACHE_LON_COLUMN, DEFAULT_CACHE_FILE, DEFAULT_DATA_FILE, DEFAULT_MAP_STYLE,
    MapConfig, Viewport, default_cache_path,
};
pub use palette::{PALETTE, Rgba, TagPalette, color_for_index};
pub use record::{AddressDataset, AddressRecord, GeocodeEntry, SourceRow};
