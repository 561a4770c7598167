//! Filter pipeline and map page rendering.
//!
//! Consumes the unified record set produced by the loader, owns the
//! per-session state (load once, refilter on each selection change),
//! and writes the standalone HTML page with the embedded map payload,
//! legend, and missing-coordinates listing.

mod deck;
mod error;
mod filter;
mod html;
mod legend;
mod session;

pub use deck::{DeckSpec, ScatterLayer, ViewState};
pub use error::{RenderError, Result};
pub use filter::{PlottedPoint, TagSelection, missing_rows, visible_points};
pub use html::{DECK_GL_SRC, MapPageOptions, render_map_page, write_map_page};
pub use legend::{LegendEntry, legend_entries, legend_html};
pub use session::{MapSession, MapView};
