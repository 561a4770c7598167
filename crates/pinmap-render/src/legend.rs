//! Legend construction and HTML block rendering.

use serde::Serialize;

use pinmap_model::{Rgba, TagPalette};

use crate::html::escape_html;

/// One legend item: a tag with its assigned color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub tag: String,
    pub color: Rgba,
}

/// Legend entries in palette (sorted) order.
pub fn legend_entries(palette: &TagPalette) -> Vec<LegendEntry> {
    palette
        .entries()
        .map(|(tag, color)| LegendEntry {
            tag: tag.to_string(),
            color,
        })
        .collect()
}

/// Renders the legend as a wrapping row of round color swatches with
/// their tag labels.
pub fn legend_html(entries: &[LegendEntry]) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"legend\" style=\"display: flex; flex-wrap: wrap; gap: 10px;\">\n");
    for entry in entries {
        html.push_str("  <div style=\"display: flex; align-items: center;\">");
        html.push_str(&format!(
            "<span style=\"width: 18px; height: 18px; border-radius: 50%; \
             display: inline-block; background-color: {}; margin-right: 6px;\"></span>",
            entry.color.hex()
        ));
        html.push_str(&escape_html(&entry.tag));
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");
    html
}
