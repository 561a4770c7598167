//! Standalone HTML map page generation.
//!
//! The page is a single self-contained document: a count heading, the
//! map container driven by the embedded JSON payload, the legend
//! block, and a warning table for rows without coordinates.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

use pinmap_model::MapConfig;

use crate::deck::DeckSpec;
use crate::error::{RenderError, Result};
use crate::legend::legend_html;
use crate::session::MapView;

/// Pinned map widget bundle loaded by the generated page.
pub const DECK_GL_SRC: &str = "https://unpkg.com/deck.gl@9.0.36/dist.min.js";

const PAGE_STYLE: &str = "\
body { font-family: sans-serif; margin: 24px; }\n\
#map { position: relative; height: 600px; margin: 16px 0; }\n\
.count { font-size: 1.1em; }\n\
.warning { background: #fff3cd; border: 1px solid #ffe69c; padding: 12px; margin-top: 16px; }\n\
.warning table { border-collapse: collapse; }\n\
.warning td, .warning th { border: 1px solid #ccc; padding: 4px 8px; text-align: left; }\n";

const BOOT_SCRIPT: &str = "\
const spec = JSON.parse(document.getElementById(\"deck-spec\").textContent);\n\
const layer = new deck.ScatterplotLayer({\n\
  id: \"addresses\",\n\
  data: spec.layer.data,\n\
  getPosition: d => [d.lon, d.lat],\n\
  getFillColor: d => d.color,\n\
  getRadius: spec.layer.radiusMeters,\n\
  radiusMinPixels: spec.layer.radiusMinPixels,\n\
  radiusMaxPixels: spec.layer.radiusMaxPixels,\n\
  pickable: spec.layer.pickable,\n\
});\n\
new deck.DeckGL({\n\
  container: \"map\",\n\
  initialViewState: spec.initialViewState,\n\
  controller: true,\n\
  layers: [layer],\n\
  getTooltip: ({object}) => object && {\n\
    text: spec.tooltip\n\
      .replace(\"{name}\", object.name)\n\
      .replace(\"{address}\", object.address)\n\
      .replace(\"{tag}\", object.tag)\n\
  },\n\
});\n";

/// Options for map page generation.
#[derive(Debug, Clone)]
pub struct MapPageOptions {
    /// Page title, used for both `<title>` and the heading.
    pub title: String,
    /// Script URL for the map widget bundle.
    pub widget_src: String,
}

impl Default for MapPageOptions {
    fn default() -> Self {
        Self {
            title: format!("Address map ({})", Utc::now().format("%d.%m.%Y")),
            widget_src: DECK_GL_SRC.to_string(),
        }
    }
}

impl MapPageOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Renders the full map page for one view.
pub fn render_map_page(
    view: &MapView,
    config: &MapConfig,
    options: &MapPageOptions,
) -> Result<String> {
    let spec = DeckSpec::new(view.points.clone(), config);
    let spec_json = script_safe_json(&spec.to_json()?);
    let generated = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"utf-8\">\n");
    page.push_str(&format!("<!-- Generated: {generated} -->\n"));
    page.push_str(&format!("<title>{}</title>\n", escape_html(&options.title)));
    page.push_str(&format!("<style>\n{PAGE_STYLE}</style>\n"));
    page.push_str("</head>\n<body>\n");

    page.push_str(&format!("<h1>{}</h1>\n", escape_html(&options.title)));
    page.push_str(&format!(
        "<p class=\"count\">Points displayed: {}</p>\n",
        view.visible_count()
    ));
    page.push_str("<div id=\"map\"></div>\n");

    page.push_str("<h2>Legend</h2>\n");
    page.push_str(&legend_html(&view.legend));

    if !view.missing.is_empty() {
        push_warning_block(&mut page, view, config);
    }

    page.push_str(&format!(
        "<script src=\"{}\"></script>\n",
        options.widget_src
    ));
    page.push_str(&format!(
        "<script id=\"deck-spec\" type=\"application/json\">{spec_json}</script>\n"
    ));
    page.push_str(&format!("<script>\n{BOOT_SCRIPT}</script>\n"));
    page.push_str("</body>\n</html>\n");
    Ok(page)
}

/// Writes the page, creating parent directories as needed, and
/// returns the written path.
pub fn write_map_page(path: &Path, html: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| RenderError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }
    fs::write(path, html).map_err(|e| RenderError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(path.to_path_buf())
}

fn push_warning_block(page: &mut String, view: &MapView, config: &MapConfig) {
    page.push_str(&format!(
        "<div class=\"warning\">\n<h2>Addresses without coordinates ({})</h2>\n",
        view.missing.len()
    ));
    page.push_str(&format!(
        "<table>\n<tr><th>{}</th><th>{}</th><th>{}</th></tr>\n",
        escape_html(&config.name_column),
        escape_html(&config.address_column),
        escape_html(&config.tag_column)
    ));
    for row in &view.missing {
        page.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&row.name),
            escape_html(&row.address),
            escape_html(row.tag.as_deref().unwrap_or(""))
        ));
    }
    page.push_str("</table>\n</div>\n");
}

/// Minimal HTML escaping for text and attribute positions.
pub(crate) fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes `</` so the embedded payload cannot terminate its script
/// element.
fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/")
}
