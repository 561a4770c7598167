//! End-to-end render pipeline: load, select, snapshot, write.
//!
//! One invocation runs the stages of a single viewing session in
//! order. The dataset is loaded and merged once, the tag selection is
//! applied to the session, and one view snapshot is rendered to a
//! standalone HTML page.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use pinmap_ingest::load_dataset;
use pinmap_model::{AddressRecord, MapConfig, Rgba, TagPalette};
use pinmap_render::{MapPageOptions, MapSession, TagSelection, render_map_page, write_map_page};

/// One render invocation: where to read, what to show, where to write.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub config: MapConfig,
    /// Output HTML path.
    pub output_path: PathBuf,
    /// Tags to show; empty selects every tag.
    pub tags: Vec<String>,
    /// Page title override; `None` uses the dated default.
    pub title: Option<String>,
    /// Skip the final write.
    pub dry_run: bool,
}

/// What one render did, for the terminal summary.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub data_path: PathBuf,
    /// Written page; `None` on a dry run.
    pub output_path: Option<PathBuf>,
    pub cache_used: bool,
    pub total_records: usize,
    pub geocoded: usize,
    pub visible: usize,
    /// The selection the points were computed for, sorted.
    pub selected_tags: Vec<String>,
    /// Per-tag legend rows in palette order.
    pub tags: Vec<TagSummary>,
    /// Rows without coordinates.
    pub missing: Vec<AddressRecord>,
    pub duplicate_addresses: usize,
    pub empty_addresses: usize,
}

/// One tag with its palette color, dataset count, and selection state.
#[derive(Debug, Clone)]
pub struct TagSummary {
    pub tag: String,
    pub color: Rgba,
    pub records: usize,
    pub selected: bool,
}

/// Runs the full pipeline for one request.
pub fn render(request: &RenderRequest) -> Result<RenderOutcome> {
    let span = info_span!("render", data = %request.config.data_path.display());
    let _guard = span.enter();
    let start = Instant::now();

    // ========================================================================
    // Stage 1: Load - primary table plus geocode cache merge
    // ========================================================================
    let dataset = load_dataset(&request.config).context("load address data")?;
    let cache_used = dataset.cache_used;
    let duplicate_addresses = dataset.duplicate_addresses;
    let empty_addresses = dataset.empty_addresses;
    let total_records = dataset.len();
    let geocoded = dataset.geocoded_count();

    // ========================================================================
    // Stage 2: Select - palette assignment and tag filter
    // ========================================================================
    let mut session = MapSession::new(dataset);
    if !request.tags.is_empty() {
        apply_tag_filter(&mut session, &request.tags)?;
    }
    let view = session.snapshot();
    info!(
        visible = view.visible_count(),
        missing = view.missing.len(),
        selected = view.selected_tags.len(),
        "selection applied"
    );

    // ========================================================================
    // Stage 3: Write - render the page and put it on disk
    // ========================================================================
    let mut options = MapPageOptions::default();
    if let Some(title) = &request.title {
        options = options.with_title(title.clone());
    }
    let html = render_map_page(&view, &request.config, &options)?;
    let output_path = if request.dry_run {
        info!(output = %request.output_path.display(), "dry run, page not written");
        None
    } else {
        let written = write_map_page(&request.output_path, &html)?;
        info!(output = %written.display(), bytes = html.len(), "map page written");
        Some(written)
    };

    let tags = summarize_tags(session.records(), session.palette(), session.selection());
    info!(
        records = total_records,
        visible = view.visible_count(),
        duration_ms = start.elapsed().as_millis(),
        "render complete"
    );
    Ok(RenderOutcome {
        data_path: request.config.data_path.clone(),
        output_path,
        cache_used,
        total_records,
        geocoded,
        visible: view.visible_count(),
        selected_tags: view.selected_tags,
        tags,
        missing: view.missing,
        duplicate_addresses,
        empty_addresses,
    })
}

/// Narrows the session to the given tags; an unknown tag is an error.
pub fn apply_tag_filter(session: &mut MapSession, tags: &[String]) -> Result<()> {
    let available = session.available_tags();
    for tag in tags {
        if !available.iter().any(|known| known == tag) {
            bail!("unknown tag '{tag}' (available: {})", available.join(", "));
        }
    }
    session.set_selection(TagSelection::from_tags(tags.iter().cloned()));
    Ok(())
}

/// Per-tag rows for the terminal legend: palette color, record count,
/// and whether the tag is currently selected.
pub fn summarize_tags(
    records: &[AddressRecord],
    palette: &TagPalette,
    selection: &TagSelection,
) -> Vec<TagSummary> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        if let Some(tag) = record.tag.as_deref() {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }
    palette
        .entries()
        .map(|(tag, color)| TagSummary {
            tag: tag.to_string(),
            color,
            records: counts.get(tag).copied().unwrap_or(0),
            selected: selection.contains(tag),
        })
        .collect()
}
