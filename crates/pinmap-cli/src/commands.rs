use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use comfy_table::{Cell, Table};

use pinmap_ingest::load_primary;
use pinmap_model::{MapConfig, default_cache_path};
use pinmap_render::MapSession;

use crate::cli::{RenderArgs, TagsArgs};
use crate::pipeline::{RenderOutcome, RenderRequest, render, summarize_tags};
use crate::summary::{apply_table_style, swatch_cell};

pub fn run_render(args: &RenderArgs) -> Result<RenderOutcome> {
    let request = RenderRequest {
        config: render_config(args)?,
        output_path: args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from("map.html")),
        tags: args.tags.clone(),
        title: args.title.clone(),
        dry_run: args.dry_run,
    };
    render(&request)
}

pub fn run_tags(args: &TagsArgs) -> Result<()> {
    let mut config = MapConfig::default().with_data_path(args.data.clone());
    apply_table_overrides(
        &mut config,
        args.delimiter,
        args.name_column.as_deref(),
        args.address_column.as_deref(),
        args.tag_column.as_deref(),
    )?;

    let dataset = load_primary(&config).context("load address data")?;
    let session = MapSession::new(dataset);
    let rows = summarize_tags(session.records(), session.palette(), session.selection());
    if rows.is_empty() {
        println!("No tags in {}", config.data_path.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Tag", "Color", "Records"]);
    apply_table_style(&mut table);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.tag),
            swatch_cell(row.color),
            Cell::new(row.records),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn render_config(args: &RenderArgs) -> Result<MapConfig> {
    let mut config = MapConfig::default()
        .with_data_path(args.data.clone())
        .with_cache_path(
            args.cache
                .clone()
                .unwrap_or_else(|| default_cache_path(&args.data)),
        );
    apply_table_overrides(
        &mut config,
        args.delimiter,
        args.name_column.as_deref(),
        args.address_column.as_deref(),
        args.tag_column.as_deref(),
    )?;
    Ok(config)
}

fn apply_table_overrides(
    config: &mut MapConfig,
    delimiter: Option<char>,
    name: Option<&str>,
    address: Option<&str>,
    tag: Option<&str>,
) -> Result<()> {
    if let Some(delimiter) = delimiter {
        ensure!(
            delimiter.is_ascii(),
            "delimiter must be a single ASCII character, got '{delimiter}'"
        );
        config.delimiter = delimiter as u8;
    }
    if let Some(name) = name {
        config.name_column = name.to_string();
    }
    if let Some(address) = address {
        config.address_column = address.to_string();
    }
    if let Some(tag) = tag {
        config.tag_column = tag.to_string();
    }
    Ok(())
}
