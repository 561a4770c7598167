//! Integration tests for the render pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use pinmap_cli::pipeline::{RenderRequest, render, summarize_tags};
use pinmap_ingest::load_primary;
use pinmap_model::{MapConfig, PALETTE, default_cache_path};
use pinmap_render::MapSession;

const PRIMARY: &str = "name;address;tag\nOrgA;Addr1;red\nOrgB;Addr2;blue\nOrgC;Addr3;red\n";
const CACHE: &str = "address,lat,lon\nAddr1,50.0,14.0\nAddr2,49.0,13.0\n";

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn request_for(dir: &Path) -> RenderRequest {
    let data = write_file(dir, "addresses.csv", PRIMARY);
    write_file(dir, "geocode_cache.csv", CACHE);
    let config = MapConfig::default()
        .with_data_path(data.clone())
        .with_cache_path(default_cache_path(&data));
    RenderRequest {
        config,
        output_path: dir.join("map.html"),
        tags: Vec::new(),
        title: Some("Test map".to_string()),
        dry_run: false,
    }
}

#[test]
fn render_writes_page_and_reports_counts() {
    let dir = TempDir::new().unwrap();
    let request = request_for(dir.path());

    let outcome = render(&request).unwrap();
    assert_eq!(outcome.total_records, 3);
    assert_eq!(outcome.geocoded, 2);
    assert_eq!(outcome.visible, 2);
    assert!(outcome.cache_used);
    assert_eq!(outcome.selected_tags, vec!["blue", "red"]);
    assert_eq!(outcome.missing.len(), 1);
    assert_eq!(outcome.missing[0].name, "OrgC");

    let html = fs::read_to_string(outcome.output_path.unwrap()).unwrap();
    assert!(html.contains("<title>Test map</title>"));
    assert!(html.contains("deck-spec"));
    assert!(html.contains("Addresses without coordinates (1)"));
}

#[test]
fn dry_run_renders_without_writing() {
    let dir = TempDir::new().unwrap();
    let mut request = request_for(dir.path());
    request.dry_run = true;

    let outcome = render(&request).unwrap();
    assert!(outcome.output_path.is_none());
    assert!(!dir.path().join("map.html").exists());
    assert_eq!(outcome.visible, 2);
}

#[test]
fn tag_filter_narrows_points_but_not_legend() {
    let dir = TempDir::new().unwrap();
    let mut request = request_for(dir.path());
    request.tags = vec!["red".to_string()];

    let outcome = render(&request).unwrap();
    assert_eq!(outcome.selected_tags, vec!["red"]);
    assert_eq!(outcome.visible, 1);

    assert_eq!(outcome.tags.len(), 2);
    let blue = outcome.tags.iter().find(|t| t.tag == "blue").unwrap();
    assert!(!blue.selected);
    assert_eq!(blue.color, PALETTE[0]);
    let red = outcome.tags.iter().find(|t| t.tag == "red").unwrap();
    assert!(red.selected);
    assert_eq!(red.color, PALETTE[1]);
}

#[test]
fn unknown_tag_fails_listing_available() {
    let dir = TempDir::new().unwrap();
    let mut request = request_for(dir.path());
    request.tags = vec!["green".to_string()];

    let error = render(&request).unwrap_err();
    let message = error.to_string();
    assert!(message.contains("unknown tag 'green'"));
    assert!(message.contains("blue, red"));
}

#[test]
fn missing_cache_renders_empty_map() {
    let dir = TempDir::new().unwrap();
    let data = write_file(dir.path(), "addresses.csv", PRIMARY);
    let request = RenderRequest {
        config: MapConfig::default()
            .with_data_path(data.clone())
            .with_cache_path(default_cache_path(&data)),
        output_path: dir.path().join("map.html"),
        tags: Vec::new(),
        title: Some("Test map".to_string()),
        dry_run: false,
    };

    let outcome = render(&request).unwrap();
    assert!(!outcome.cache_used);
    assert_eq!(outcome.geocoded, 0);
    assert_eq!(outcome.visible, 0);
    assert_eq!(outcome.missing.len(), 3);

    let html = fs::read_to_string(outcome.output_path.unwrap()).unwrap();
    assert!(html.contains("Points displayed: 0"));
    assert!(html.contains("Addresses without coordinates (3)"));
}

#[test]
fn tag_listing_counts_rows_without_cache() {
    let dir = TempDir::new().unwrap();
    let data = write_file(dir.path(), "addresses.csv", PRIMARY);

    let config = MapConfig::default().with_data_path(data);
    let dataset = load_primary(&config).unwrap();
    let session = MapSession::new(dataset);
    let rows = summarize_tags(session.records(), session.palette(), session.selection());

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].tag, "blue");
    assert_eq!(rows[0].records, 1);
    assert!(rows[0].selected);
    assert_eq!(rows[1].tag, "red");
    assert_eq!(rows[1].records, 2);
    assert_eq!(rows[1].color, PALETTE[1]);
}

#[test]
fn nested_output_directory_is_created() {
    let dir = TempDir::new().unwrap();
    let mut request = request_for(dir.path());
    request.output_path = dir.path().join("out").join("maps").join("index.html");

    let outcome = render(&request).unwrap();
    let written = outcome.output_path.unwrap();
    assert_eq!(written, dir.path().join("out").join("maps").join("index.html"));
    assert!(written.exists());
}
