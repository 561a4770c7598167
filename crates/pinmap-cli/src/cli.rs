//! CLI argument definitions for the address map renderer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "pinmap",
    version,
    about = "pinmap - Render tagged addresses from CSV as an interactive map page",
    long_about = "Render a semicolon separated address table as a standalone HTML map.\n\n\
                  Coordinates come from an optional geocode cache CSV written by the\n\
                  companion geocoder. Each distinct tag gets a fixed palette color and\n\
                  rows without coordinates are listed below the map."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render an address table to an HTML map page.
    Render(RenderArgs),

    /// List the distinct tags of an address table with their colors.
    Tags(TagsArgs),
}

#[derive(Parser)]
pub struct RenderArgs {
    /// Path to the address table (semicolon separated by default).
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Geocode cache CSV (default: geocode_cache.csv next to DATA).
    #[arg(long = "cache", value_name = "PATH")]
    pub cache: Option<PathBuf>,

    /// Output HTML file (default: map.html).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Show only this tag; repeat the flag to show several.
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Field delimiter of the address table.
    #[arg(long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Column holding the display name.
    #[arg(long = "name-column", value_name = "COLUMN")]
    pub name_column: Option<String>,

    /// Column holding the address used as the geocode join key.
    #[arg(long = "address-column", value_name = "COLUMN")]
    pub address_column: Option<String>,

    /// Column holding the category tag.
    #[arg(long = "tag-column", value_name = "COLUMN")]
    pub tag_column: Option<String>,

    /// Page title (default: a dated heading).
    #[arg(long = "title", value_name = "TITLE")]
    pub title: Option<String>,

    /// Load and report without writing the HTML page.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct TagsArgs {
    /// Path to the address table (semicolon separated by default).
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Field delimiter of the address table.
    #[arg(long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Column holding the display name.
    #[arg(long = "name-column", value_name = "COLUMN")]
    pub name_column: Option<String>,

    /// Column holding the address used as the geocode join key.
    #[arg(long = "address-column", value_name = "COLUMN")]
    pub address_column: Option<String>,

    /// Column holding the category tag.
    #[arg(long = "tag-column", value_name = "COLUMN")]
    pub tag_column: Option<String>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
