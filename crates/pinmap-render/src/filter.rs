//! Visible-point and missing-row computation.

use std::collections::BTreeSet;

use serde::Serialize;

use pinmap_model::{AddressRecord, Rgba, TagPalette};

/// The user's tag filter: which categories to show.
///
/// Only tags observed in the dataset are selectable; rows without a
/// tag can never match a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    selected: BTreeSet<String>,
}

impl TagSelection {
    /// Selection covering every tag the palette knows.
    pub fn all(palette: &TagPalette) -> Self {
        Self {
            selected: palette.tags().map(String::from).collect(),
        }
    }

    /// Selection from explicit tag values.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.selected.contains(tag)
    }

    /// Selected tags in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// One renderable marker: a record with a selected tag and both
/// coordinates known, annotated with its palette color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlottedPoint {
    pub name: String,
    pub address: String,
    pub tag: String,
    pub lat: f64,
    pub lon: f64,
    pub color: Rgba,
}

/// Computes the visible point set for a selection.
///
/// A record is visible only when its tag is present, selected, and
/// both coordinates are known. The palette is the session-wide one
/// built from the full tag set, so colors do not shift as the
/// selection changes.
pub fn visible_points(
    records: &[AddressRecord],
    palette: &TagPalette,
    selection: &TagSelection,
) -> Vec<PlottedPoint> {
    records
        .iter()
        .filter_map(|record| {
            let tag = record.tag.as_deref()?;
            if !selection.contains(tag) {
                return None;
            }
            let lat = record.lat?;
            let lon = record.lon?;
            let color = palette.color_for(tag)?;
            Some(PlottedPoint {
                name: record.name.clone(),
                address: record.address.clone(),
                tag: tag.to_string(),
                lat,
                lon,
                color,
            })
        })
        .collect()
}

/// Rows that could not be geocoded, always computed from the full
/// record set, never the filtered one.
pub fn missing_rows(records: &[AddressRecord]) -> Vec<AddressRecord> {
    records
        .iter()
        .filter(|record| !record.has_coordinates())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(address: &str, tag: Option<&str>, lat: Option<f64>, lon: Option<f64>) -> AddressRecord {
        AddressRecord {
            name: format!("Org {address}"),
            address: address.to_string(),
            tag: tag.map(String::from),
            lat,
            lon,
        }
    }

    fn sample_records() -> Vec<AddressRecord> {
        vec![
            record("Addr1", Some("red"), Some(50.0), Some(14.0)),
            record("Addr2", Some("blue"), Some(49.0), Some(13.0)),
            record("Addr3", Some("red"), None, None),
            record("Addr4", None, Some(48.0), Some(12.0)),
            record("Addr5", Some("blue"), Some(47.0), None),
        ]
    }

    #[test]
    fn visible_requires_selected_tag_and_both_coordinates() {
        let records = sample_records();
        let palette = TagPalette::build(vec!["red", "blue"]);
        let selection = TagSelection::from_tags(vec!["red"]);

        let points = visible_points(&records, &palette, &selection);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].address, "Addr1");
        assert_eq!(points[0].lat, 50.0);
        assert_eq!(points[0].lon, 14.0);
        assert_eq!(Some(points[0].color), palette.color_for("red"));
    }

    #[test]
    fn untagged_rows_are_never_visible() {
        let records = sample_records();
        let palette = TagPalette::build(vec!["red", "blue"]);
        let selection = TagSelection::all(&palette);

        let points = visible_points(&records, &palette, &selection);
        assert!(points.iter().all(|p| p.address != "Addr4"));
    }

    #[test]
    fn partial_coordinates_are_not_visible() {
        let records = sample_records();
        let palette = TagPalette::build(vec!["red", "blue"]);
        let selection = TagSelection::all(&palette);

        let points = visible_points(&records, &palette, &selection);
        let addresses: Vec<&str> = points.iter().map(|p| p.address.as_str()).collect();
        assert_eq!(addresses, vec!["Addr1", "Addr2"]);
    }

    #[test]
    fn empty_selection_yields_no_points() {
        let records = sample_records();
        let palette = TagPalette::build(vec!["red", "blue"]);
        let selection = TagSelection::default();

        assert!(visible_points(&records, &palette, &selection).is_empty());
    }

    #[test]
    fn missing_rows_ignore_selection() {
        let records = sample_records();
        let missing = missing_rows(&records);
        let addresses: Vec<&str> = missing.iter().map(|r| r.address.as_str()).collect();
        // Addr3 has no coordinates, Addr5 has only latitude.
        assert_eq!(addresses, vec!["Addr3", "Addr5"]);
    }

    #[test]
    fn selection_tags_are_sorted() {
        let selection = TagSelection::from_tags(vec!["red", "blue"]);
        let tags: Vec<&str> = selection.tags().collect();
        assert_eq!(tags, vec!["blue", "red"]);
        assert_eq!(selection.len(), 2);
        assert!(!selection.is_empty());
    }
}
