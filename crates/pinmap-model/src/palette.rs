use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// An RGBA color as consumed by the map layer: serializes to a JSON
/// array `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    /// Hex form of the opaque RGB part (`#rrggbb`), as used for legend
    /// swatches. Alpha is intentionally excluded.
    pub fn hex(&self) -> String {
        format!("#{}", hex::encode([self.0, self.1, self.2]))
    }

    /// The RGB channels without alpha.
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.0, self.1, self.2)
    }
}

/// Fixed marker palette. Tags are assigned these colors in sorted
/// order; past the eleventh tag the palette is reused cyclically.
pub const PALETTE: [Rgba; 11] = [
    Rgba(200, 30, 0, 160),
    Rgba(0, 120, 200, 160),
    Rgba(0, 180, 60, 160),
    Rgba(255, 140, 0, 160),
    Rgba(160, 0, 200, 160),
    Rgba(255, 215, 0, 160),
    Rgba(0, 200, 200, 160),
    Rgba(120, 0, 0, 160),
    Rgba(0, 0, 120, 160),
    Rgba(0, 120, 0, 160),
    Rgba(120, 120, 120, 160),
];

/// Palette color for a position in the sorted tag list. Pure cycle:
/// positions 11 and up reuse colors with period 11.
pub const fn color_for_index(index: usize) -> Rgba {
    PALETTE[index % PALETTE.len()]
}

/// Deterministic tag-to-color assignment for one session.
///
/// Built from the distinct non-null tags of the full record set, never
/// from a filtered subset, so colors stay stable while the visible
/// selection changes. Tags are sorted lexicographically before
/// assignment; rebuilding from the same tag set in any input order
/// yields the same mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPalette {
    colors: BTreeMap<String, Rgba>,
}

impl TagPalette {
    /// Builds the assignment from an arbitrary iterator of tag values.
    /// Duplicates collapse; input order is irrelevant.
    pub fn build<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sorted: BTreeSet<String> = tags.into_iter().map(Into::into).collect();
        let colors = sorted
            .into_iter()
            .enumerate()
            .map(|(index, tag)| (tag, color_for_index(index)))
            .collect();
        Self { colors }
    }

    /// Color assigned to a tag, if the tag was present at build time.
    pub fn color_for(&self, tag: &str) -> Option<Rgba> {
        self.colors.get(tag).copied()
    }

    /// Tag values in assignment (sorted) order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }

    /// `(tag, color)` pairs in assignment order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Rgba)> {
        self.colors.iter().map(|(tag, color)| (tag.as_str(), *color))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_encodes_rgb_without_alpha() {
        assert_eq!(Rgba(200, 30, 0, 160).hex(), "#c81e00");
        assert_eq!(Rgba(0, 120, 200, 160).hex(), "#0078c8");
        assert_eq!(Rgba(255, 215, 0, 160).hex(), "#ffd700");
    }

    #[test]
    fn palette_entries_are_distinct() {
        for (i, a) in PALETTE.iter().enumerate() {
            for b in PALETTE.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn build_assigns_colors_in_sorted_order() {
        let palette = TagPalette::build(vec!["red", "blue", "red"]);
        assert_eq!(palette.len(), 2);
        // "blue" sorts before "red"
        assert_eq!(palette.color_for("blue"), Some(PALETTE[0]));
        assert_eq!(palette.color_for("red"), Some(PALETTE[1]));
        assert_eq!(palette.color_for("green"), None);
    }

    #[test]
    fn build_is_input_order_independent() {
        let forward = TagPalette::build(vec!["a", "b", "c"]);
        let backward = TagPalette::build(vec!["c", "b", "a"]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn eleven_tags_get_distinct_colors() {
        let tags: Vec<String> = (0..11).map(|i| format!("tag{i:02}")).collect();
        let palette = TagPalette::build(tags.clone());
        let mut seen = std::collections::BTreeSet::new();
        for tag in &tags {
            let color = palette.color_for(tag).expect("tag assigned");
            assert!(seen.insert(color.hex()), "color reused below 12 tags");
        }
    }

    #[test]
    fn thirteen_tags_cycle_with_period_eleven() {
        // Sorted tags A..M; index 11 wraps to palette entry 0.
        let tags: Vec<String> = ('A'..='M').map(String::from).collect();
        assert_eq!(tags.len(), 13);
        let palette = TagPalette::build(tags);
        assert_eq!(palette.color_for("A"), palette.color_for("L"));
        assert_eq!(palette.color_for("B"), palette.color_for("M"));
        assert_ne!(palette.color_for("A"), palette.color_for("B"));
    }

    #[test]
    fn entries_iterate_in_sorted_order() {
        let palette = TagPalette::build(vec!["c", "a", "b"]);
        let tags: Vec<&str> = palette.entries().map(|(tag, _)| tag).collect();
        assert_eq!(tags, vec!["a", "b", "c"]);
    }
}
