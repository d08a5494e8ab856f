use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Packed ARGB value used when a tag's color string cannot be parsed.
pub const FALLBACK_COLOR: u32 = 0xFF66_6666;

/// Represents a single taggable label.
///
/// A Tag is never mutated in place; the cache and the stores replace whole
/// collections. Identity is the `id` alone, display order is the label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    /// Display string. The remote API serializes it under `"tag"`.
    #[serde(rename = "tag")]
    pub label: String,
    /// Hex color, with or without a leading `#`.
    pub color: String,
}

impl Tag {
    pub fn new(id: i64, label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            color: color.into(),
        }
    }

    /// Resolves the color string to a packed ARGB value.
    /// Unparseable strings resolve to [`FALLBACK_COLOR`], never an error.
    pub fn color_value(&self) -> u32 {
        parse_hex_color(&self.color).unwrap_or(FALLBACK_COLOR)
    }
}

/// Accepts `RRGGBB` or `AARRGGBB`, with or without a leading `#`.
/// Six-digit values get an opaque alpha channel.
fn parse_hex_color(color: &str) -> Option<u32> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    match hex.len() {
        6 => u32::from_str_radix(hex, 16).ok().map(|v| v | 0xFF00_0000),
        8 => u32::from_str_radix(hex, 16).ok(),
        _ => None,
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Ord for Tag {
    /// Case-insensitive label order, id as tie-break for a total order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.label
            .to_lowercase()
            .cmp(&other.label.to_lowercase())
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_creation() {
        let tag = Tag::new(7, "produce", "#00ff00");
        assert_eq!(tag.id, 7);
        assert_eq!(tag.label, "produce");
        assert_eq!(tag.color, "#00ff00");
    }

    #[test]
    fn test_equality_is_id_only() {
        let a = Tag::new(1, "one", "#ff0000");
        let b = Tag::new(1, "something else", "badcolor");
        let c = Tag::new(2, "one", "#ff0000");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_natural_ordering_is_case_insensitive() {
        let mut tags = vec![
            Tag::new(1, "banana", "#ffff00"),
            Tag::new(2, "Apple", "#ff0000"),
            Tag::new(3, "cherry", "#990000"),
        ];
        tags.sort();

        let labels: Vec<&str> = tags.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_color_with_and_without_hash() {
        let with = Tag::new(1, "a", "#ff0000");
        let without = Tag::new(2, "b", "ff0000");

        assert_eq!(with.color_value(), 0xFFFF_0000);
        assert_eq!(without.color_value(), 0xFFFF_0000);
    }

    #[test]
    fn test_color_with_alpha_channel() {
        let tag = Tag::new(1, "a", "#80ff0000");
        assert_eq!(tag.color_value(), 0x80FF_0000);
    }

    #[test]
    fn test_unparseable_color_falls_back() {
        assert_eq!(Tag::new(1, "a", "not-a-color").color_value(), FALLBACK_COLOR);
        assert_eq!(Tag::new(2, "b", "").color_value(), FALLBACK_COLOR);
        assert_eq!(Tag::new(3, "c", "#12345").color_value(), FALLBACK_COLOR);
    }

    #[test]
    fn test_wire_format_uses_tag_field_name() {
        let json = r##"{"id": 4, "tag": "dairy", "color": "#0000ff"}"##;
        let tag: Tag = serde_json::from_str(json).unwrap();

        assert_eq!(tag.id, 4);
        assert_eq!(tag.label, "dairy");
        assert_eq!(tag.color, "#0000ff");
    }
}
