//! Label field parsing.
//!
//! The form edits labels as one raw string such as `"ops; backup"`; accounts
//! store them as a list of `LabelItem`s.

use crate::types::LabelItem;

/// Separator between label items in the raw form value.
pub const LABEL_SEPARATOR: char = ';';

/// Parses a raw label string into label items.
///
/// Segments are split on `;`, trimmed, and empty segments are dropped. Order
/// is preserved and duplicates are kept.
pub fn parse_label(raw: &str) -> Vec<LabelItem> {
    raw.split(LABEL_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(LabelItem::new)
        .collect()
}

/// Renders label items back into the raw form value.
pub fn format_label(items: &[LabelItem]) -> String {
    items
        .iter()
        .map(|item| item.text.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
