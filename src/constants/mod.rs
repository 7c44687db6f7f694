//! Constants used throughout the extractor

pub mod signatures;
pub mod input_type;
pub mod widgets;

/// Caller-visible id of an element without a declared identity
pub const MISSING_UI_ID: i32 = -1;

/// Separator placed between the non-blank text attributes of a widget
pub const TEXT_SEPARATOR: &str = "\u{1E}";
