//! Status-to-color palette for vehicle markers.
//!
//! The status vocabulary is open: the store of record grows statuses without
//! coordinating releases, so the palette is the only closed table and the
//! lookup is total. Any status not in the table gets the fallback color.

use serde::{Deserialize, Serialize};

/// An RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Creates a color from components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Color applied to any status absent from the palette.
pub const FALLBACK_COLOR: Rgb = Rgb::new(0xFF, 0xFF, 0x33);

/// Fixed status palette.
const STATUS_COLORS: &[(&str, Rgb)] = &[
    ("in repair", Rgb::new(0xFF, 0x57, 0x33)),
    ("awaiting parts", Rgb::new(0x33, 0xA8, 0xFF)),
    ("ready for pickup", Rgb::new(0x33, 0xFF, 0x57)),
    ("diagnostics", Rgb::new(0xFF, 0x33, 0xA8)),
    ("maintenance", Rgb::new(0xA8, 0x33, 0xFF)),
    ("wash", Rgb::new(0xFF, 0x57, 0x33)),
    ("undiagnosed", Rgb::new(0xFF, 0xFF, 0x33)),
    ("electrical", Rgb::new(0x33, 0xA8, 0xFF)),
    ("inspection", Rgb::new(0x33, 0xFF, 0xFF)),
    ("hydraulics", Rgb::new(0xFF, 0x83, 0x33)),
];

/// Returns the display color for a status.
///
/// Never fails: unknown statuses map to [`FALLBACK_COLOR`].
pub fn color_for_status(status: &str) -> Rgb {
    STATUS_COLORS
        .iter()
        .find(|(name, _)| *name == status)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

/// Returns the known statuses in palette order, for UI pickers.
pub fn known_statuses() -> impl Iterator<Item = &'static str> {
    STATUS_COLORS.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_status_colors() {
        assert_eq!(color_for_status("in repair"), Rgb::new(0xFF, 0x57, 0x33));
        assert_eq!(color_for_status("awaiting parts"), Rgb::new(0x33, 0xA8, 0xFF));
        assert_eq!(color_for_status("ready for pickup"), Rgb::new(0x33, 0xFF, 0x57));
    }

    #[test]
    fn test_unknown_status_falls_back() {
        assert_eq!(color_for_status("combusted"), FALLBACK_COLOR);
        assert_eq!(color_for_status(""), FALLBACK_COLOR);
    }

    #[test]
    fn test_palette_is_complete() {
        for status in known_statuses() {
            // Every listed status resolves to its own entry, not the scan default.
            assert_eq!(
                color_for_status(status),
                STATUS_COLORS
                    .iter()
                    .find(|(name, _)| *name == status)
                    .unwrap()
                    .1
            );
        }
    }
}
