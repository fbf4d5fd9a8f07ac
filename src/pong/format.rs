//! Cup formats and their static catalog.
//!
//! Every format a side can be racked in is listed here exactly once,
//! together with its cup-count limits and its visual layout. Layouts are
//! ordered rows of cup labels as the opponent sees them (far row first).

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{instrument, warn};

/// A cup formation.
///
/// Serialized using the wire names the scoring server stores
/// (`"Piramide"`, `"Rombo"`, ...). Unknown names deserialize to
/// [`Format::Pyramid`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
#[serde(from = "String", into = "&'static str")]
pub enum Format {
    /// Classic six-cup pyramid; legal for any cup count.
    #[default]
    Pyramid,
    /// Four-cup diamond.
    Diamond,
    /// Three-cup triangle.
    Triangle,
    /// Two cups, one behind the other.
    VerticalLine,
    /// Two cups side by side.
    HorizontalLine,
    /// One cup in the middle of the table.
    SingleCenter,
}

/// Inclusive cup-count bounds for a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatLimits {
    /// Fewest cups the format may be used with.
    pub min_cups: u32,
    /// Most cups the format may be used with.
    pub max_cups: u32,
}

impl FormatLimits {
    /// Returns true if `cup_count` lies within the bounds.
    pub fn contains(&self, cup_count: u32) -> bool {
        (self.min_cups..=self.max_cups).contains(&cup_count)
    }
}

/// Ordered rows of cup labels.
pub type Layout = &'static [&'static [&'static str]];

const PYRAMID: Layout = &[&["3 Sx", "3 Cen", "3 Dx"], &["2 Sx", "2 Dx"], &["1 Cen"]];
const DIAMOND: Layout = &[&["R3 Cen"], &["R2 Sx", "R2 Dx"], &["R1 Cen"]];
const TRIANGLE: Layout = &[&["T2 Sx", "T2 Dx"], &["T1 Cen"]];
const VERTICAL_LINE: Layout = &[&["LV 2"], &["LV 1"]];
const HORIZONTAL_LINE: Layout = &[&["LO Sx", "LO Dx"]];
const SINGLE_CENTER: Layout = &[&["Singolo"]];

impl Format {
    /// All formats in catalog order.
    pub fn all() -> impl Iterator<Item = Format> {
        <Format as strum::IntoEnumIterator>::iter()
    }

    /// Name used by the scoring server.
    pub fn wire_name(self) -> &'static str {
        match self {
            Format::Pyramid => "Piramide",
            Format::Diamond => "Rombo",
            Format::Triangle => "Triangolo",
            Format::VerticalLine => "Linea Verticale",
            Format::HorizontalLine => "Linea Orizzontale",
            Format::SingleCenter => "Singolo Centrale",
        }
    }

    /// Label shown in the format menu.
    pub fn display_name(self) -> &'static str {
        match self {
            Format::SingleCenter => "Singolo ⏺",
            other => other.wire_name(),
        }
    }

    /// Parses a server format name, falling back to [`Format::Pyramid`].
    #[instrument]
    pub fn from_wire(name: &str) -> Format {
        name.parse().unwrap_or_else(|_| {
            warn!(name, "Unknown format, using Piramide layout");
            Format::Pyramid
        })
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A format name that is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Unknown cup format: {}", _0)]
pub struct UnknownFormat(pub String);

impl std::error::Error for UnknownFormat {}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Format::all()
            .find(|f| f.wire_name() == trimmed)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

impl From<String> for Format {
    fn from(name: String) -> Self {
        Format::from_wire(&name)
    }
}

impl From<Format> for &'static str {
    fn from(format: Format) -> Self {
        format.wire_name()
    }
}

/// Static registry of layouts and limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatCatalog;

impl FormatCatalog {
    /// Rows of cup labels for a format, far row first.
    pub fn layout_for(format: Format) -> Layout {
        match format {
            Format::Pyramid => PYRAMID,
            Format::Diamond => DIAMOND,
            Format::Triangle => TRIANGLE,
            Format::VerticalLine => VERTICAL_LINE,
            Format::HorizontalLine => HORIZONTAL_LINE,
            Format::SingleCenter => SINGLE_CENTER,
        }
    }

    /// Layout for a server format name; unknown names get the pyramid.
    pub fn layout_for_name(name: &str) -> Layout {
        Self::layout_for(Format::from_wire(name))
    }

    /// Cup-count limits for a format.
    pub fn limits_for(format: Format) -> FormatLimits {
        let (min_cups, max_cups) = match format {
            Format::Pyramid => (1, 6),
            Format::Diamond => (4, 4),
            Format::Triangle => (3, 3),
            Format::VerticalLine | Format::HorizontalLine => (2, 2),
            Format::SingleCenter => (1, 1),
        };
        FormatLimits { min_cups, max_cups }
    }

    /// Flattened cup labels of a format in layout order.
    pub fn cup_names(format: Format) -> impl Iterator<Item = &'static str> {
        Self::layout_for(format).iter().flat_map(|row| row.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip_through_from_str() {
        for format in Format::all() {
            assert_eq!(format.wire_name().parse::<Format>(), Ok(format));
        }
    }

    #[test]
    fn test_unknown_name_falls_back_to_pyramid() {
        assert_eq!(Format::from_wire("Casa"), Format::Pyramid);
        assert!("Casa".parse::<Format>().is_err());
        assert_eq!(FormatCatalog::layout_for_name("Casa"), PYRAMID);
    }

    #[test]
    fn test_layout_sizes_match_max_cups() {
        for format in Format::all() {
            let cups = FormatCatalog::cup_names(format).count() as u32;
            assert_eq!(cups, FormatCatalog::limits_for(format).max_cups, "{format:?}");
        }
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&Format::VerticalLine).unwrap();
        assert_eq!(json, "\"Linea Verticale\"");
        let back: Format = serde_json::from_str("\"Rombo\"").unwrap();
        assert_eq!(back, Format::Diamond);
        let unknown: Format = serde_json::from_str("\"Albero\"").unwrap();
        assert_eq!(unknown, Format::Pyramid);
    }
}
