use geo::Point;
use serde::{Serialize, Serializer};

use crate::error::{AtlasError, Result};

/// One row of the style/group table. Styling and grouping share this table;
/// the two must never diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSpec {
    pub name: &'static str,
    pub color: MarkerColor,
}

/// Category -> color table, in the order groups appear in the layer control.
/// The final row collects every category outside the styled set.
pub const GROUP_TABLE: &[GroupSpec] = &[
    GroupSpec { name: "Historical Site", color: MarkerColor::Red },
    GroupSpec { name: "Natural Wonder", color: MarkerColor::Green },
    GroupSpec { name: "Amusement Park", color: MarkerColor::Blue },
    GroupSpec { name: "Other", color: MarkerColor::Gray },
];

/// Icon name shared by every marker.
pub const MARKER_ICON: &str = "info-sign";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerColor {
    Red,
    Green,
    Blue,
    Gray,
    DarkBlue,
}

impl MarkerColor {
    /// CSS color name used verbatim by the renderer.
    pub fn css(&self) -> &'static str {
        match self {
            MarkerColor::Red => "red",
            MarkerColor::Green => "green",
            MarkerColor::Blue => "blue",
            MarkerColor::Gray => "gray",
            MarkerColor::DarkBlue => "darkblue",
        }
    }
}

/// Attraction category. Labels outside the styled set map to `Other`
/// and keep their raw text for export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    HistoricalSite,
    NaturalWonder,
    AmusementPark,
    Other(String),
}

impl Category {
    pub fn parse(label: &str) -> Category {
        match label {
            "Historical Site" => Category::HistoricalSite,
            "Natural Wonder" => Category::NaturalWonder,
            "Amusement Park" => Category::AmusementPark,
            other => Category::Other(other.to_string()),
        }
    }

    /// The label as it appears in the CSV `Type` column. Unknown labels
    /// round-trip verbatim through `Other`.
    pub fn label(&self) -> &str {
        match self {
            Category::HistoricalSite => "Historical Site",
            Category::NaturalWonder => "Natural Wonder",
            Category::AmusementPark => "Amusement Park",
            Category::Other(label) => label,
        }
    }

    /// Index of this category's row in `GROUP_TABLE`.
    pub fn group_index(&self) -> usize {
        match self {
            Category::HistoricalSite => 0,
            Category::NaturalWonder => 1,
            Category::AmusementPark => 2,
            Category::Other(_) => 3,
        }
    }

    pub fn group(&self) -> &'static GroupSpec {
        &GROUP_TABLE[self.group_index()]
    }

    pub fn color(&self) -> MarkerColor {
        self.group().color
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One point of interest. Coordinates are WGS84 degrees.
#[derive(Debug, Clone, Serialize)]
pub struct Attraction {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    #[serde(rename = "type")]
    pub category: Category,
}

impl Attraction {
    /// Range and required-field checks. NaN coordinates fail the range test.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AtlasError::ValidationError(
                "attraction has an empty name".to_string(),
            ));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(AtlasError::ValidationError(format!(
                "latitude {} out of range [-90, 90] for '{}'",
                self.latitude, self.name
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(AtlasError::ValidationError(format!(
                "longitude {} out of range [-180, 180] for '{}'",
                self.longitude, self.name
            )));
        }
        Ok(())
    }
}

/// A single map pin: position, popup markup, and table styling.
#[derive(Debug, Clone)]
pub struct Marker {
    // x = longitude, y = latitude
    pub position: Point<f64>,
    pub popup_html: String,
    pub color: MarkerColor,
    pub icon: &'static str,
}

/// A named, independently toggleable set of markers sharing one category.
#[derive(Debug, Clone)]
pub struct FeatureGroup {
    pub name: &'static str,
    pub markers: Vec<Marker>,
}

/// The built map, independent of any rendering technology: a base layer
/// center/zoom, the category groups in table order, and the one summary
/// marker that sits outside every toggle group.
#[derive(Debug, Clone)]
pub struct MapDocument {
    pub center: Point<f64>,
    pub zoom: u8,
    pub groups: Vec<FeatureGroup>,
    pub summary: Marker,
}

impl MapDocument {
    /// Category markers across all groups, excluding the summary marker.
    pub fn marker_count(&self) -> usize {
        self.groups.iter().map(|g| g.markers.len()).sum()
    }

    pub fn group(&self, name: &str) -> Option<&FeatureGroup> {
        self.groups.iter().find(|g| g.name == name)
    }
}
