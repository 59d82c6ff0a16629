use crate::error::Result;
use crate::types::{
    Attraction, FeatureGroup, MapDocument, Marker, MarkerColor, GROUP_TABLE, MARKER_ICON,
};
use geo::Point;

/// Geographic center of Malaysia; centers the base layer and positions the
/// summary marker. Fixed regardless of input.
pub const ANCHOR_LAT: f64 = 4.2105;
pub const ANCHOR_LON: f64 = 101.9758;
pub const INITIAL_ZOOM: u8 = 6;

fn anchor() -> Point<f64> {
    Point::new(ANCHOR_LON, ANCHOR_LAT)
}

/// Build the map structure for an ordered set of attractions: one marker
/// per record in its category's group, every group from the table present
/// (empty or not) in table order, plus the summary marker at the anchor.
///
/// Pure and side-effect free; validation failures abort before any part of
/// the structure is returned.
pub fn build_map(attractions: &[Attraction]) -> Result<MapDocument> {
    for attraction in attractions {
        attraction.validate()?;
    }

    let mut groups: Vec<FeatureGroup> = GROUP_TABLE
        .iter()
        .map(|spec| FeatureGroup {
            name: spec.name,
            markers: Vec::new(),
        })
        .collect();

    for attraction in attractions {
        let marker = Marker {
            position: Point::new(attraction.longitude, attraction.latitude),
            popup_html: format!(
                "<b>{}</b><br>{}",
                attraction.name, attraction.description
            ),
            color: attraction.category.color(),
            icon: MARKER_ICON,
        };
        groups[attraction.category.group_index()].markers.push(marker);
    }

    let summary = Marker {
        position: anchor(),
        popup_html: format!("<b>Total Attractions:</b> {}", attractions.len()),
        color: MarkerColor::DarkBlue,
        icon: MARKER_ICON,
    };

    Ok(MapDocument {
        center: anchor(),
        zoom: INITIAL_ZOOM,
        groups,
        summary,
    })
}
