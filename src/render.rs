use crate::config::PageConfig;
use crate::export::CSV_FILE_NAME;
use crate::types::{MapDocument, Marker};

// Pinned CDN assets; the generated page is otherwise self-contained.
const LEAFLET_CSS: &str = "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css";
const LEAFLET_JS: &str = "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js";

const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

const MAP_STYLE: &str = r#"    html, body, #map { height: 100%; margin: 0; }
    .attraction-pin {
      width: 22px;
      height: 22px;
      border-radius: 50%;
      border: 2px solid #fff;
      box-shadow: 0 1px 4px rgba(0, 0, 0, 0.4);
      color: #fff;
      font: bold 13px/18px sans-serif;
      text-align: center;
    }"#;

const PIN_HELPER: &str = r#"function pin(color, glyph) {
  return L.divIcon({
    className: '',
    html: '<div class="attraction-pin" style="background: ' + color + '">' + glyph + '</div>',
    iconSize: [22, 22],
    iconAnchor: [11, 11],
    popupAnchor: [0, -11]
  });
}
"#;

const DASHBOARD_STYLE: &str = r#"    body { font-family: sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; color: #222; }
    h1 { font-size: 1.6rem; }
    .download { display: inline-block; margin-bottom: 1rem; padding: 0.5rem 1rem; border-radius: 4px; background: #2d6cdf; color: #fff; text-decoration: none; }
    iframe { border: 1px solid #ccc; }"#;

/// Render the map structure to a self-contained Leaflet page. Only reads
/// the structure; every Leaflet-specific detail lives here.
pub fn render_map_html(doc: &MapDocument) -> String {
    let mut script = String::new();
    script.push_str(PIN_HELPER);
    script.push_str(&format!(
        "var map = L.map('map').setView([{}, {}], {});\n",
        doc.center.y(),
        doc.center.x(),
        doc.zoom
    ));
    script.push_str(&format!(
        "L.tileLayer('{}', {{ maxZoom: 19, attribution: '{}' }}).addTo(map);\n",
        OSM_TILE_URL, OSM_ATTRIBUTION
    ));

    for (i, group) in doc.groups.iter().enumerate() {
        script.push_str(&format!("var group{} = L.layerGroup();\n", i));
        for marker in &group.markers {
            script.push_str(&marker_js(marker, &format!("group{}", i)));
        }
        script.push_str(&format!("group{}.addTo(map);\n", i));
    }

    // Overlay entries keep the group table order.
    script.push_str("var overlays = {\n");
    for (i, group) in doc.groups.iter().enumerate() {
        script.push_str(&format!("  '{}': group{},\n", js_escape(group.name), i));
    }
    script.push_str("};\n");
    script.push_str("L.control.layers(null, overlays, { collapsed: false }).addTo(map);\n");

    // The summary marker goes straight onto the map, outside every toggle
    // group.
    script.push_str(&marker_js(&doc.summary, "map"));

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Attractions Map</title>
  <link rel="stylesheet" href="{leaflet_css}">
  <script src="{leaflet_js}"></script>
  <style>
{style}
  </style>
</head>
<body>
  <div id="map"></div>
  <script>
{script}  </script>
</body>
</html>
"#,
        leaflet_css = LEAFLET_CSS,
        leaflet_js = LEAFLET_JS,
        style = MAP_STYLE,
        script = script,
    )
}

/// The dashboard page: title, intro line, CSV download affordance, and the
/// map embedded at the configured size (700x500 unless overridden).
pub fn render_dashboard_html(page: &PageConfig, map_src: &str, csv_href: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>
{style}
  </style>
</head>
<body>
  <h1>{title}</h1>
  <p>{intro}</p>
  <p><a class="download" href="{csv_href}" download="{csv_name}">Download Attractions CSV</a></p>
  <iframe src="{map_src}" width="{width}" height="{height}" title="{title}"></iframe>
</body>
</html>
"#,
        title = html_escape(&page.title),
        intro = html_escape(&page.intro),
        style = DASHBOARD_STYLE,
        csv_href = csv_href,
        csv_name = CSV_FILE_NAME,
        map_src = map_src,
        width = page.map_width,
        height = page.map_height,
    )
}

fn marker_js(marker: &Marker, target: &str) -> String {
    format!(
        "L.marker([{}, {}], {{ icon: pin('{}', '{}') }}).bindPopup('{}').addTo({});\n",
        marker.position.y(),
        marker.position.x(),
        marker.color.css(),
        icon_glyph(marker.icon),
        js_escape(&marker.popup_html),
        target
    )
}

/// Marker icon names map onto HTML glyphs shown inside the pin.
fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "info-sign" => "&#9432;",
        _ => "&#8226;",
    }
}

/// Escape a string for a single-quoted JS literal inside a <script> block.
/// `</` must not appear verbatim or the browser would end the script early.
fn js_escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace("</", "<\\/")
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_map;
    use crate::data::builtin_attractions;

    fn sample_doc() -> MapDocument {
        build_map(&builtin_attractions()).unwrap()
    }

    #[test]
    fn map_page_centers_on_anchor_with_initial_zoom() {
        let html = render_map_html(&sample_doc());
        assert!(html.contains("L.map('map').setView([4.2105, 101.9758], 6);"));
    }

    #[test]
    fn map_page_declares_all_groups_in_table_order() {
        let html = render_map_html(&sample_doc());
        let overlays = [
            "'Historical Site': group0",
            "'Natural Wonder': group1",
            "'Amusement Park': group2",
            "'Other': group3",
        ];
        let mut last = 0;
        for entry in overlays {
            let pos = html.find(entry).unwrap_or_else(|| panic!("missing {}", entry));
            assert!(pos > last);
            last = pos;
        }
        assert!(html.contains("L.control.layers(null, overlays"));
    }

    #[test]
    fn markers_carry_position_color_and_popup() {
        let html = render_map_html(&sample_doc());
        assert!(html.contains("L.marker([3.1579, 101.7118], { icon: pin('red', '&#9432;') })"));
        assert!(html.contains("pin('green'"));
        assert!(html.contains("pin('blue'"));
        assert!(html.contains("<b>Batu Caves<\\/b><br>"));
    }

    #[test]
    fn summary_marker_is_outside_toggle_groups() {
        let html = render_map_html(&sample_doc());
        assert!(html.contains(
            ".bindPopup('<b>Total Attractions:<\\/b> 6').addTo(map);"
        ));
        assert!(html.contains("pin('darkblue'"));
    }

    #[test]
    fn popup_apostrophes_are_escaped() {
        let html = render_map_html(&sample_doc());
        assert!(html.contains("world\\'s oldest tropical rainforests"));
    }

    #[test]
    fn empty_map_still_renders_groups_and_summary() {
        let doc = build_map(&[]).unwrap();
        let html = render_map_html(&doc);
        assert!(html.contains("'Other': group3"));
        assert!(html.contains("<b>Total Attractions:<\\/b> 0"));
        assert!(!html.contains("pin('red'"));
    }

    #[test]
    fn dashboard_embeds_map_and_download_link() {
        let page = PageConfig {
            title: "Malaysia Tourist Attractions Map".to_string(),
            intro: "Explore the tourist attractions across Malaysia.".to_string(),
            map_width: 700,
            map_height: 500,
        };
        let html = render_dashboard_html(&page, "/map", "/attractions.csv");
        assert!(html.contains("<h1>Malaysia Tourist Attractions Map</h1>"));
        assert!(html.contains(r#"<iframe src="/map" width="700" height="500""#));
        assert!(html.contains(r#"href="/attractions.csv" download="malaysia_tourist_attractions.csv""#));
        assert!(html.contains(">Download Attractions CSV</a>"));
    }

    #[test]
    fn dashboard_escapes_page_text() {
        let page = PageConfig {
            title: "K&L <Tours>".to_string(),
            intro: String::new(),
            map_width: 700,
            map_height: 500,
        };
        let html = render_dashboard_html(&page, "map.html", "attractions.csv");
        assert!(html.contains("<h1>K&amp;L &lt;Tours&gt;</h1>"));
    }
}
