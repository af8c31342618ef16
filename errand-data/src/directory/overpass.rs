//! Overpass QL queries and JSON response types.
//!
//! See: <https://wiki.openstreetmap.org/wiki/Overpass_API/Overpass_QL>

use std::collections::{BTreeSet, HashMap};

use errand_core::{BranchQuery, Point, PointKind};
use geo::Coord;
use serde::Deserialize;

/// Server-side time limit in seconds written into every query.
const QUERY_TIMEOUT_SECS: u64 = 25;

/// Overpass interpreter response in `[out:json]` format.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    /// Matched elements.
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// A node, way or relation returned by Overpass.
#[derive(Debug, Deserialize)]
pub struct OverpassElement {
    /// Latitude for nodes.
    pub lat: Option<f64>,
    /// Longitude for nodes.
    pub lon: Option<f64>,
    /// Centre for ways and relations when `out center` was requested.
    pub center: Option<OverpassCentre>,
    /// OSM tags.
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// Centre coordinates of an area element.
#[derive(Debug, Deserialize)]
pub struct OverpassCentre {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

impl OverpassElement {
    /// Node coordinates, falling back to the computed centre.
    fn location(&self) -> Option<Coord<f64>> {
        match (self.lat, self.lon, &self.center) {
            (Some(lat), Some(lon), _) => Some(Coord { x: lon, y: lat }),
            (_, _, Some(centre)) => Some(Coord {
                x: centre.lon,
                y: centre.lat,
            }),
            _ => None,
        }
    }

    /// Convert to a chain-branch point labelled `"<chain> - <name>"`.
    ///
    /// Elements without usable coordinates yield `None`.
    pub fn to_branch(&self, chain: &str) -> Option<Point> {
        let location = self.location()?;
        if !(location.x.is_finite() && location.y.is_finite()) {
            return None;
        }
        let name = self.tags.get("name").map_or("Unnamed", String::as_str);
        Some(
            Point::new(location)
                .with_label(format!("{chain} - {name}"))
                .with_kind(PointKind::ChainBranch),
        )
    }
}

impl OverpassResponse {
    /// Every branch point in the response, in response order.
    pub fn branches(&self, chain: &str) -> Vec<Point> {
        self.elements
            .iter()
            .filter_map(|element| element.to_branch(chain))
            .collect()
    }

    /// Distinct `brand` tag values, sorted.
    pub fn brands(&self) -> Vec<String> {
        self.elements
            .iter()
            .filter_map(|element| element.tags.get("brand"))
            .filter(|brand| !brand.is_empty())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Escape a value for use inside a double-quoted Overpass QL string.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn around(centre: Coord<f64>, radius_metres: f64) -> String {
    format!("(around:{radius_metres},{},{})", centre.y, centre.x)
}

/// Query selecting every element of `query.brand` near `query.centre`.
pub fn branch_query(query: &BranchQuery) -> String {
    let filter = format!("[\"brand\"=\"{}\"]", escape(&query.brand));
    let area = around(query.centre, query.radius_metres);
    format!(
        "[out:json][timeout:{QUERY_TIMEOUT_SECS}];\n(\n  node{filter}{area};\n  way{filter}{area};\n  relation{filter}{area};\n);\nout center;\n"
    )
}

/// Query listing named, branded elements near `centre`.
pub fn brand_listing_query(centre: Coord<f64>, radius_metres: f64) -> String {
    let filter = "[\"brand\"][\"name\"]";
    let area = around(centre, radius_metres);
    format!(
        "[out:json][timeout:{QUERY_TIMEOUT_SECS}];\n(\n  node{filter}{area};\n  way{filter}{area};\n  relation{filter}{area};\n);\nout tags;\n"
    )
}
