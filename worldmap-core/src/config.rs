//! Projection registry and session constants.
//!
//! Projections are listed in dropdown order; the registry index of a kind
//! equals its discriminant.

use crate::projection::ProjectionKind;
use serde::{Deserialize, Serialize};

/// Registry entry for one projection kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionConfig {
    pub kind: ProjectionKind,
    /// Stable identifier used in code and tests
    pub id: &'static str,
    /// Label shown in the projection dropdown
    pub display_name: &'static str,
    /// Default scale in pixels per unit of the raw projection
    pub scale: f64,
    /// Whether the rotate toggle is offered
    pub rotatable: bool,
}

const fn entry(
    kind: ProjectionKind,
    id: &'static str,
    display_name: &'static str,
    scale: f64,
) -> ProjectionConfig {
    ProjectionConfig {
        kind,
        id,
        display_name,
        scale,
        rotatable: false,
    }
}

/// Registry of available projections.
pub static PROJECTION_CONFIGS: &[ProjectionConfig] = &[
    entry(ProjectionKind::Aitoff, "aitoff", "Aitoff", 152.63),
    entry(
        ProjectionKind::AzimuthalEqualArea,
        "azimuthal-equal-area",
        "Azimuthal Equal Area",
        124.75,
    ),
    entry(ProjectionKind::Boggs, "boggs", "Boggs", 160.857),
    entry(ProjectionKind::Bromley, "bromley", "Bromley", 152.63),
    entry(
        ProjectionKind::CylindricalStereographic,
        "cylindrical-stereographic",
        "Cylindrical Stereographic",
        124.75,
    ),
    entry(ProjectionKind::Eckert4, "eckert4", "Eckert4", 180.739),
    entry(ProjectionKind::Fahey, "fahey", "Fahey", 137.152),
    entry(ProjectionKind::Gilbert, "gilbert", "Gilbert", 249.5),
    entry(ProjectionKind::Hufnagel, "hufnagel", "Hufnagel", 176.409),
    entry(
        ProjectionKind::InterruptedHomolosine,
        "interrupted-homolosine",
        "Interrupted Homolosine",
        152.63,
    ),
    entry(
        ProjectionKind::InterruptedMollweideHemispheres,
        "interrupted-mollweide-hemispheres",
        "Interrupted Mollweide Hemispheres",
        169.529,
    ),
    // 961 / tau fits the full Mercator square into the canvas width
    entry(
        ProjectionKind::Mercator,
        "mercator",
        "Mercator",
        961.0 / std::f64::consts::TAU,
    ),
    entry(
        ProjectionKind::NaturalEarth1,
        "natural-earth-1",
        "Natural Earth 1",
        175.295,
    ),
    ProjectionConfig {
        kind: ProjectionKind::Orthographic,
        id: "orthographic",
        display_name: "Orthographic",
        scale: 249.5,
        rotatable: true,
    },
    entry(ProjectionKind::Patterson, "patterson", "Patterson", 139.319),
];

/// Registry entry for a kind.
pub fn get_config(kind: ProjectionKind) -> &'static ProjectionConfig {
    &PROJECTION_CONFIGS[kind as usize]
}

/// Look up a projection by id or display name.
pub fn find_config(name: &str) -> Option<&'static ProjectionConfig> {
    PROJECTION_CONFIGS
        .iter()
        .find(|c| c.id == name || c.display_name == name)
}

/// The projection shown on startup.
pub fn default_config() -> &'static ProjectionConfig {
    get_config(ProjectionKind::default())
}

/// Session constants for one map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub width: f64,
    pub height: f64,
    /// Fraction of the viewBox size moved by one pan step
    pub pan_fraction: f64,
    /// Fraction of the viewBox size removed or added by a zoom button
    pub zoom_step: f64,
    /// Scale extent is `[2^-n, 2^n]`
    pub zoom_doublings: i32,
    /// Degrees of longitude per millisecond while rotating
    pub rotation_speed: f64,
    pub transition_ms: f64,
    pub include_graticule: bool,
    pub topology_url: String,
    pub topology_object: String,
}

impl MapConfig {
    /// Projection center in pixels.
    pub fn translate(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 500.0,
            pan_fraction: 0.05,
            zoom_step: 0.15,
            zoom_doublings: 7,
            rotation_speed: 0.01,
            transition_ms: 250.0,
            include_graticule: false,
            topology_url: "./topojson/countries-50m.json".to_string(),
            topology_object: "countries".to_string(),
        }
    }
}
