use super::raw::{HufnagelParams, RawProjection};
use crate::config::{find_config, get_config};
use crate::error::MapError;
use std::fmt;
use std::str::FromStr;

/// The projections offered in the selector, in dropdown order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ProjectionKind {
    Aitoff,
    AzimuthalEqualArea,
    Boggs,
    Bromley,
    CylindricalStereographic,
    Eckert4,
    Fahey,
    Gilbert,
    Hufnagel,
    InterruptedHomolosine,
    InterruptedMollweideHemispheres,
    Mercator,
    NaturalEarth1,
    #[default]
    Orthographic,
    Patterson,
}

/// Longitudes in degrees of one interrupted lobe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lobe {
    pub west: f64,
    pub center: f64,
    pub east: f64,
}

const fn lobe(west: f64, center: f64, east: f64) -> Lobe {
    Lobe { west, center, east }
}

/// Lobe layout for each hemisphere, listed west to east.
#[derive(Debug, PartialEq)]
pub struct Interruption {
    pub north: &'static [Lobe],
    pub south: &'static [Lobe],
}

impl Interruption {
    pub fn lobes(&self, south: bool) -> &'static [Lobe] {
        if south {
            self.south
        } else {
            self.north
        }
    }
}

pub static HOMOLOSINE_LOBES: Interruption = Interruption {
    north: &[lobe(-180.0, -100.0, -40.0), lobe(-40.0, 30.0, 180.0)],
    south: &[
        lobe(-180.0, -160.0, -100.0),
        lobe(-100.0, -60.0, -20.0),
        lobe(-20.0, 20.0, 80.0),
        lobe(80.0, 140.0, 180.0),
    ],
};

pub static MOLLWEIDE_HEMISPHERE_LOBES: Interruption = Interruption {
    north: &[lobe(-180.0, -90.0, 0.0), lobe(0.0, 90.0, 180.0)],
    south: &[lobe(-180.0, -90.0, 0.0), lobe(0.0, 90.0, 180.0)],
};

/// How the sphere is cut before projecting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Clip {
    /// Cut along the antimeridian (and lobe edges for interrupted kinds).
    Antimeridian,
    /// Keep only points within `angle` degrees of the projection center.
    Circle { angle: f64 },
}

impl ProjectionKind {
    pub const ALL: [ProjectionKind; 15] = [
        ProjectionKind::Aitoff,
        ProjectionKind::AzimuthalEqualArea,
        ProjectionKind::Boggs,
        ProjectionKind::Bromley,
        ProjectionKind::CylindricalStereographic,
        ProjectionKind::Eckert4,
        ProjectionKind::Fahey,
        ProjectionKind::Gilbert,
        ProjectionKind::Hufnagel,
        ProjectionKind::InterruptedHomolosine,
        ProjectionKind::InterruptedMollweideHemispheres,
        ProjectionKind::Mercator,
        ProjectionKind::NaturalEarth1,
        ProjectionKind::Orthographic,
        ProjectionKind::Patterson,
    ];

    pub fn id(self) -> &'static str {
        get_config(self).id
    }

    pub fn display_name(self) -> &'static str {
        get_config(self).display_name
    }

    pub fn is_rotatable(self) -> bool {
        get_config(self).rotatable
    }

    pub fn raw(self) -> RawProjection {
        match self {
            ProjectionKind::Aitoff => RawProjection::Aitoff,
            ProjectionKind::AzimuthalEqualArea => RawProjection::AzimuthalEqualArea,
            ProjectionKind::Boggs => RawProjection::Boggs,
            ProjectionKind::Bromley => RawProjection::Bromley,
            ProjectionKind::CylindricalStereographic => {
                RawProjection::CylindricalStereographic { parallel: 0.0 }
            }
            ProjectionKind::Eckert4 => RawProjection::Eckert4,
            ProjectionKind::Fahey => RawProjection::Fahey,
            ProjectionKind::Gilbert => RawProjection::Gilbert,
            ProjectionKind::Hufnagel => RawProjection::Hufnagel(HufnagelParams::default()),
            ProjectionKind::InterruptedHomolosine => RawProjection::Homolosine,
            ProjectionKind::InterruptedMollweideHemispheres => RawProjection::Mollweide,
            ProjectionKind::Mercator => RawProjection::Mercator,
            ProjectionKind::NaturalEarth1 => RawProjection::NaturalEarth1,
            ProjectionKind::Orthographic => RawProjection::Orthographic,
            ProjectionKind::Patterson => RawProjection::Patterson,
        }
    }

    pub fn clip(self) -> Clip {
        match self {
            ProjectionKind::Orthographic => Clip::Circle { angle: 90.0 },
            ProjectionKind::AzimuthalEqualArea => Clip::Circle { angle: 180.0 - 1e-3 },
            _ => Clip::Antimeridian,
        }
    }

    pub fn interruption(self) -> Option<&'static Interruption> {
        match self {
            ProjectionKind::InterruptedHomolosine => Some(&HOMOLOSINE_LOBES),
            ProjectionKind::InterruptedMollweideHemispheres => Some(&MOLLWEIDE_HEMISPHERE_LOBES),
            _ => None,
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Accepts either the registry id or the display name shown in the dropdown.
impl FromStr for ProjectionKind {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        find_config(s.trim())
            .map(|c| c.kind)
            .ok_or_else(|| MapError::UnknownProjection(s.to_string()))
    }
}
