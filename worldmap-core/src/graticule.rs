use crate::geometry::Geometry;

const STEP: f64 = 10.0;
const PRECISION: f64 = 2.5;
const MINOR_LAT: f64 = 80.0;
const POLE_EPSILON: f64 = 1e-6;

/// Meridians and parallels every 10 degrees.
///
/// Meridians on multiples of 90 run pole to pole; the rest stop at ±80 like
/// the parallels do.
pub fn graticule_lines() -> Vec<Geometry> {
    let mut lines = Vec::new();
    for lon in (-18..18).map(|i| f64::from(i) * STEP) {
        let extent = if lon % 90.0 == 0.0 {
            90.0 - POLE_EPSILON
        } else {
            MINOR_LAT
        };
        lines.push(meridian(lon, -extent, extent));
    }
    for lat in (-8..=8).map(|i| f64::from(i) * STEP) {
        lines.push(parallel(lat));
    }
    lines
}

fn meridian(lon: f64, south: f64, north: f64) -> Geometry {
    Geometry::LineString {
        coordinates: samples(south, north).map(|lat| [lon, lat]).collect(),
    }
}

fn parallel(lat: f64) -> Geometry {
    Geometry::LineString {
        coordinates: samples(-180.0, 180.0).map(|lon| [lon, lat]).collect(),
    }
}

/// `from`, `from + PRECISION`, ... and finally `to` itself.
fn samples(from: f64, to: f64) -> impl Iterator<Item = f64> {
    let count = ((to - from) / PRECISION).ceil() as usize;
    (0..count)
        .map(move |i| from + PRECISION * i as f64)
        .chain(std::iter::once(to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;

    fn coordinates(line: &Geometry) -> &[Position] {
        match line {
            Geometry::LineString { coordinates } => coordinates,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn has_36_meridians_and_17_parallels() {
        assert_eq!(graticule_lines().len(), 36 + 17);
    }

    #[test]
    fn major_meridians_reach_the_poles() {
        let lines = graticule_lines();
        // index 18 is the prime meridian, index 1 is -170
        let prime = coordinates(&lines[18]);
        assert_eq!(prime[0][0], 0.0);
        assert!(prime[0][1] < -89.9);
        assert!(prime.last().unwrap()[1] > 89.9);

        let minor = coordinates(&lines[1]);
        assert_eq!(minor[0], [-170.0, -80.0]);
        assert_eq!(*minor.last().unwrap(), [-170.0, 80.0]);
    }

    #[test]
    fn parallels_are_sampled_every_2_5_degrees() {
        let lines = graticule_lines();
        let equator = coordinates(&lines[36 + 8]);
        assert_eq!(equator.len(), 145);
        assert_eq!(equator[1], [-177.5, 0.0]);
        assert_eq!(*equator.last().unwrap(), [180.0, 0.0]);
    }
}
