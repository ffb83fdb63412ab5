//! The map session: one controller owning the viewBox, gestures, projection,
//! rotation and the rendered paths.

use crate::config::MapConfig;
use crate::error::MapError;
use crate::geometry::{Country, Geometry};
use crate::gesture::{GestureAdapter, WheelDeltaMode};
use crate::graticule::graticule_lines;
use crate::path::PathGenerator;
use crate::projection::{Projection, ProjectionKind};
use crate::rotation_driver::{FrameToken, RotationDriver};
use crate::topology::{countries_from_str, name_index};
use crate::viewbox::{PanDirection, ScaleExtent, ViewBox, ViewBoxController};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq)]
pub struct CountryPath {
    pub id: String,
    pub name: String,
    pub d: String,
}

/// Every path of one projection state. Replaced as a whole, never patched.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedPaths {
    pub projection: ProjectionKind,
    pub rotation: [f64; 3],
    pub sphere: String,
    pub graticule: Vec<String>,
    pub countries: Vec<CountryPath>,
}

pub struct WorldMap {
    config: MapConfig,
    viewbox: ViewBoxController,
    gestures: GestureAdapter,
    projection: Projection,
    rotation: RotationDriver,
    countries: Vec<Country>,
    names: HashMap<String, String>,
    graticule: Vec<Geometry>,
    paths: RenderedPaths,
}

impl WorldMap {
    pub fn new(config: MapConfig) -> Self {
        let extent = ScaleExtent::from_doublings(config.zoom_doublings);
        let viewbox = ViewBoxController::new(
            config.width,
            config.height,
            config.pan_fraction,
            config.zoom_step,
        )
        .with_scale_extent(extent);
        let projection = Projection::new(ProjectionKind::default(), config.translate());
        let graticule = if config.include_graticule {
            graticule_lines()
        } else {
            Vec::new()
        };

        let mut map = Self {
            viewbox,
            gestures: GestureAdapter::new(extent),
            projection,
            rotation: RotationDriver::new(config.rotation_speed),
            countries: Vec::new(),
            names: HashMap::new(),
            graticule,
            paths: RenderedPaths {
                projection: ProjectionKind::default(),
                rotation: [0.0; 3],
                sphere: String::new(),
                graticule: Vec::new(),
                countries: Vec::new(),
            },
            config,
        };
        map.paths = map.render();
        map
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn viewbox(&self) -> ViewBox {
        self.viewbox.current()
    }

    pub fn viewbox_controller(&self) -> &ViewBoxController {
        &self.viewbox
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn projection_kind(&self) -> ProjectionKind {
        self.projection.kind()
    }

    pub fn paths(&self) -> &RenderedPaths {
        &self.paths
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn country_name(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn is_rotating(&self) -> bool {
        self.rotation.is_running()
    }

    pub fn rotation_token(&self) -> Option<FrameToken> {
        self.rotation.token()
    }

    fn render(&self) -> RenderedPaths {
        let generator = PathGenerator::new(&self.projection);
        RenderedPaths {
            projection: self.projection.kind(),
            rotation: self.projection.rotation(),
            sphere: generator.path(&Geometry::Sphere),
            graticule: self.graticule.iter().map(|g| generator.path(g)).collect(),
            countries: self
                .countries
                .iter()
                .map(|c| CountryPath {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    d: generator.path(&c.geometry),
                })
                .collect(),
        }
    }

    /// Switch projection and rebuild every path in one step.
    ///
    /// A running rotation is stopped when the new kind cannot rotate.
    /// Moving to a different kind forgets the remembered rotation angle.
    pub fn set_projection(&mut self, kind: ProjectionKind) {
        if self.rotation.is_running() && !kind.is_rotatable() {
            self.rotation.stop();
        }
        let projection = if kind == self.projection.kind() {
            Projection::new(kind, self.config.translate()).with_rotation(self.projection.rotation())
        } else {
            self.rotation.reset_angle();
            Projection::new(kind, self.config.translate())
        };
        log::debug!("projection set to {}", kind.display_name());
        self.projection = projection;
        self.paths = self.render();
    }

    /// Switch by id or dropdown label. Unknown names leave the map untouched.
    pub fn set_projection_by_name(&mut self, name: &str) -> Result<ProjectionKind, MapError> {
        let kind = name.parse::<ProjectionKind>().map_err(|e| {
            log::warn!("{e}");
            e
        })?;
        self.set_projection(kind);
        Ok(kind)
    }

    /// Start rotating from the remembered angle. `None` if the projection
    /// cannot rotate.
    pub fn start_rotation(&mut self, now: f64) -> Option<FrameToken> {
        if !self.projection.kind().is_rotatable() {
            return None;
        }
        let token = self.rotation.start(now);
        self.projection.rotate([self.rotation.last_angle(), 0.0, 0.0]);
        Some(token)
    }

    pub fn stop_rotation(&mut self) {
        self.rotation.stop();
    }

    /// Start or stop rotating; returns the token of a newly started run.
    pub fn toggle_rotation(&mut self, now: f64) -> Option<FrameToken> {
        if self.rotation.is_running() {
            self.stop_rotation();
            None
        } else {
            self.start_rotation(now)
        }
    }

    /// Advance the rotation to `now`. Returns whether paths were rebuilt.
    pub fn tick(&mut self, token: FrameToken, now: f64) -> bool {
        let Some(angle) = self.rotation.tick(token, now) else {
            return false;
        };
        self.projection.rotate([angle, 0.0, 0.0]);
        self.paths = self.render();
        true
    }

    pub fn load_countries(&mut self, countries: Vec<Country>) {
        self.names = name_index(&countries);
        self.countries = countries;
        self.paths = self.render();
    }

    /// Decode a topology document and show its countries.
    pub fn load_topology(&mut self, json: &str) -> Result<usize, MapError> {
        let countries = countries_from_str(json, &self.config.topology_object)?;
        let count = countries.len();
        log::info!(
            "loaded {} countries from object {:?}",
            count,
            self.config.topology_object
        );
        self.load_countries(countries);
        Ok(count)
    }

    pub fn pan(&mut self, direction: PanDirection) -> ViewBox {
        self.viewbox.pan(direction)
    }

    /// Restore the full canvas and forget any gesture state.
    pub fn reset(&mut self) -> ViewBox {
        self.gestures.reset();
        self.viewbox.reset()
    }

    pub fn zoom_in(&mut self) -> ViewBox {
        self.viewbox.zoom_in()
    }

    pub fn zoom_out(&mut self) -> ViewBox {
        self.viewbox.zoom_out()
    }

    /// Apply a keyboard key. Unmapped keys return `None`.
    pub fn key(&mut self, key: &str) -> Option<ViewBox> {
        self.gestures.apply_key(key, &mut self.viewbox)
    }

    pub fn wheel(
        &mut self,
        delta_y: f64,
        mode: WheelDeltaMode,
        pinch: bool,
        pointer: (f64, f64),
    ) -> Option<ViewBox> {
        self.gestures
            .wheel(delta_y, mode, pinch, pointer, &mut self.viewbox)
    }

    pub fn double_click(&mut self, pointer: (f64, f64), zoom_out: bool) -> Option<ViewBox> {
        self.gestures
            .double_click(pointer, zoom_out, &mut self.viewbox)
    }

    pub fn drag_start(&mut self, pointer: (f64, f64)) {
        self.gestures.drag_start(pointer);
    }

    pub fn drag_move(&mut self, pointer: (f64, f64)) -> Option<ViewBox> {
        self.gestures.drag_move(pointer, &mut self.viewbox)
    }

    pub fn drag_end(&mut self) {
        self.gestures.drag_end();
    }
}

impl Default for WorldMap {
    fn default() -> Self {
        Self::new(MapConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(lon: f64, lat: f64) -> Country {
        Country {
            id: format!("{lon}:{lat}"),
            name: format!("Square {lon}"),
            geometry: Geometry::Polygon {
                coordinates: vec![vec![
                    [lon, lat],
                    [lon + 5.0, lat],
                    [lon + 5.0, lat + 5.0],
                    [lon, lat + 5.0],
                    [lon, lat],
                ]],
            },
        }
    }

    #[test]
    fn starts_orthographic_without_countries() {
        let map = WorldMap::default();
        assert_eq!(map.projection_kind(), ProjectionKind::Orthographic);
        assert!(!map.paths().sphere.is_empty());
        assert!(map.paths().graticule.is_empty());
        assert!(map.paths().countries.is_empty());
        assert_eq!(map.viewbox().to_string(), "0 0 960 500");
    }

    #[test]
    fn graticule_is_rendered_when_enabled() {
        let map = WorldMap::new(MapConfig {
            include_graticule: true,
            ..MapConfig::default()
        });
        assert_eq!(map.paths().graticule.len(), 53);
    }

    #[test]
    fn loading_countries_renders_and_indexes_them() {
        let mut map = WorldMap::default();
        map.load_countries(vec![square(0.0, 0.0), square(170.0, 0.0)]);
        let paths = map.paths();
        assert_eq!(paths.countries.len(), 2);
        assert!(!paths.countries[0].d.is_empty());
        // Hidden behind the orthographic horizon
        assert!(paths.countries[1].d.is_empty());
        assert_eq!(map.country_name("0:0"), Some("Square 0"));
    }

    #[test]
    fn switching_to_non_rotatable_stops_rotation_and_forgets_angle() {
        let mut map = WorldMap::default();
        let token = map.toggle_rotation(0.0).unwrap();
        assert!(map.tick(token, 1_000.0));
        assert_eq!(map.paths().rotation, [10.0, 0.0, 0.0]);

        map.set_projection(ProjectionKind::Mercator);
        assert!(!map.is_rotating());
        assert!(!map.tick(token, 2_000.0));
        assert_eq!(map.toggle_rotation(3_000.0), None);

        map.set_projection(ProjectionKind::Orthographic);
        assert_eq!(map.projection().rotation(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn pause_and_resume_keeps_the_angle() {
        let mut map = WorldMap::default();
        let first = map.toggle_rotation(0.0).unwrap();
        map.tick(first, 2_000.0);
        assert_eq!(map.toggle_rotation(2_500.0), None);

        let second = map.toggle_rotation(10_000.0).unwrap();
        assert_eq!(map.projection().rotation(), [20.0, 0.0, 0.0]);
        map.tick(second, 11_000.0);
        assert_eq!(map.paths().rotation, [30.0, 0.0, 0.0]);
    }

    #[test]
    fn unknown_projection_name_leaves_state_unchanged() {
        let mut map = WorldMap::default();
        map.load_countries(vec![square(0.0, 0.0)]);
        let before = map.paths().clone();
        assert!(matches!(
            map.set_projection_by_name("Dymaxion"),
            Err(MapError::UnknownProjection(_))
        ));
        assert_eq!(map.paths(), &before);
        assert_eq!(
            map.set_projection_by_name("Natural Earth 1").unwrap(),
            ProjectionKind::NaturalEarth1
        );
    }

    #[test]
    fn reset_clears_gesture_state() {
        let mut map = WorldMap::default();
        map.wheel(-500.0, WheelDeltaMode::Pixel, false, (100.0, 100.0));
        map.pan(PanDirection::Right);
        assert_ne!(map.viewbox(), ViewBox::from_size(960.0, 500.0));

        assert_eq!(map.reset(), ViewBox::from_size(960.0, 500.0));
        assert_eq!(map.viewbox_controller().last_scale(), 1.0);

        // The next wheel step starts again from k = 1
        let after = map
            .wheel(-500.0, WheelDeltaMode::Pixel, false, (480.0, 250.0))
            .unwrap();
        assert!((after.width - 960.0 / 1.1).abs() < 1e-9);
    }

    #[test]
    fn keys_route_through_the_gesture_table() {
        let mut map = WorldMap::default();
        assert_eq!(map.key("ArrowRight").map(|v| v.x), Some(48.0));
        assert_eq!(map.key("q"), None);
    }
}
