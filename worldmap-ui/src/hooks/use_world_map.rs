use leptos::*;
use worldmap_core::{
    FrameToken, MapConfig, MapError, PanDirection, ProjectionKind, RenderedPaths, ViewBox,
    WheelDeltaMode, WorldMap,
};

/// Reactive handle on the map session.
///
/// The `WorldMap` lives in a `StoredValue`. Every mutation goes through this
/// handle, which republishes the parts that changed into signals. Paths are
/// always replaced as one `RenderedPaths` value.
#[derive(Clone, Copy)]
pub struct MapState {
    map: StoredValue<WorldMap>,
    pub paths: ReadSignal<RenderedPaths>,
    set_paths: WriteSignal<RenderedPaths>,
    pub projection: ReadSignal<ProjectionKind>,
    set_projection: WriteSignal<ProjectionKind>,
    pub rotating: ReadSignal<bool>,
    set_rotating: WriteSignal<bool>,
    /// Controller viewBox. The displayed one lags behind during transitions.
    pub target: ReadSignal<ViewBox>,
    set_target: WriteSignal<ViewBox>,
}

pub fn use_world_map(config: MapConfig) -> MapState {
    let map = WorldMap::new(config);
    let (paths, set_paths) = create_signal(map.paths().clone());
    let (projection, set_projection) = create_signal(map.projection_kind());
    let (rotating, set_rotating) = create_signal(map.is_rotating());
    let (target, set_target) = create_signal(map.viewbox());

    MapState {
        map: store_value(map),
        paths,
        set_paths,
        projection,
        set_projection,
        rotating,
        set_rotating,
        target,
        set_target,
    }
}

impl MapState {
    // Signals are written after the map borrow ends so effects can reenter.
    fn publish_paths(&self) {
        let Some((paths, kind, rotating)) = self.map.try_with_value(|map| {
            (map.paths().clone(), map.projection_kind(), map.is_rotating())
        }) else {
            return;
        };
        self.set_paths.set(paths);
        self.set_projection.set(kind);
        self.set_rotating.set(rotating);
    }

    fn publish_viewbox(&self, viewbox: Option<ViewBox>) -> Option<ViewBox> {
        if let Some(viewbox) = viewbox {
            self.set_target.set(viewbox);
        }
        viewbox
    }

    pub fn load_topology(&self, json: &str) -> Result<usize, MapError> {
        let loaded = self
            .map
            .try_update_value(|map| map.load_topology(json))
            .unwrap_or(Ok(0))?;
        self.publish_paths();
        Ok(loaded)
    }

    /// `Ok(None)` once the owning reactive scope has been disposed.
    pub fn set_projection_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ProjectionKind>, MapError> {
        let Some(result) = self
            .map
            .try_update_value(|map| map.set_projection_by_name(name))
        else {
            return Ok(None);
        };
        let kind = result?;
        self.publish_paths();
        Ok(Some(kind))
    }

    /// Returns the token of a newly started rotation, `None` when it stopped
    /// or cannot start.
    pub fn toggle_rotation(&self, now: f64) -> Option<FrameToken> {
        let token = self
            .map
            .try_update_value(|map| map.toggle_rotation(now))
            .flatten();
        self.publish_paths();
        token
    }

    /// Advance a rotation frame. `false` means the token is stale.
    pub fn tick(&self, token: FrameToken, now: f64) -> bool {
        let moved = self
            .map
            .try_update_value(|map| map.tick(token, now))
            .unwrap_or(false);
        if moved {
            if let Some(paths) = self.map.try_with_value(|map| map.paths().clone()) {
                self.set_paths.set(paths);
            }
        }
        moved
    }

    pub fn pan(&self, direction: PanDirection) -> Option<ViewBox> {
        self.publish_viewbox(self.map.try_update_value(|map| map.pan(direction)))
    }

    pub fn reset(&self) -> Option<ViewBox> {
        self.publish_viewbox(self.map.try_update_value(|map| map.reset()))
    }

    pub fn zoom_in(&self) -> Option<ViewBox> {
        self.publish_viewbox(self.map.try_update_value(|map| map.zoom_in()))
    }

    pub fn zoom_out(&self) -> Option<ViewBox> {
        self.publish_viewbox(self.map.try_update_value(|map| map.zoom_out()))
    }

    pub fn key(&self, key: &str) -> Option<ViewBox> {
        self.publish_viewbox(self.map.try_update_value(|map| map.key(key)).flatten())
    }

    pub fn wheel(
        &self,
        delta_y: f64,
        mode: WheelDeltaMode,
        pinch: bool,
        pointer: (f64, f64),
    ) -> Option<ViewBox> {
        self.publish_viewbox(
            self.map
                .try_update_value(|map| map.wheel(delta_y, mode, pinch, pointer))
                .flatten(),
        )
    }

    pub fn double_click(&self, pointer: (f64, f64), zoom_out: bool) -> Option<ViewBox> {
        self.publish_viewbox(
            self.map
                .try_update_value(|map| map.double_click(pointer, zoom_out))
                .flatten(),
        )
    }

    pub fn drag_start(&self, pointer: (f64, f64)) {
        self.map.update_value(|map| map.drag_start(pointer));
    }

    pub fn drag_move(&self, pointer: (f64, f64)) -> Option<ViewBox> {
        self.publish_viewbox(
            self.map
                .try_update_value(|map| map.drag_move(pointer))
                .flatten(),
        )
    }

    pub fn drag_end(&self) {
        self.map.update_value(|map| map.drag_end());
    }
}
