pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod graticule;
pub mod map;
pub mod path;
pub mod projection;
pub mod rotation_driver;
pub mod topology;
pub mod transition;
pub mod viewbox;

pub use config::{
    default_config, find_config, get_config, MapConfig, ProjectionConfig, PROJECTION_CONFIGS,
};
pub use error::{MapError, TopologyError, ViewBoxParseError};
pub use geometry::{Country, Geometry, Position};
pub use gesture::{
    action_for_key, GestureAdapter, KeyAction, WheelDeltaMode, ZoomEvent, ZoomTracker,
    ZoomTransform, KEY_BINDINGS,
};
pub use graticule::graticule_lines;
pub use map::{CountryPath, RenderedPaths, WorldMap};
pub use path::{format_coordinate, PathGenerator};
pub use projection::{Clip, Projection, ProjectionKind};
pub use rotation_driver::{FrameToken, RotationDriver};
pub use topology::{countries_from_str, name_index, Topology};
pub use transition::{ease_in_out_cubic, ViewBoxTransition};
pub use viewbox::{PanDirection, ScaleExtent, ViewBox, ViewBoxController};
