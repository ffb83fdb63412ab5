mod use_keyboard;
mod use_rotation;
mod use_viewbox_transition;
mod use_world_map;
mod use_zoom_gesture;

pub use use_keyboard::use_keyboard;
pub use use_rotation::{use_rotation, RotationControl};
pub use use_viewbox_transition::{use_viewbox_transition, ViewBoxAnimation};
pub use use_world_map::{use_world_map, MapState};
pub use use_zoom_gesture::{use_zoom_gesture, ZoomGesture};
