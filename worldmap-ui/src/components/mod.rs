mod pan_controls;
mod projection_select;
mod rotate_button;
mod tooltip;
mod world_map;

pub use pan_controls::PanControls;
pub use projection_select::ProjectionSelect;
pub use rotate_button::RotateButton;
pub use tooltip::{HoveredCountry, Tooltip};
pub use world_map::WorldMapSvg;
