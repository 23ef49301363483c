pub mod bodies;
pub mod camera;
pub mod frame;
pub mod input;
pub mod overlay;
pub mod plugin;
pub mod ui;

pub use plugin::StardustRenderPlugin;
