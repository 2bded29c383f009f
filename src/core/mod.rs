pub mod bitmap;
pub mod camera;
pub mod constants;
pub mod controls;
pub mod geometry;
pub mod hotspot;
pub mod picking;
pub mod svg;
pub mod typewriter;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
