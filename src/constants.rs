// Render and page tuning constants for the web frontend.
//
// Colors are RGB in 0..1 taken from the hex values the artwork was designed
// against; light intensities are multiplied in when globals are packed.
use glam::Vec3;

// DOM
pub const CANVAS_ID: &str = "app-canvas";
pub const LOADING_ID: &str = "loading";
pub const LOADING_HIDE_MS: i32 = 1000;

// Assets
pub const HULL_TEXTURE_PATH: &str = "./texture.svg";

// Hull materials
pub const HULL_PLACEHOLDER_COLOR: [f32; 3] = [0.0, 0x4d as f32 / 255.0, 0.0]; // #004d00
pub const HULL_PLACEHOLDER_SHININESS: f32 = 30.0;
pub const HULL_TEXTURED_SHININESS: f32 = 100.0;

// Screen overlay hemisphere
pub const OVERLAY_COLOR: [f32; 3] = [0x11 as f32 / 255.0; 3]; // #111111
pub const OVERLAY_OPACITY: f32 = 0.9;
pub const OVERLAY_SHININESS: f32 = 100.0;

// Typewriter plane
pub const TEXT_OPACITY: f32 = 0.9;
pub const TEXT_FONT: &str = "bold 32px Courier New";
pub const TEXT_COLOR: &str = "#00ff00";
pub const TEXT_GLOW_BLUR: f64 = 10.0;

// Hotspot disks
pub const HOTSPOT_COLOR: [f32; 3] = [1.0, 0.0, 0.0];
pub const HOTSPOT_OPACITY: f32 = 0.3;

// Lighting rig
pub const AMBIENT_COLOR: [f32; 3] = [0x40 as f32 / 255.0; 3]; // #404040
pub const AMBIENT_INTENSITY: f32 = 0.6;
pub const KEY_LIGHT_POS: Vec3 = Vec3::new(5.0, 5.0, 5.0);
pub const KEY_LIGHT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const KEY_LIGHT_INTENSITY: f32 = 1.0;
pub const SIDE_LIGHT_POS: Vec3 = Vec3::new(-5.0, 0.0, 2.0);
pub const SIDE_LIGHT_COLOR: [f32; 3] = [0x40 as f32 / 255.0; 3];
pub const SIDE_LIGHT_INTENSITY: f32 = 0.5;
pub const TEXT_LIGHT_POS: Vec3 = Vec3::new(0.0, 0.0, 4.0);
pub const TEXT_LIGHT_COLOR: [f32; 3] = [0.0, 1.0, 0.0];
pub const TEXT_LIGHT_INTENSITY: f32 = 0.3;
pub const TEXT_LIGHT_RANGE: f32 = 10.0;

// Black background
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;
