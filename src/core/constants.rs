// Geometry, interaction and timing constants shared by the web frontend.

// Hull geometry
pub const SPHERE_RADIUS: f32 = 2.0;
pub const SPHERE_SEGMENTS: u32 = 64;
pub const PICK_RADIUS: f32 = 2.02; // hotspot disks float just above the hull
pub const OVERLAY_RADIUS: f32 = 2.01;
pub const OVERLAY_SEGMENTS: u32 = 32;

// Hotspot disks
pub const DEFAULT_HOTSPOT_SIZE: f32 = 0.5;
pub const HOTSPOT_DISK_SEGMENTS: u32 = 16;

// Typewriter plane (child of the hull)
pub const TEXT_PLANE_SIZE: f32 = 1.5;
pub const TEXT_PLANE_Z: f32 = 2.1;
pub const TEXT_CANVAS_PX: u32 = 512;

// Typewriter timing
pub const TYPEWRITER_MESSAGE: &str = "Hello World";
pub const TYPEWRITER_TICK_MS: u32 = 100;
pub const TYPEWRITER_HOLD_MS: u32 = 1000;
pub const TYPEWRITER_CURSOR: char = '█';

// Rotation
pub const ROTATION_BLEND: f32 = 0.1; // fraction of the remaining gap closed per frame
pub const ROTATION_PER_PX: f32 = 0.01; // radians per dragged pixel

// Zoom
pub const ZOOM_SPEED: f32 = 0.1;
pub const ZOOM_DELTA_SCALE: f32 = 0.01;
pub const MIN_CAMERA_DISTANCE: f32 = 2.0;
pub const MAX_CAMERA_DISTANCE: f32 = 10.0;

// Camera
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START_Z: f32 = 5.0;

// SVG rasterization
pub const SVG_DEFAULT_SIZE_PX: u32 = 1024;
pub const MAX_RASTER_PX: u32 = 8192; // max_texture_dimension_2d of wgpu's default limits
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
