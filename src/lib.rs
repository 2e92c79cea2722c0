//! Character-cell ray tracer for orbiting mirror spheres
//!
//! This library traces one ray per character cell through a scene of
//! reflective spheres lit by a single moving point light, and turns each hit
//! into a brightness glyph plus a console color attribute.

pub mod animation;
pub mod color;
pub mod config;
pub mod intersect;
pub mod math;
pub mod renderer;
pub mod scene;
pub mod terminal;
pub mod tracer;

pub use animation::{GridSink, Simulation};
pub use color::ColorAttr;
pub use renderer::{FrameBuffer, Renderer};
pub use scene::Scene;
pub use terminal::TerminalDisplay;
pub use tracer::{trace_ray, HitResult};

/// Grid width in cells
pub const WIDTH: usize = 200;

/// Grid height in cells
pub const HEIGHT: usize = 50;

/// Width / height of a single character cell
pub const PIXEL_ASPECT: f32 = 8.0 / 16.0;

/// Deepest bounce that is still traced
pub const MAX_DEPTH: u32 = 4;

/// Milliseconds between frames
pub const FRAME_DELAY_MS: u64 = 20;

/// Glyphs from densest (index 0) to blank (index 16)
pub const GRADIENT: [char; 17] = [
    '@', '$', '8', 'W', '9', 'H', '4', 'Z', '1', 'l', '(', 'r', '/', '!', ':', '.', ' ',
];
