//! Frame renderer
//!
//! Casts one camera ray per character cell and writes the traced glyph and
//! color into a frame buffer. Rows are independent, so they are traced on the
//! rayon pool unless the renderer is switched to serial mode.

use crate::color::ColorAttr;
use crate::math::{normalized, MathError, Vector2, Vector3};
use crate::scene::Scene;
use crate::tracer::{trace_ray, HitResult};
use rayon::prelude::*;

/// Camera sits on the z axis looking down -z
pub const CAMERA_Z: f32 = 4.0;

/// Z offset of the projection plane from the camera; acts as field of view
pub const FOCAL_OFFSET: f32 = -1.5;

/// One character cell of the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub color: ColorAttr,
}

impl Cell {
    /// Background cell: blank glyph, white foreground
    pub const BLANK: Cell = Cell {
        glyph: ' ',
        color: ColorAttr::FG_WHITE,
    };
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Fixed-size grid of cells, stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reset every cell to the background
    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Glyphs only, one line per row
    pub fn to_ascii(&self) -> String {
        let mut result = String::with_capacity(self.width * self.height + self.height);
        for row in self.rows() {
            result.extend(row.iter().map(|c| c.glyph));
            result.push('\n');
        }
        result
    }
}

/// Maps grid cells to camera rays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    width: usize,
    height: usize,
    /// Screen aspect times character aspect, applied to x only
    aspect: f32,
}

impl Projection {
    pub fn new(width: usize, height: usize, pixel_aspect: f32) -> Self {
        let screen_aspect = width as f32 / height as f32;
        Self {
            width,
            height,
            aspect: screen_aspect * pixel_aspect,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Cell position in `[-1, 1]` on both axes, y pointing up
    pub fn uv(&self, x: usize, y: usize) -> Vector2 {
        let mut uv = Vector2::new(
            x as f32 / self.width as f32,
            1.0 - y as f32 / self.height as f32,
        ) * 2.0;
        uv.add_scalar_mut(-1.0);
        uv.x *= self.aspect;
        uv
    }

    /// Unit direction of the camera ray through cell `(x, y)`
    pub fn ray_direction(&self, x: usize, y: usize) -> Result<Vector3, MathError> {
        let uv = self.uv(x, y);
        normalized(&Vector3::new(uv.x, uv.y, FOCAL_OFFSET))
    }
}

/// Counts collected while rendering a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub hits: usize,
    pub errors: usize,
}

impl std::ops::Add for RenderStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            hits: self.hits + rhs.hits,
            errors: self.errors + rhs.errors,
        }
    }
}

/// Renders scenes into frame buffers of one fixed size
#[derive(Debug, Clone)]
pub struct Renderer {
    width: usize,
    height: usize,
    origin: Vector3,
    projection: Projection,
    parallel: bool,
}

impl Renderer {
    pub fn new(width: usize, height: usize, pixel_aspect: f32) -> Self {
        Self {
            width,
            height,
            origin: Vector3::new(0.0, 0.0, CAMERA_Z),
            projection: Projection::new(width, height, pixel_aspect),
            parallel: true,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// A cleared buffer of the right size
    pub fn frame_buffer(&self) -> FrameBuffer {
        FrameBuffer::new(self.width, self.height)
    }

    /// Trace every cell. Cells whose ray misses are left untouched.
    pub fn render(&self, scene: &Scene, buffer: &mut FrameBuffer) -> RenderStats {
        debug_assert_eq!((buffer.width, buffer.height), (self.width, self.height));
        let width = self.width.max(1);

        let stats = if self.parallel {
            buffer
                .cells
                .par_chunks_mut(width)
                .enumerate()
                .map(|(y, row)| self.render_row(scene, y, row))
                .reduce(RenderStats::default, |a, b| a + b)
        } else {
            buffer
                .cells
                .chunks_mut(width)
                .enumerate()
                .map(|(y, row)| self.render_row(scene, y, row))
                .fold(RenderStats::default(), |a, b| a + b)
        };

        if stats.errors > 0 {
            if cfg!(debug_assertions) {
                tracing::error!(errors = stats.errors, "Cells left blank after degenerate shading");
            } else {
                tracing::warn!(errors = stats.errors, "Cells left blank after degenerate shading");
            }
        }
        stats
    }

    fn render_row(&self, scene: &Scene, y: usize, row: &mut [Cell]) -> RenderStats {
        let mut stats = RenderStats::default();
        for (x, cell) in row.iter_mut().enumerate() {
            let traced = self
                .projection
                .ray_direction(x, y)
                .and_then(|dir| trace_ray(scene, &self.origin, &dir, 0));

            match traced {
                Ok(HitResult::Hit { glyph, color }) => {
                    *cell = Cell { glyph, color };
                    stats.hits += 1;
                }
                Ok(HitResult::Miss) => {}
                Err(e) => {
                    tracing::trace!(x, y, error = %e, "Cell trace failed");
                    stats.errors += 1;
                }
            }
        }
        stats
    }
}
