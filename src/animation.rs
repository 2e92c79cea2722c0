//! Animation loop
//!
//! All mutable state of a run lives in [`Simulation`]: the scene, the frame
//! buffer and the frame counter. Each step clears the buffer, renders,
//! presents the result to a [`GridSink`] and advances the scene.

use crate::renderer::{FrameBuffer, RenderStats, Renderer};
use crate::scene::Scene;
use std::io;
use std::time::Duration;

/// Something that can display a finished frame
pub trait GridSink {
    /// Show `grid`, the fully rendered buffer for frame counter `frame`
    fn present(&mut self, frame: u64, grid: &FrameBuffer) -> io::Result<()>;

    /// Wait out the delay between frames. Returning `false` ends the run.
    fn pace(&mut self, delay: Duration) -> io::Result<bool> {
        std::thread::sleep(delay);
        Ok(true)
    }
}

/// State of one animation run
#[derive(Debug, Clone)]
pub struct Simulation {
    scene: Scene,
    renderer: Renderer,
    buffer: FrameBuffer,
    frame: u64,
}

impl Simulation {
    pub fn new(scene: Scene, renderer: Renderer) -> Self {
        Self::at_frame(scene, renderer, 0)
    }

    /// Start a run at frame counter `frame`
    pub fn at_frame(mut scene: Scene, renderer: Renderer, frame: u64) -> Self {
        scene.update(frame);
        let buffer = renderer.frame_buffer();
        Self {
            scene,
            renderer,
            buffer,
            frame,
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Last rendered frame
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Clear and render the current frame without presenting it
    pub fn render(&mut self) -> RenderStats {
        self.buffer.clear();
        self.renderer.render(&self.scene, &mut self.buffer)
    }

    /// Render, present, then move the scene to the next frame
    pub fn step<S: GridSink + ?Sized>(&mut self, sink: &mut S) -> io::Result<RenderStats> {
        let stats = self.render();
        sink.present(self.frame, &self.buffer)?;
        tracing::trace!(frame = self.frame, hits = stats.hits, "Frame presented");

        self.frame += 1;
        self.scene.update(self.frame);
        Ok(stats)
    }

    /// Step until the sink stops pacing or `limit` frames have been shown.
    ///
    /// Returns the number of frames presented.
    pub fn run<S: GridSink + ?Sized>(
        &mut self,
        sink: &mut S,
        delay: Duration,
        limit: Option<u64>,
    ) -> io::Result<u64> {
        let mut presented = 0u64;
        tracing::debug!(start = self.frame, ?limit, "Animation started");

        while limit.map_or(true, |n| presented < n) {
            self.step(sink)?;
            presented += 1;
            if !sink.pace(delay)? {
                break;
            }
        }

        tracing::debug!(frames = presented, end = self.frame, "Animation stopped");
        Ok(presented)
    }
}
