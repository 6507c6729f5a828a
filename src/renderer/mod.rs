//! WebGPU rendering module
//!
//! Draws read-only frame snapshots as colored triangles. The simulation never
//! depends on anything here.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;

use crate::sim::FrameSnapshot;

/// Anything that can present a frame
pub trait RenderSink {
    fn draw(&mut self, snapshot: &FrameSnapshot);
}

/// Render sink that only counts frames (headless runs and tests)
#[derive(Debug, Default, Clone)]
pub struct FrameCounter {
    pub frames: u64,
    pub last: Option<FrameSnapshot>,
}

impl RenderSink for FrameCounter {
    fn draw(&mut self, snapshot: &FrameSnapshot) {
        self.frames += 1;
        self.last = Some(snapshot.clone());
    }
}
