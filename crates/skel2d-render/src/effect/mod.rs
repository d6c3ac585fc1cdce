//! Per-vertex procedural deformation applied after clipping and before
//! batching.

mod jitter;
mod swirl;

pub use jitter::JitterVertexEffect;
pub use swirl::SwirlVertexEffect;

use skel2d_pose::{Color, SkeletonPose};

/// One vertex as seen by a [`VertexEffect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectVertex {
    pub x: f32,
    pub y: f32,
    pub u: f32,
    pub v: f32,
    /// Resolved tint.
    pub light: Color,
    /// Second tint color for two-color tinting. Always transparent black
    /// here; effects may read it but changes are ignored.
    pub dark: Color,
}

/// A per-vertex transform bracketed by `begin`/`end` once per draw call.
///
/// `transform` sees every unique vertex of every drawn slot exactly once.
/// Changes to position, UV and light color are what gets batched.
pub trait VertexEffect {
    fn begin(&mut self, pose: &SkeletonPose);
    fn transform(&mut self, vertex: &mut EffectVertex);
    fn end(&mut self);
}
