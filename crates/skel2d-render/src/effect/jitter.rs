use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skel2d_pose::SkeletonPose;

use super::{EffectVertex, VertexEffect};

/// Shakes every vertex by a random offset in `[-|jitter|, |jitter|]`, biased
/// towards zero. The sign of the jitter amount is ignored.
#[derive(Debug, Clone)]
pub struct JitterVertexEffect {
    pub jitter_x: f32,
    pub jitter_y: f32,
    rng: StdRng,
}

impl JitterVertexEffect {
    pub fn new(jitter_x: f32, jitter_y: f32) -> Self {
        Self {
            jitter_x,
            jitter_y,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence for reproducible frames.
    pub fn with_seed(jitter_x: f32, jitter_y: f32, seed: u64) -> Self {
        Self {
            jitter_x,
            jitter_y,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

/// Triangular distribution over `[min, max]` peaking at the midpoint.
fn random_triangular(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    let d = max - min;
    if d <= 0.0 {
        return min;
    }
    let mode = (min + max) / 2.0;
    let u: f32 = rng.gen_range(0.0..1.0);
    if u <= (mode - min) / d {
        min + (u * d * (mode - min)).sqrt()
    } else {
        max - ((1.0 - u) * d * (max - mode)).sqrt()
    }
}

impl VertexEffect for JitterVertexEffect {
    fn begin(&mut self, _pose: &SkeletonPose) {}

    fn transform(&mut self, vertex: &mut EffectVertex) {
        let (jx, jy) = (self.jitter_x.abs(), self.jitter_y.abs());
        vertex.x += random_triangular(&mut self.rng, -jx, jx);
        vertex.y += random_triangular(&mut self.rng, -jy, jy);
    }

    fn end(&mut self) {}
}
