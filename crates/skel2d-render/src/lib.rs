//! Converts a resolved 2D skeleton pose into batched textured triangles.
//!
//! [`SkeletonDrawable::draw`] walks the slots in draw order, turns each
//! region or mesh attachment into world-space geometry, runs it through the
//! active clip region and the optional vertex effect, and hands contiguous
//! runs that share a texture and blend configuration to a [`RenderSink`].

pub mod batch;
pub mod blend;
pub mod clipping;
pub mod config;
pub mod drawable;
pub mod effect;
pub mod error;
mod geometry;
pub mod interpolation;
mod interpret;
pub mod sink;
pub mod tint;
pub mod vertex;

pub use batch::{BatchKey, Batcher};
pub use blend::{BlendConfig, BlendFactor, BlendTable, blend_config};
pub use clipping::{ClipRegion, ClipTracker, ClippedMesh, NoClipping};
pub use config::{DrawableConfig, MissingTexturePolicy};
pub use drawable::{DrawStats, PoseAnimator, SkeletonDrawable};
pub use effect::{EffectVertex, JitterVertexEffect, SwirlVertexEffect, VertexEffect};
pub use error::RenderError;
pub use geometry::QUAD_TRIANGLES;
pub use interpolation::{Interpolation, ping_pong};
pub use sink::{CommandRecorder, FlushCommand, RenderSink};
pub use vertex::Vertex;
