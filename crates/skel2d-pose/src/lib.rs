//! Resolved skeleton pose consumed by the renderer.
//!
//! Everything here is read-only from the renderer's point of view: bones
//! already carry their world affine transform, slots already carry their
//! animated tint and attachment, and the draw order is already sorted.
//! Computing those values (animation timelines, constraints) happens
//! elsewhere.

pub mod attachment;
pub mod bone;
pub mod color;
pub mod skeleton;
pub mod slot;

pub use attachment::{
    Attachment, BoneWeight, ClippingAttachment, MeshAttachment, MeshVertices, RegionAttachment,
    RegionGeometry, TextureId, UvRect,
};
pub use bone::Bone;
pub use color::Color;
pub use skeleton::SkeletonPose;
pub use slot::{BlendMode, Slot};
