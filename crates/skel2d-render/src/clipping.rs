//! Interface to the polygon clipper.
//!
//! The drawable only tracks when clip regions open and close; the clipping
//! itself is done by whatever implements [`ClipTracker`].

/// A clip region opened by a clipping attachment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRegion<'a> {
    /// Slot whose `clip_end` closes the region. `None` means the region stays
    /// open until `clip_end_all`.
    pub end_slot: Option<usize>,
    /// World-space polygon, interleaved x/y.
    pub polygon: &'a [f32],
}

/// Triangles produced by clipping one slot's geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClippedMesh<'a> {
    /// Interleaved x/y.
    pub vertices: &'a [f32],
    /// Interleaved u/v, one pair per vertex.
    pub uvs: &'a [f32],
    pub triangles: &'a [u16],
}

/// Tracks open clip regions and clips triangles against them.
///
/// The drawable calls `clip_start` for every visible clipping attachment,
/// `clip_end` after every slot it skips or draws, and `clip_end_all` once
/// after the last slot. `clip_triangles` is only called while
/// `is_clipping` returns true.
pub trait ClipTracker {
    fn clip_start(&mut self, slot: usize, region: ClipRegion<'_>);
    fn clip_end(&mut self, slot: usize);
    fn clip_end_all(&mut self);
    fn is_clipping(&self) -> bool;
    fn clip_triangles<'a>(
        &'a mut self,
        vertices: &'a [f32],
        triangles: &'a [u16],
        uvs: &'a [f32],
    ) -> ClippedMesh<'a>;
}

/// Tracker for renderers without clipping support: clip attachments are
/// ignored and geometry passes through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipping;

impl ClipTracker for NoClipping {
    fn clip_start(&mut self, _slot: usize, _region: ClipRegion<'_>) {}

    fn clip_end(&mut self, _slot: usize) {}

    fn clip_end_all(&mut self) {}

    fn is_clipping(&self) -> bool {
        false
    }

    fn clip_triangles<'a>(
        &'a mut self,
        vertices: &'a [f32],
        triangles: &'a [u16],
        uvs: &'a [f32],
    ) -> ClippedMesh<'a> {
        ClippedMesh {
            vertices,
            uvs,
            triangles,
        }
    }
}
