#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use skel2d_pose::{
    Bone, Color, MeshVertices, RegionAttachment, RegionGeometry, SkeletonPose, TextureId, UvRect,
};
use skel2d_render::{ClipRegion, ClipTracker, ClippedMesh, EffectVertex, VertexEffect};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn quad(name: &str, texture: u64) -> RegionAttachment {
    RegionAttachment::new(
        name,
        Some(TextureId(texture)),
        RegionGeometry::sized(2.0, 2.0),
        UvRect::FULL,
    )
}

pub fn triangle_polygon() -> MeshVertices {
    MeshVertices::Unweighted(vec![[-10.0, -10.0], [10.0, -10.0], [0.0, 10.0]])
}

/// Pose with one identity bone and no slots.
pub fn pose() -> SkeletonPose {
    let mut pose = SkeletonPose::new();
    pose.add_bone(Bone::IDENTITY);
    pose
}

/// Clip tracker fake with one level of clipping, like the runtime clipper:
/// a second `clip_start` while a region is open is ignored and a region
/// closes when `clip_end` names its end slot.
#[derive(Debug, Default)]
pub struct RecordingClipper {
    /// Slots passed to an effective `clip_start`.
    pub starts: Vec<usize>,
    /// Every slot passed to `clip_end`.
    pub end_calls: Vec<usize>,
    pub end_all_calls: usize,
    /// Regions actually closed, by `clip_end` or `clip_end_all`.
    pub closed: usize,
    pub clip_calls: usize,
    /// Polygon of the most recent region.
    pub polygon: Vec<f32>,
    /// Keep only the first triangle of clipped geometry.
    pub keep_first_triangle: bool,
    active: Option<Option<usize>>,
}

impl RecordingClipper {
    pub fn keeping_first_triangle() -> Self {
        Self {
            keep_first_triangle: true,
            ..Self::default()
        }
    }
}

impl ClipTracker for RecordingClipper {
    fn clip_start(&mut self, slot: usize, region: ClipRegion<'_>) {
        if self.active.is_some() {
            return;
        }
        self.active = Some(region.end_slot);
        self.starts.push(slot);
        self.polygon = region.polygon.to_vec();
    }

    fn clip_end(&mut self, slot: usize) {
        self.end_calls.push(slot);
        if let Some(Some(end_slot)) = self.active
            && end_slot == slot
        {
            self.active = None;
            self.closed += 1;
        }
    }

    fn clip_end_all(&mut self) {
        self.end_all_calls += 1;
        if self.active.take().is_some() {
            self.closed += 1;
        }
    }

    fn is_clipping(&self) -> bool {
        self.active.is_some()
    }

    fn clip_triangles<'a>(
        &'a mut self,
        vertices: &'a [f32],
        triangles: &'a [u16],
        uvs: &'a [f32],
    ) -> ClippedMesh<'a> {
        self.clip_calls += 1;
        let triangles = if self.keep_first_triangle {
            &triangles[..triangles.len().min(3)]
        } else {
            triangles
        };
        ClippedMesh {
            vertices,
            uvs,
            triangles,
        }
    }
}

/// Calls observed by a [`LoggingEffect`].
#[derive(Debug, Default)]
pub struct EffectLog {
    pub begins: usize,
    pub ends: usize,
    pub transforms: usize,
    pub darks: Vec<Color>,
}

/// Effect that records its calls and optionally rewrites UVs.
pub struct LoggingEffect {
    pub log: Rc<RefCell<EffectLog>>,
    pub set_uv: Option<(f32, f32)>,
}

impl LoggingEffect {
    pub fn new() -> (Self, Rc<RefCell<EffectLog>>) {
        let log = Rc::new(RefCell::new(EffectLog::default()));
        (
            Self {
                log: Rc::clone(&log),
                set_uv: None,
            },
            log,
        )
    }
}

impl VertexEffect for LoggingEffect {
    fn begin(&mut self, _pose: &SkeletonPose) {
        self.log.borrow_mut().begins += 1;
    }

    fn transform(&mut self, vertex: &mut EffectVertex) {
        let mut log = self.log.borrow_mut();
        log.transforms += 1;
        log.darks.push(vertex.dark);
        if let Some((u, v)) = self.set_uv {
            vertex.u = u;
            vertex.v = v;
        }
    }

    fn end(&mut self) {
        self.log.borrow_mut().ends += 1;
    }
}
