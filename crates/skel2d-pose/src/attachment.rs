use crate::bone::Bone;
use crate::color::Color;

/// Texture handle for referencing loaded atlas pages.
///
/// Only identity matters to the renderer: two attachments batch together
/// when their handles compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

/// Normalized texture coordinates of an atlas region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub u: f32,
    pub v: f32,
    pub u2: f32,
    pub v2: f32,
}

impl UvRect {
    pub const FULL: Self = Self {
        u: 0.0,
        v: 0.0,
        u2: 1.0,
        v2: 1.0,
    };
}

impl Default for UvRect {
    fn default() -> Self {
        Self::FULL
    }
}

/// Setup placement of a region quad relative to its bone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionGeometry {
    pub x: f32,
    pub y: f32,
    /// Degrees.
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub width: f32,
    pub height: f32,
}

impl RegionGeometry {
    /// A `width` x `height` quad centred on the bone origin.
    pub fn sized(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            width,
            height,
        }
    }
}

/// A textured quad attached to a single bone.
///
/// Corners are stored bottom-right, bottom-left, upper-left, upper-right;
/// `offsets` and `uvs` share that order.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionAttachment {
    pub name: String,
    pub color: Color,
    /// `None` while the atlas page is not loaded.
    pub texture: Option<TextureId>,
    pub offsets: [f32; 8],
    pub uvs: [f32; 8],
}

impl RegionAttachment {
    pub fn new(
        name: impl Into<String>,
        texture: Option<TextureId>,
        geometry: RegionGeometry,
        uv: UvRect,
    ) -> Self {
        Self {
            name: name.into(),
            color: Color::WHITE,
            texture,
            offsets: region_offsets(&geometry),
            uvs: [uv.u2, uv.v2, uv.u, uv.v2, uv.u, uv.v, uv.u2, uv.v],
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// World positions of the four corners, interleaved x/y.
    pub fn world_vertices(&self, bone: &Bone) -> [f32; 8] {
        let mut out = [0.0; 8];
        for corner in 0..4 {
            let (x, y) = bone.transform_point(self.offsets[corner * 2], self.offsets[corner * 2 + 1]);
            out[corner * 2] = x;
            out[corner * 2 + 1] = y;
        }
        out
    }
}

fn region_offsets(g: &RegionGeometry) -> [f32; 8] {
    let local_x = -g.width / 2.0 * g.scale_x;
    let local_y = -g.height / 2.0 * g.scale_y;
    let local_x2 = g.width / 2.0 * g.scale_x;
    let local_y2 = g.height / 2.0 * g.scale_y;
    let (sin, cos) = g.rotation.to_radians().sin_cos();

    let local_x_cos = local_x * cos + g.x;
    let local_x_sin = local_x * sin;
    let local_y_cos = local_y * cos + g.y;
    let local_y_sin = local_y * sin;
    let local_x2_cos = local_x2 * cos + g.x;
    let local_x2_sin = local_x2 * sin;
    let local_y2_cos = local_y2 * cos + g.y;
    let local_y2_sin = local_y2 * sin;

    [
        // bottom-right
        local_x2_cos - local_y_sin,
        local_y_cos + local_x2_sin,
        // bottom-left
        local_x_cos - local_y_sin,
        local_y_cos + local_x_sin,
        // upper-left
        local_x_cos - local_y2_sin,
        local_y2_cos + local_x_sin,
        // upper-right
        local_x2_cos - local_y2_sin,
        local_y2_cos + local_x2_sin,
    ]
}

/// One bone influence on a weighted mesh vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneWeight {
    pub bone: usize,
    /// Position in the influencing bone's space.
    pub x: f32,
    pub y: f32,
    pub weight: f32,
}

/// Setup vertices of a mesh or clipping polygon.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshVertices {
    /// Positions in the slot bone's space.
    Unweighted(Vec<[f32; 2]>),
    /// Per-vertex list of bone influences.
    Weighted(Vec<Vec<BoneWeight>>),
}

impl MeshVertices {
    pub fn len(&self) -> usize {
        match self {
            MeshVertices::Unweighted(v) => v.len(),
            MeshVertices::Weighted(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of interleaved x/y floats produced by skinning.
    pub fn world_vertices_length(&self) -> usize {
        self.len() * 2
    }
}

/// A deformable triangle mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshAttachment {
    pub name: String,
    pub color: Color,
    pub texture: Option<TextureId>,
    pub vertices: MeshVertices,
    /// Interleaved u/v, one pair per vertex.
    pub uvs: Vec<f32>,
    /// Triangle list indexing into `vertices`.
    pub triangles: Vec<u16>,
}

impl MeshAttachment {
    pub fn new(
        name: impl Into<String>,
        texture: Option<TextureId>,
        vertices: MeshVertices,
        uvs: Vec<f32>,
        triangles: Vec<u16>,
    ) -> Self {
        Self {
            name: name.into(),
            color: Color::WHITE,
            texture,
            vertices,
            uvs,
            triangles,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// A clip polygon. Not drawn; it masks the slots that follow it in draw
/// order up to and including `end_slot`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClippingAttachment {
    pub name: String,
    /// Slot index that closes the clip region. `None` clips until the end
    /// of the draw order.
    pub end_slot: Option<usize>,
    pub vertices: MeshVertices,
}

impl ClippingAttachment {
    pub fn new(name: impl Into<String>, end_slot: Option<usize>, vertices: MeshVertices) -> Self {
        Self {
            name: name.into(),
            end_slot,
            vertices,
        }
    }
}

/// The payload bound to a slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    Region(RegionAttachment),
    Mesh(MeshAttachment),
    Clipping(ClippingAttachment),
}

impl Attachment {
    pub fn name(&self) -> &str {
        match self {
            Attachment::Region(r) => &r.name,
            Attachment::Mesh(m) => &m.name,
            Attachment::Clipping(c) => &c.name,
        }
    }

    /// Tint of drawable attachments. Clipping attachments have none.
    pub fn color(&self) -> Option<Color> {
        match self {
            Attachment::Region(r) => Some(r.color),
            Attachment::Mesh(m) => Some(m.color),
            Attachment::Clipping(_) => None,
        }
    }

    /// Texture of drawable attachments; `None` for clipping attachments and
    /// for pages that are not loaded.
    pub fn texture(&self) -> Option<TextureId> {
        match self {
            Attachment::Region(r) => r.texture,
            Attachment::Mesh(m) => m.texture,
            Attachment::Clipping(_) => None,
        }
    }
}

impl From<RegionAttachment> for Attachment {
    fn from(value: RegionAttachment) -> Self {
        Attachment::Region(value)
    }
}

impl From<MeshAttachment> for Attachment {
    fn from(value: MeshAttachment) -> Self {
        Attachment::Mesh(value)
    }
}

impl From<ClippingAttachment> for Attachment {
    fn from(value: ClippingAttachment) -> Self {
        Attachment::Clipping(value)
    }
}
