use skel2d_pose::{MeshAttachment, SkeletonPose};

use crate::batch::MAX_RESERVED_VERTICES;
use crate::clipping::ClippedMesh;
use crate::effect::{EffectVertex, VertexEffect};
use crate::tint::{light_color, quantize};
use crate::vertex::Vertex;

/// Triangulation of a region quad (two triangles sharing the BR-UL diagonal).
pub const QUAD_TRIANGLES: [u16; 6] = [0, 1, 2, 2, 3, 0];

/// Indexed geometry for one slot, reused across slots and frames.
///
/// `colors` stays empty unless a vertex effect ran, in which case it holds
/// one color per vertex.
#[derive(Debug, Default)]
pub(crate) struct Staging {
    pub positions: Vec<f32>,
    pub uvs: Vec<f32>,
    pub triangles: Vec<u16>,
    pub colors: Vec<[u8; 4]>,
}

impl Staging {
    pub fn with_capacity(vertices: usize) -> Self {
        let vertices = vertices.min(MAX_RESERVED_VERTICES);
        Self {
            positions: Vec::with_capacity(vertices.saturating_mul(2)),
            uvs: Vec::with_capacity(vertices.saturating_mul(2)),
            triangles: Vec::with_capacity(vertices.saturating_mul(3)),
            colors: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.uvs.clear();
        self.triangles.clear();
        self.colors.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 2
    }

    pub fn set_region(&mut self, world: &[f32; 8], uvs: &[f32; 8]) {
        self.clear();
        self.positions.extend_from_slice(world);
        self.uvs.extend_from_slice(uvs);
        self.triangles.extend_from_slice(&QUAD_TRIANGLES);
    }

    pub fn set_mesh(&mut self, pose: &SkeletonPose, slot_index: usize, mesh: &MeshAttachment) {
        self.clear();
        pose.compute_world_vertices(slot_index, &mesh.vertices, &mut self.positions);
        self.uvs.extend_from_slice(&mesh.uvs);
        self.triangles.extend_from_slice(&mesh.triangles);
    }

    pub fn set_clipped(&mut self, clipped: &ClippedMesh<'_>) {
        self.clear();
        self.positions.extend_from_slice(clipped.vertices);
        self.uvs.extend_from_slice(clipped.uvs);
        self.triangles.extend_from_slice(clipped.triangles);
    }

    /// Checks that every index resolves to a position and a UV pair.
    pub fn check(&self) -> Result<(), String> {
        if self.positions.len() % 2 != 0 {
            return Err(format!("odd position count {}", self.positions.len()));
        }
        if self.uvs.len() != self.positions.len() {
            return Err(format!(
                "{} uv floats for {} position floats",
                self.uvs.len(),
                self.positions.len()
            ));
        }
        if self.triangles.len() % 3 != 0 {
            return Err(format!(
                "index count {} is not a multiple of 3",
                self.triangles.len()
            ));
        }
        let count = self.vertex_count();
        if let Some(&index) = self.triangles.iter().find(|&&i| usize::from(i) >= count) {
            return Err(format!("index {index} out of range for {count} vertices"));
        }
        Ok(())
    }

    /// Runs `effect` over every vertex and keeps the results, including a
    /// per-vertex color.
    pub fn apply_effect(&mut self, effect: &mut dyn VertexEffect, tint: [u8; 4]) {
        let light = light_color(tint);
        self.colors.clear();
        for (position, uv) in self
            .positions
            .chunks_exact_mut(2)
            .zip(self.uvs.chunks_exact_mut(2))
        {
            let mut vertex = EffectVertex {
                x: position[0],
                y: position[1],
                u: uv[0],
                v: uv[1],
                light,
                dark: skel2d_pose::Color::TRANSPARENT,
            };
            effect.transform(&mut vertex);
            position[0] = vertex.x;
            position[1] = vertex.y;
            uv[0] = vertex.u;
            uv[1] = vertex.v;
            self.colors.push(quantize(vertex.light));
        }
    }

    /// Expands the indexed geometry into a triangle list. Call [`check`]
    /// first; indices that do not resolve are dropped.
    ///
    /// [`check`]: Staging::check
    pub fn append_to(&self, out: &mut Vec<Vertex>, tint: [u8; 4]) -> usize {
        let before = out.len();
        out.reserve(self.triangles.len());
        for &index in &self.triangles {
            let i = usize::from(index);
            let (Some(position), Some(uv)) = (
                self.positions.get(i * 2..i * 2 + 2),
                self.uvs.get(i * 2..i * 2 + 2),
            ) else {
                continue;
            };
            out.push(Vertex {
                position: [position[0], position[1]],
                uv: [uv[0], uv[1]],
                color: self.colors.get(i).copied().unwrap_or(tint),
            });
        }
        out.len() - before
    }
}
