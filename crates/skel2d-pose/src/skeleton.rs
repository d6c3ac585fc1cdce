use log::warn;

use crate::attachment::MeshVertices;
use crate::bone::Bone;
use crate::color::Color;
use crate::slot::Slot;

/// A fully resolved skeleton pose for one frame.
///
/// Bone world transforms, slot tints, attachments and draw order must be
/// final before the pose is handed to a renderer; nothing here mutates
/// during a draw.
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonPose {
    pub bones: Vec<Bone>,
    pub slots: Vec<Slot>,
    /// Slot indices in compositing order.
    pub draw_order: Vec<usize>,
    /// Skeleton-wide tint.
    pub color: Color,
    /// Skeleton root position in world space.
    pub x: f32,
    pub y: f32,
}

impl Default for SkeletonPose {
    fn default() -> Self {
        Self {
            bones: Vec::new(),
            slots: Vec::new(),
            draw_order: Vec::new(),
            color: Color::WHITE,
            x: 0.0,
            y: 0.0,
        }
    }
}

impl SkeletonPose {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bone, returning its index.
    pub fn add_bone(&mut self, bone: Bone) -> usize {
        self.bones.push(bone);
        self.bones.len() - 1
    }

    /// Append a slot at the end of the draw order, returning its index.
    pub fn add_slot(&mut self, slot: Slot) -> usize {
        self.slots.push(slot);
        let index = self.slots.len() - 1;
        self.draw_order.push(index);
        index
    }

    pub fn slot_bone(&self, slot: &Slot) -> Option<&Bone> {
        self.bones.get(slot.bone)
    }

    /// Slots in draw order, paired with their slot index.
    ///
    /// Draw-order entries that do not name a slot are skipped.
    pub fn draw_order_slots(&self) -> impl Iterator<Item = (usize, &Slot)> + '_ {
        self.draw_order
            .iter()
            .filter_map(|&index| self.slots.get(index).map(|slot| (index, slot)))
    }

    /// Skin `vertices` for the slot at `slot_index` into interleaved world
    /// x/y pairs.
    ///
    /// `out` is cleared first. Unweighted vertices use the slot's bone and
    /// are replaced by the slot deform when one is present; weighted
    /// vertices add the deform to each influence before blending. A missing
    /// slot or slot bone leaves `out` empty.
    pub fn compute_world_vertices(
        &self,
        slot_index: usize,
        vertices: &MeshVertices,
        out: &mut Vec<f32>,
    ) {
        out.clear();
        let Some(slot) = self.slots.get(slot_index) else {
            return;
        };
        let deform = slot.deform.as_slice();
        out.reserve(vertices.world_vertices_length());

        match vertices {
            MeshVertices::Unweighted(setup) => {
                let Some(bone) = self.slot_bone(slot) else {
                    warn!("slot {} references missing bone {}", slot.name, slot.bone);
                    return;
                };
                let use_deform = deform.len() >= setup.len() * 2;
                for (i, p) in setup.iter().enumerate() {
                    let (vx, vy) = if use_deform {
                        (deform[i * 2], deform[i * 2 + 1])
                    } else {
                        (p[0], p[1])
                    };
                    let (x, y) = bone.transform_point(vx, vy);
                    out.push(x);
                    out.push(y);
                }
            }
            MeshVertices::Weighted(setup) => {
                let mut f = 0usize;
                for influences in setup {
                    let mut wx = 0.0f32;
                    let mut wy = 0.0f32;
                    for weight in influences {
                        let dx = deform.get(f).copied().unwrap_or(0.0);
                        let dy = deform.get(f + 1).copied().unwrap_or(0.0);
                        f += 2;
                        let Some(bone) = self.bones.get(weight.bone) else {
                            continue;
                        };
                        let (x, y) = bone.transform_point(weight.x + dx, weight.y + dy);
                        wx += x * weight.weight;
                        wy += y * weight.weight;
                    }
                    out.push(wx);
                    out.push(wy);
                }
            }
        }
    }
}
