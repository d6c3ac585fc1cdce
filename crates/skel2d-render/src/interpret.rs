use skel2d_pose::{Attachment, BlendMode, ClippingAttachment, Color, SkeletonPose, Slot, TextureId};

use crate::error::RenderError;
use crate::geometry::Staging;
use crate::tint::resolve_tint;

/// Why a slot with an attachment produced no geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SkipReason {
    /// Slot alpha or resolved tint alpha is zero.
    Transparent,
    /// Owning bone is inactive or missing.
    InactiveBone,
    /// Mesh has more vertices than the configured cap.
    OversizedMesh,
}

/// What one slot contributes to the frame.
#[derive(Debug)]
pub(crate) enum SlotAction<'p> {
    /// No attachment. Not a clip boundary.
    Empty,
    Skip(SkipReason),
    ClipStart(&'p ClippingAttachment),
    /// Geometry is in the staging buffer.
    Draw {
        texture: TextureId,
        blend_mode: BlendMode,
        tint: [u8; 4],
    },
}

/// Classify a slot and, for drawable attachments, fill `staging` with its
/// world-space geometry.
pub(crate) fn interpret_slot<'p>(
    pose: &'p SkeletonPose,
    slot_index: usize,
    slot: &'p Slot,
    max_mesh_vertices: usize,
    staging: &mut Staging,
) -> Result<SlotAction<'p>, RenderError> {
    let Some(attachment) = &slot.attachment else {
        return Ok(SlotAction::Empty);
    };
    if slot.color.a == 0.0 {
        return Ok(SlotAction::Skip(SkipReason::Transparent));
    }
    let bone = match pose.slot_bone(slot) {
        Some(bone) if bone.active => bone,
        _ => return Ok(SlotAction::Skip(SkipReason::InactiveBone)),
    };

    if let Attachment::Clipping(clip) = attachment {
        return Ok(SlotAction::ClipStart(clip));
    }

    let attachment_color = attachment.color().unwrap_or(Color::WHITE);
    let tint = resolve_tint(pose.color, slot.color, attachment_color);
    if tint[3] == 0 {
        return Ok(SlotAction::Skip(SkipReason::Transparent));
    }
    if let Attachment::Mesh(mesh) = attachment
        && mesh.vertex_count() > max_mesh_vertices
    {
        return Ok(SlotAction::Skip(SkipReason::OversizedMesh));
    }
    let Some(texture) = attachment.texture() else {
        return Err(RenderError::UnresolvedTexture {
            slot: slot_index,
            attachment: attachment.name().to_string(),
        });
    };

    match attachment {
        Attachment::Region(region) => {
            staging.set_region(&region.world_vertices(bone), &region.uvs);
        }
        Attachment::Mesh(mesh) => {
            staging.set_mesh(pose, slot_index, mesh);
            staging
                .check()
                .map_err(|reason| RenderError::MalformedMesh {
                    slot: slot_index,
                    attachment: mesh.name.clone(),
                    reason,
                })?;
        }
        Attachment::Clipping(clip) => return Ok(SlotAction::ClipStart(clip)),
    }

    Ok(SlotAction::Draw {
        texture,
        blend_mode: slot.blend_mode,
        tint,
    })
}
