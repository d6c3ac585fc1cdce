use log::{debug, warn};
use skel2d_pose::SkeletonPose;

use crate::batch::{BatchKey, Batcher};
use crate::blend::BlendTable;
use crate::clipping::{ClipRegion, ClipTracker};
use crate::config::{DrawableConfig, MissingTexturePolicy};
use crate::effect::VertexEffect;
use crate::error::RenderError;
use crate::geometry::Staging;
use crate::interpret::{SkipReason, SlotAction, interpret_slot};
use crate::sink::RenderSink;

/// Advances a pose by a time step. Animation itself lives outside this
/// crate; any `FnMut(&mut SkeletonPose, f32)` works.
pub trait PoseAnimator {
    fn advance(&mut self, pose: &mut SkeletonPose, delta: f32);
}

impl<F> PoseAnimator for F
where
    F: FnMut(&mut SkeletonPose, f32),
{
    fn advance(&mut self, pose: &mut SkeletonPose, delta: f32) {
        self(pose, delta)
    }
}

/// Counters for one `draw` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Sink flushes issued.
    pub batches: usize,
    /// Vertices handed to the sink.
    pub vertices: usize,
    pub slots_rendered: usize,
    /// Slots with an attachment that produced no geometry, for any reason.
    pub slots_skipped: usize,
    pub oversized_meshes: usize,
    pub missing_textures: usize,
}

/// Turns a resolved skeleton pose into batched triangle lists.
///
/// Owns the staging and batch buffers; they are cleared, not freed, between
/// frames. Each instance must be driven from one thread at a time.
pub struct SkeletonDrawable {
    config: DrawableConfig,
    blend_table: BlendTable,
    vertex_effect: Option<Box<dyn VertexEffect>>,
    source: Staging,
    clipped: Staging,
    clip_polygon: Vec<f32>,
    batcher: Batcher,
}

impl Default for SkeletonDrawable {
    fn default() -> Self {
        Self::new(DrawableConfig::default())
    }
}

impl SkeletonDrawable {
    pub fn new(config: DrawableConfig) -> Self {
        Self {
            blend_table: BlendTable::new(config.premultiplied_alpha),
            vertex_effect: None,
            source: Staging::with_capacity(config.max_mesh_vertices),
            clipped: Staging::with_capacity(config.max_mesh_vertices),
            clip_polygon: Vec::new(),
            batcher: Batcher::with_capacity(config.initial_vertex_capacity),
            config,
        }
    }

    pub fn config(&self) -> &DrawableConfig {
        &self.config
    }

    pub fn set_premultiplied_alpha(&mut self, premultiplied_alpha: bool) {
        self.config.premultiplied_alpha = premultiplied_alpha;
        self.blend_table = BlendTable::new(premultiplied_alpha);
    }

    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.config.time_scale = time_scale;
    }

    /// Install or remove the vertex effect, returning the previous one.
    pub fn set_vertex_effect(
        &mut self,
        effect: Option<Box<dyn VertexEffect>>,
    ) -> Option<Box<dyn VertexEffect>> {
        std::mem::replace(&mut self.vertex_effect, effect)
    }

    pub fn vertex_effect_mut(&mut self) -> Option<&mut (dyn VertexEffect + 'static)> {
        self.vertex_effect.as_deref_mut()
    }

    /// Advance the pose by `delta` seconds scaled by the configured time
    /// scale.
    pub fn update(&self, pose: &mut SkeletonPose, animator: &mut dyn PoseAnimator, delta: f32) {
        animator.advance(pose, delta * self.config.time_scale);
    }

    /// Render one frame.
    ///
    /// Returns without touching the clipper, effect or sink when the
    /// skeleton alpha is zero. On error the pending batch is dropped, every
    /// clip region is closed and the effect is ended before returning.
    pub fn draw(
        &mut self,
        pose: &SkeletonPose,
        clipper: &mut dyn ClipTracker,
        sink: &mut dyn RenderSink,
    ) -> Result<DrawStats, RenderError> {
        let mut stats = DrawStats::default();
        if pose.color.a == 0.0 {
            return Ok(stats);
        }

        self.batcher.begin();
        if let Some(effect) = self.vertex_effect.as_mut() {
            effect.begin(pose);
        }

        let result = self
            .draw_slots(pose, clipper, sink, &mut stats)
            .and_then(|()| self.batcher.finish(sink).map_err(RenderError::from));
        if result.is_err() {
            self.batcher.discard();
        }

        clipper.clip_end_all();
        if let Some(effect) = self.vertex_effect.as_mut() {
            effect.end();
        }

        stats.batches = self.batcher.flushes();
        stats.vertices = self.batcher.flushed_vertices();
        match result {
            Ok(()) => Ok(stats),
            Err(err) => {
                warn!("draw aborted after {} batches: {}", stats.batches, err);
                Err(err)
            }
        }
    }

    fn draw_slots(
        &mut self,
        pose: &SkeletonPose,
        clipper: &mut dyn ClipTracker,
        sink: &mut dyn RenderSink,
        stats: &mut DrawStats,
    ) -> Result<(), RenderError> {
        let Self {
            config,
            blend_table,
            vertex_effect,
            source,
            clipped,
            clip_polygon,
            batcher,
        } = self;

        for (slot_index, slot) in pose.draw_order_slots() {
            let action = match interpret_slot(
                pose,
                slot_index,
                slot,
                config.max_mesh_vertices,
                source,
            ) {
                Ok(action) => action,
                Err(RenderError::UnresolvedTexture { attachment, .. })
                    if config.missing_texture == MissingTexturePolicy::Skip =>
                {
                    debug!("slot {}: {} has no texture, skipped", slot.name, attachment);
                    stats.missing_textures += 1;
                    stats.slots_skipped += 1;
                    clipper.clip_end(slot_index);
                    continue;
                }
                Err(err) => return Err(err),
            };

            match action {
                SlotAction::Empty => {}
                SlotAction::Skip(reason) => {
                    if reason == SkipReason::OversizedMesh {
                        debug!(
                            "slot {}: mesh exceeds {} vertices, skipped",
                            slot.name, config.max_mesh_vertices
                        );
                        stats.oversized_meshes += 1;
                    }
                    stats.slots_skipped += 1;
                    clipper.clip_end(slot_index);
                }
                SlotAction::ClipStart(clip) => {
                    pose.compute_world_vertices(slot_index, &clip.vertices, clip_polygon);
                    clipper.clip_start(
                        slot_index,
                        ClipRegion {
                            end_slot: clip.end_slot,
                            polygon: clip_polygon,
                        },
                    );
                }
                SlotAction::Draw {
                    texture,
                    blend_mode,
                    tint,
                } => {
                    let staging = if clipper.is_clipping() {
                        let mesh =
                            clipper.clip_triangles(&source.positions, &source.triangles, &source.uvs);
                        clipped.set_clipped(&mesh);
                        clipped
                            .check()
                            .map_err(|reason| RenderError::MalformedMesh {
                                slot: slot_index,
                                attachment: slot
                                    .attachment
                                    .as_ref()
                                    .map_or("", |a| a.name())
                                    .to_string(),
                                reason: format!("after clipping: {reason}"),
                            })?;
                        &mut *clipped
                    } else {
                        &mut *source
                    };

                    if let Some(effect) = vertex_effect.as_deref_mut() {
                        staging.apply_effect(effect, tint);
                    }
                    if !staging.triangles.is_empty() {
                        let key = BatchKey {
                            texture,
                            blend: blend_table.get(blend_mode),
                        };
                        batcher.set_key(key, sink)?;
                        staging.append_to(batcher.vertices_mut(), tint);
                    }
                    stats.slots_rendered += 1;
                    clipper.clip_end(slot_index);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipping::NoClipping;
    use crate::sink::CommandRecorder;
    use skel2d_pose::{
        Bone, Color, MeshAttachment, MeshVertices, RegionAttachment, RegionGeometry, Slot,
        TextureId, UvRect,
    };

    fn quad(texture: Option<TextureId>) -> RegionAttachment {
        RegionAttachment::new("quad", texture, RegionGeometry::sized(4.0, 4.0), UvRect::FULL)
    }

    fn two_slot_pose() -> SkeletonPose {
        let mut pose = SkeletonPose::new();
        let bone = pose.add_bone(Bone::IDENTITY);
        pose.add_slot(Slot::new("a", bone).with_attachment(quad(Some(TextureId(1)))));
        pose.add_slot(Slot::new("b", bone).with_attachment(quad(Some(TextureId(1)))));
        pose
    }

    #[test]
    fn test_draw_counts() {
        let pose = two_slot_pose();
        let mut drawable = SkeletonDrawable::default();
        let mut recorder = CommandRecorder::new();
        let stats = drawable.draw(&pose, &mut NoClipping, &mut recorder).unwrap();

        assert_eq!(stats.batches, 1);
        assert_eq!(stats.vertices, 12);
        assert_eq!(stats.slots_rendered, 2);
        assert_eq!(stats.slots_skipped, 0);
        assert_eq!(recorder.vertex_count(), 12);
    }

    #[test]
    fn test_zero_skeleton_alpha_draws_nothing() {
        let mut pose = two_slot_pose();
        pose.color = Color::WHITE.with_alpha(0.0);
        let mut drawable = SkeletonDrawable::default();
        let mut recorder = CommandRecorder::new();
        let stats = drawable.draw(&pose, &mut NoClipping, &mut recorder).unwrap();

        assert_eq!(stats, DrawStats::default());
        assert!(recorder.commands().is_empty());
    }

    #[test]
    fn test_buffers_reused_between_frames() {
        let pose = two_slot_pose();
        let mut drawable = SkeletonDrawable::default();
        let mut recorder = CommandRecorder::new();
        drawable.draw(&pose, &mut NoClipping, &mut recorder).unwrap();
        drawable.draw(&pose, &mut NoClipping, &mut recorder).unwrap();

        let commands = recorder.commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0], commands[1]);
    }

    #[test]
    fn test_premultiplied_switch() {
        let pose = two_slot_pose();
        let mut drawable = SkeletonDrawable::default();
        drawable.set_premultiplied_alpha(true);
        assert!(drawable.config().premultiplied_alpha);

        let mut recorder = CommandRecorder::new();
        drawable.draw(&pose, &mut NoClipping, &mut recorder).unwrap();
        assert_eq!(
            recorder.commands()[0].blend,
            crate::blend::blend_config(skel2d_pose::BlendMode::Normal, true)
        );
    }

    #[test]
    fn test_malformed_mesh_aborts_even_under_skip_policy() {
        let mut pose = two_slot_pose();
        let mesh = MeshAttachment::new(
            "broken",
            Some(TextureId(1)),
            MeshVertices::Unweighted(vec![[0.0, 0.0], [1.0, 0.0]]),
            vec![0.0, 0.0, 1.0, 0.0],
            vec![0, 1, 2],
        );
        pose.add_slot(Slot::new("c", 0).with_attachment(mesh));

        let mut drawable = SkeletonDrawable::default();
        let mut recorder = CommandRecorder::new();
        let err = drawable
            .draw(&pose, &mut NoClipping, &mut recorder)
            .unwrap_err();
        assert!(matches!(err, RenderError::MalformedMesh { slot: 2, .. }));
        assert!(recorder.commands().is_empty());
    }

    #[test]
    fn test_unbounded_capacities_from_json_still_draw() {
        let config: DrawableConfig = serde_json::from_str(
            r#"{"max_mesh_vertices": 18446744073709551615, "initial_vertex_capacity": 18446744073709551615}"#,
        )
        .unwrap();
        assert_eq!(config.max_mesh_vertices, usize::MAX);

        let mut pose = SkeletonPose::new();
        let bone = pose.add_bone(Bone::IDENTITY);
        let mesh = MeshAttachment::new(
            "tri",
            Some(TextureId(1)),
            MeshVertices::Unweighted(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]),
            vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            vec![0, 1, 2],
        );
        pose.add_slot(Slot::new("mesh", bone).with_attachment(mesh));

        let mut drawable = SkeletonDrawable::new(config);
        let mut recorder = CommandRecorder::new();
        let stats = drawable.draw(&pose, &mut NoClipping, &mut recorder).unwrap();
        assert_eq!(stats.slots_rendered, 1);
        assert_eq!(recorder.vertex_count(), 3);
    }

    #[test]
    fn test_update_scales_delta() {
        let mut pose = SkeletonPose::new();
        let mut drawable = SkeletonDrawable::default();
        drawable.set_time_scale(0.5);

        let mut seen = Vec::new();
        let mut animator = |pose: &mut SkeletonPose, delta: f32| {
            pose.x += delta;
            seen.push(delta);
        };
        drawable.update(&mut pose, &mut animator, 0.2);
        drawable.update(&mut pose, &mut animator, 0.2);

        assert!((pose.x - 0.2).abs() < 1e-6);
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_set_vertex_effect_returns_previous() {
        let mut drawable = SkeletonDrawable::default();
        assert!(drawable.vertex_effect_mut().is_none());
        let previous =
            drawable.set_vertex_effect(Some(Box::new(crate::effect::SwirlVertexEffect::new(10.0))));
        assert!(previous.is_none());
        assert!(drawable.vertex_effect_mut().is_some());
        assert!(drawable.set_vertex_effect(None).is_some());
    }
}
