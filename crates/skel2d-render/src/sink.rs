use std::collections::HashSet;

use anyhow::{Result, anyhow};
use serde::Serialize;
use skel2d_pose::TextureId;

use crate::blend::BlendConfig;
use crate::vertex::Vertex;

/// Receives finished batches. One call per draw call; vertices form a
/// triangle list in draw order.
pub trait RenderSink {
    fn flush(&mut self, texture: TextureId, blend: BlendConfig, vertices: &[Vertex]) -> Result<()>;
}

/// Recorded batch for testing.
#[derive(Debug, Clone, PartialEq)]
pub struct FlushCommand {
    pub texture: TextureId,
    pub blend: BlendConfig,
    pub vertices: Vec<Vertex>,
}

#[derive(Serialize)]
struct FlushRecord<'a> {
    texture: u64,
    blend: BlendConfig,
    vertices: &'a [Vertex],
}

/// A RenderSink that records every flush for snapshot testing.
/// Does not require a GPU.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<FlushCommand>,
    known_textures: Option<HashSet<TextureId>>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded flushes.
    pub fn commands(&self) -> &[FlushCommand] {
        &self.commands
    }

    /// Clear recorded flushes.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Register a texture. Once any texture is registered, flushes for
    /// unregistered textures fail.
    pub fn register_texture(&mut self, id: TextureId) {
        self.known_textures.get_or_insert_with(HashSet::new).insert(id);
    }

    /// Total vertices across all recorded flushes.
    pub fn vertex_count(&self) -> usize {
        self.commands.iter().map(|c| c.vertices.len()).sum()
    }

    /// Recorded flushes as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        let records: Vec<FlushRecord<'_>> = self
            .commands
            .iter()
            .map(|c| FlushRecord {
                texture: c.texture.0,
                blend: c.blend,
                vertices: &c.vertices,
            })
            .collect();
        Ok(serde_json::to_string_pretty(&records)?)
    }
}

impl RenderSink for CommandRecorder {
    fn flush(&mut self, texture: TextureId, blend: BlendConfig, vertices: &[Vertex]) -> Result<()> {
        if let Some(known) = &self.known_textures
            && !known.contains(&texture)
        {
            return Err(anyhow!("unknown texture: {:?}", texture));
        }
        self.commands.push(FlushCommand {
            texture,
            blend,
            vertices: vertices.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blend::blend_config;
    use skel2d_pose::BlendMode;

    fn vertex(x: f32) -> Vertex {
        Vertex {
            position: [x, 0.0],
            uv: [0.0, 0.0],
            color: [255, 255, 255, 255],
        }
    }

    #[test]
    fn test_records_flushes_in_order() {
        let mut recorder = CommandRecorder::new();
        let normal = blend_config(BlendMode::Normal, false);
        recorder.flush(TextureId(1), normal, &[vertex(1.0)]).unwrap();
        recorder
            .flush(TextureId(2), normal, &[vertex(2.0), vertex(3.0)])
            .unwrap();

        assert_eq!(recorder.commands().len(), 2);
        assert_eq!(recorder.commands()[0].texture, TextureId(1));
        assert_eq!(recorder.commands()[1].vertices.len(), 2);
        assert_eq!(recorder.vertex_count(), 3);
    }

    #[test]
    fn test_unknown_texture_rejected_once_registered() {
        let mut recorder = CommandRecorder::new();
        let normal = blend_config(BlendMode::Normal, false);
        recorder.flush(TextureId(9), normal, &[vertex(0.0)]).unwrap();

        recorder.register_texture(TextureId(1));
        assert!(recorder.flush(TextureId(9), normal, &[vertex(0.0)]).is_err());
        assert!(recorder.flush(TextureId(1), normal, &[vertex(0.0)]).is_ok());
    }

    #[test]
    fn test_clear_commands() {
        let mut recorder = CommandRecorder::new();
        recorder
            .flush(TextureId(1), blend_config(BlendMode::Screen, true), &[vertex(0.0)])
            .unwrap();
        recorder.clear_commands();
        assert!(recorder.commands().is_empty());
    }

    #[test]
    fn test_to_json() {
        let mut recorder = CommandRecorder::new();
        recorder
            .flush(TextureId(4), blend_config(BlendMode::Additive, false), &[vertex(1.5)])
            .unwrap();
        let json = recorder.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["texture"], 4);
        assert_eq!(value[0]["blend"]["color"]["dst_factor"], "One");
        assert_eq!(value[0]["vertices"][0]["position"][0], 1.5);
    }
}
