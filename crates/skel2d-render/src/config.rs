use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What to do when a region or mesh attachment has no loaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingTexturePolicy {
    /// Drop the slot's geometry and keep drawing.
    #[default]
    Skip,
    /// Stop the draw call and return the error.
    Abort,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DrawableConfig {
    /// Select the premultiplied variant of every blend family.
    pub premultiplied_alpha: bool,
    /// Meshes with more vertices than this are not drawn. Bounds the
    /// staging buffers.
    pub max_mesh_vertices: usize,
    /// Vertices reserved up front in the batch buffer.
    pub initial_vertex_capacity: usize,
    /// Multiplier applied to the delta passed to the animator.
    pub time_scale: f32,
    pub missing_texture: MissingTexturePolicy,
}

impl Default for DrawableConfig {
    fn default() -> Self {
        Self {
            premultiplied_alpha: false,
            max_mesh_vertices: 500,
            initial_vertex_capacity: 1000,
            time_scale: 1.0,
            missing_texture: MissingTexturePolicy::Skip,
        }
    }
}

impl DrawableConfig {
    /// Loads config from a specified path.
    /// Returns default config if file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a specified path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
