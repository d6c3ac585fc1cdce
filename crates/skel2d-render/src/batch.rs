use anyhow::Result;
use log::trace;
use skel2d_pose::TextureId;

use crate::blend::BlendConfig;
use crate::sink::RenderSink;
use crate::vertex::Vertex;

/// Most vertices any buffer reserves up front. Larger frames grow on demand.
pub(crate) const MAX_RESERVED_VERTICES: usize = 1 << 16;

/// Texture and blend state shared by every vertex in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchKey {
    pub texture: TextureId,
    pub blend: BlendConfig,
}

/// Accumulates triangle-list vertices and flushes them to a sink whenever
/// the batch key changes.
///
/// Only adjacent runs merge; a key seen again after a different key starts
/// a new batch so draw order is never changed.
#[derive(Debug, Default)]
pub struct Batcher {
    key: Option<BatchKey>,
    vertices: Vec<Vertex>,
    flushes: usize,
    flushed_vertices: usize,
}

impl Batcher {
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices.min(MAX_RESERVED_VERTICES)),
            ..Self::default()
        }
    }

    /// Reset for a new frame. Keeps the buffer allocation.
    pub fn begin(&mut self) {
        self.key = None;
        self.vertices.clear();
        self.flushes = 0;
        self.flushed_vertices = 0;
    }

    /// Make `key` current, flushing the pending batch if it differs.
    pub fn set_key(&mut self, key: BatchKey, sink: &mut dyn RenderSink) -> Result<()> {
        if self.key != Some(key) {
            self.flush(sink)?;
            self.key = Some(key);
        }
        Ok(())
    }

    /// Buffer that vertices for the current key are appended to.
    pub fn vertices_mut(&mut self) -> &mut Vec<Vertex> {
        &mut self.vertices
    }

    fn flush(&mut self, sink: &mut dyn RenderSink) -> Result<()> {
        let Some(key) = self.key else {
            return Ok(());
        };
        if self.vertices.is_empty() {
            return Ok(());
        }
        trace!(
            "flush batch: texture={:?} vertices={}",
            key.texture,
            self.vertices.len()
        );
        sink.flush(key.texture, key.blend, &self.vertices)?;
        self.flushes += 1;
        self.flushed_vertices += self.vertices.len();
        self.vertices.clear();
        Ok(())
    }

    /// Flush whatever is pending and forget the key.
    pub fn finish(&mut self, sink: &mut dyn RenderSink) -> Result<()> {
        self.flush(sink)?;
        self.key = None;
        Ok(())
    }

    /// Drop the pending batch without flushing it.
    pub fn discard(&mut self) {
        self.vertices.clear();
        self.key = None;
    }

    /// Batches flushed since `begin`.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Vertices flushed since `begin`.
    pub fn flushed_vertices(&self) -> usize {
        self.flushed_vertices
    }
}
