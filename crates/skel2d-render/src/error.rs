use thiserror::Error;

/// Failures that stop a slot (or, under the abort policy, a frame) from
/// being drawn.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("attachment {attachment} in slot {slot} has no loaded texture")]
    UnresolvedTexture { slot: usize, attachment: String },

    #[error("mesh {attachment} in slot {slot} is malformed: {reason}")]
    MalformedMesh {
        slot: usize,
        attachment: String,
        reason: String,
    },

    #[error(transparent)]
    Sink(#[from] anyhow::Error),
}
