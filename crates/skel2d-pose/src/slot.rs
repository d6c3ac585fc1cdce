use crate::attachment::Attachment;
use crate::color::Color;

/// Blend family declared by a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    #[default]
    Normal,
    Additive,
    Multiply,
    Screen,
}

impl BlendMode {
    pub const ALL: [BlendMode; 4] = [
        BlendMode::Normal,
        BlendMode::Additive,
        BlendMode::Multiply,
        BlendMode::Screen,
    ];
}

/// A draw-order position holding zero or one attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub name: String,
    /// Index into the skeleton's bone list.
    pub bone: usize,
    pub color: Color,
    pub blend_mode: BlendMode,
    pub attachment: Option<Attachment>,
    /// Animated vertex offsets for the current mesh attachment. Empty when
    /// the attachment is not deformed.
    pub deform: Vec<f32>,
}

impl Slot {
    pub fn new(name: impl Into<String>, bone: usize) -> Self {
        Self {
            name: name.into(),
            bone,
            color: Color::WHITE,
            blend_mode: BlendMode::Normal,
            attachment: None,
            deform: Vec::new(),
        }
    }

    pub fn with_attachment(mut self, attachment: impl Into<Attachment>) -> Self {
        self.attachment = Some(attachment.into());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }
}
