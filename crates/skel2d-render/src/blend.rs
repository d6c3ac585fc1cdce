// Blend configurations for slot blend families.
//
// Each family has a straight-alpha and a premultiplied-alpha variant:
//   Normal:   SrcAlpha | One,  OneMinusSrcAlpha
//   Additive: SrcAlpha | One,  One
//   Multiply: Dst,             OneMinusSrcAlpha
//   Screen:   One,             OneMinusSrc
// Color and alpha channels use the same factors.

use serde::{Deserialize, Serialize};
use skel2d_pose::BlendMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlendFactor {
    Zero,
    One,
    Src,
    OneMinusSrc,
    SrcAlpha,
    OneMinusSrcAlpha,
    Dst,
    OneMinusDst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlendOperation {
    Add,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlendComponent {
    pub src_factor: BlendFactor,
    pub dst_factor: BlendFactor,
    pub operation: BlendOperation,
}

impl BlendComponent {
    const fn add(src_factor: BlendFactor, dst_factor: BlendFactor) -> Self {
        Self {
            src_factor,
            dst_factor,
            operation: BlendOperation::Add,
        }
    }
}

/// A concrete blend state handed to the rasterizer with each batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlendConfig {
    pub color: BlendComponent,
    pub alpha: BlendComponent,
}

impl BlendConfig {
    const fn uniform(src_factor: BlendFactor, dst_factor: BlendFactor) -> Self {
        let component = BlendComponent::add(src_factor, dst_factor);
        Self {
            color: component,
            alpha: component,
        }
    }
}

/// Maps a blend family to its blend configuration.
pub const fn blend_config(mode: BlendMode, premultiplied_alpha: bool) -> BlendConfig {
    use BlendFactor::*;
    match (mode, premultiplied_alpha) {
        (BlendMode::Normal, false) => BlendConfig::uniform(SrcAlpha, OneMinusSrcAlpha),
        (BlendMode::Normal, true) => BlendConfig::uniform(One, OneMinusSrcAlpha),
        (BlendMode::Additive, false) => BlendConfig::uniform(SrcAlpha, One),
        (BlendMode::Additive, true) => BlendConfig::uniform(One, One),
        (BlendMode::Multiply, _) => BlendConfig::uniform(Dst, OneMinusSrcAlpha),
        (BlendMode::Screen, _) => BlendConfig::uniform(One, OneMinusSrc),
    }
}

/// The four blend configurations for one alpha mode, built once per
/// drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendTable {
    premultiplied_alpha: bool,
    configs: [BlendConfig; 4],
}

impl BlendTable {
    pub const fn new(premultiplied_alpha: bool) -> Self {
        Self {
            premultiplied_alpha,
            configs: [
                blend_config(BlendMode::Normal, premultiplied_alpha),
                blend_config(BlendMode::Additive, premultiplied_alpha),
                blend_config(BlendMode::Multiply, premultiplied_alpha),
                blend_config(BlendMode::Screen, premultiplied_alpha),
            ],
        }
    }

    pub fn premultiplied_alpha(&self) -> bool {
        self.premultiplied_alpha
    }

    pub fn get(&self, mode: BlendMode) -> BlendConfig {
        let index = match mode {
            BlendMode::Normal => 0,
            BlendMode::Additive => 1,
            BlendMode::Multiply => 2,
            BlendMode::Screen => 3,
        };
        self.configs[index]
    }
}

#[cfg(feature = "wgpu")]
impl From<BlendFactor> for wgpu::BlendFactor {
    fn from(value: BlendFactor) -> Self {
        match value {
            BlendFactor::Zero => wgpu::BlendFactor::Zero,
            BlendFactor::One => wgpu::BlendFactor::One,
            BlendFactor::Src => wgpu::BlendFactor::Src,
            BlendFactor::OneMinusSrc => wgpu::BlendFactor::OneMinusSrc,
            BlendFactor::SrcAlpha => wgpu::BlendFactor::SrcAlpha,
            BlendFactor::OneMinusSrcAlpha => wgpu::BlendFactor::OneMinusSrcAlpha,
            BlendFactor::Dst => wgpu::BlendFactor::Dst,
            BlendFactor::OneMinusDst => wgpu::BlendFactor::OneMinusDst,
        }
    }
}

#[cfg(feature = "wgpu")]
impl From<BlendComponent> for wgpu::BlendComponent {
    fn from(value: BlendComponent) -> Self {
        wgpu::BlendComponent {
            src_factor: value.src_factor.into(),
            dst_factor: value.dst_factor.into(),
            operation: match value.operation {
                BlendOperation::Add => wgpu::BlendOperation::Add,
            },
        }
    }
}

#[cfg(feature = "wgpu")]
impl From<BlendConfig> for wgpu::BlendState {
    fn from(value: BlendConfig) -> Self {
        wgpu::BlendState {
            color: value.color.into(),
            alpha: value.alpha.into(),
        }
    }
}
