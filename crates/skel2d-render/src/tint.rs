use skel2d_pose::Color;

/// Combine skeleton, slot and attachment tints into one RGBA8 color.
///
/// Each channel is the product of the three inputs scaled to 0..=255 and
/// truncated, never rounded.
pub fn resolve_tint(skeleton: Color, slot: Color, attachment: Color) -> [u8; 4] {
    [
        (skeleton.r * slot.r * attachment.r * 255.0) as u8,
        (skeleton.g * slot.g * attachment.g * 255.0) as u8,
        (skeleton.b * slot.b * attachment.b * 255.0) as u8,
        (skeleton.a * slot.a * attachment.a * 255.0) as u8,
    ]
}

/// The resolved tint as a 0..=1 color, the form vertex effects receive.
pub fn light_color(rgba: [u8; 4]) -> Color {
    Color::new(
        f32::from(rgba[0]) / 255.0,
        f32::from(rgba[1]) / 255.0,
        f32::from(rgba[2]) / 255.0,
        f32::from(rgba[3]) / 255.0,
    )
}

/// Convert an effect-produced color back to RGBA8.
///
/// Rounds so that a color passed through [`light_color`] unchanged maps back
/// to the same bytes.
pub fn quantize(color: Color) -> [u8; 4] {
    [
        (color.r * 255.0).round() as u8,
        (color.g * 255.0).round() as u8,
        (color.b * 255.0).round() as u8,
        (color.a * 255.0).round() as u8,
    ]
}
