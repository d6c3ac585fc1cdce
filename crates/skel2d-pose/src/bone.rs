/// A bone's resolved world transform.
///
/// `a b / c d` is the 2x2 linear part and `world_x`/`world_y` the
/// translation, so a point in bone space maps to
/// `(a*x + b*y + world_x, c*x + d*y + world_y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bone {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub world_x: f32,
    pub world_y: f32,
    /// Inactive bones hide every slot attached to them.
    pub active: bool,
}

impl Bone {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        world_x: 0.0,
        world_y: 0.0,
        active: true,
    };

    /// Bone translated to `(x, y)` with no rotation or scale.
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            world_x: x,
            world_y: y,
            ..Self::IDENTITY
        }
    }

    /// Build a world transform from translation, rotation (degrees) and scale.
    pub fn from_transform(x: f32, y: f32, rotation: f32, scale_x: f32, scale_y: f32) -> Self {
        let (sin, cos) = rotation.to_radians().sin_cos();
        Self {
            a: cos * scale_x,
            b: -sin * scale_y,
            c: sin * scale_x,
            d: cos * scale_y,
            world_x: x,
            world_y: y,
            active: true,
        }
    }

    pub fn with_active(self, active: bool) -> Self {
        Self { active, ..self }
    }

    /// Map a bone-local point to world space.
    #[inline]
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.a + y * self.b + self.world_x,
            x * self.c + y * self.d + self.world_y,
        )
    }
}

impl Default for Bone {
    fn default() -> Self {
        Self::IDENTITY
    }
}
