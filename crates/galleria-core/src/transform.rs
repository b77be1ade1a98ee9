//! Per-slide transform record: pan, rotation and zoom.

use kurbo::{Affine, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Clamp a scalar into `[-limit, limit]`.
pub fn clamp_position(value: f64, limit: f64) -> f64 {
    value.clamp(-limit, limit)
}

/// The `{position, rotation, scale}` record applied to a slide's image.
///
/// Position is a percentage of the image box (the CSS `translate(%)` unit),
/// rotation is in degrees and scale is unitless.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformData {
    /// Pan offset in percent.
    pub position: Vec2,
    /// Accumulated rotation in degrees. Not wrapped, so CSS transitions
    /// always animate a single step.
    pub rotation: i32,
    /// 1 when unzoomed.
    pub scale: f64,
}

impl Default for TransformData {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0,
            scale: 1.0,
        }
    }
}

impl TransformData {
    /// Create an identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new position with both components clamped to `[-limit, limit]`.
    pub fn set_position(&mut self, position: Vec2, limit: f64) {
        self.position = Vec2::new(
            clamp_position(position.x, limit),
            clamp_position(position.y, limit),
        );
    }

    /// Rotate by a signed number of degrees.
    pub fn rotate_by(&mut self, degrees: i32) {
        self.rotation = self.rotation.wrapping_add(degrees);
    }

    /// Rotation folded into `[0, 360)`.
    pub fn normalized_rotation(&self) -> i32 {
        self.rotation.rem_euclid(360)
    }

    pub fn is_identity(&self) -> bool {
        self.position == Vec2::ZERO && self.rotation == 0 && self.scale == 1.0
    }

    /// Render as a CSS `transform` value.
    pub fn to_css(&self) -> String {
        // `+ 0.0` turns -0 into 0 so the output never reads "-0%".
        format!(
            "translate({}%, {}%) rotate({}deg) scale({})",
            self.position.x + 0.0,
            self.position.y + 0.0,
            self.rotation,
            self.scale
        )
    }

    /// The equivalent affine transform for a box of the given pixel size.
    ///
    /// Percentages resolve against the box and the origin is the box centre,
    /// matching the CSS defaults.
    pub fn affine(&self, size: Size) -> Affine {
        let center = Vec2::new(size.width / 2.0, size.height / 2.0);
        let translation = Vec2::new(
            self.position.x / 100.0 * size.width,
            self.position.y / 100.0 * size.height,
        );
        Affine::translate(center + translation)
            * Affine::rotate(f64::from(self.rotation).to_radians())
            * Affine::scale(self.scale)
            * Affine::translate(-center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn assert_point_eq(a: Point, b: Point) {
        assert!((a.x - b.x).abs() < 1e-9, "{:?} != {:?}", a, b);
        assert!((a.y - b.y).abs() < 1e-9, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_default_is_identity() {
        let t = TransformData::new();
        assert!(t.is_identity());
        assert_eq!(t.position, Vec2::ZERO);
        assert_eq!(t.rotation, 0);
        assert!((t.scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp_position() {
        assert!((clamp_position(150.0, 100.0) - 100.0).abs() < f64::EPSILON);
        assert!((clamp_position(-150.0, 100.0) + 100.0).abs() < f64::EPSILON);
        assert!((clamp_position(42.5, 100.0) - 42.5).abs() < f64::EPSILON);
        assert!((clamp_position(-42.5, 100.0) + 42.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_position_clamps_each_axis() {
        let mut t = TransformData::new();
        t.set_position(Vec2::new(250.0, -20.0), 100.0);
        assert_eq!(t.position, Vec2::new(100.0, -20.0));

        t.set_position(Vec2::new(-5.0, -300.0), 100.0);
        assert_eq!(t.position, Vec2::new(-5.0, -100.0));
    }

    #[test]
    fn test_rotation_accumulates() {
        let mut t = TransformData::new();
        t.rotate_by(-90);
        assert_eq!(t.rotation, -90);
        assert_eq!(t.normalized_rotation(), 270);

        for _ in 0..5 {
            t.rotate_by(90);
        }
        assert_eq!(t.rotation, 360);
        assert_eq!(t.normalized_rotation(), 0);
        assert!(!t.is_identity());
    }

    #[test]
    fn test_to_css() {
        assert_eq!(
            TransformData::new().to_css(),
            "translate(0%, 0%) rotate(0deg) scale(1)"
        );

        let t = TransformData {
            position: Vec2::new(12.5, -40.0),
            rotation: -90,
            scale: 2.2,
        };
        assert_eq!(t.to_css(), "translate(12.5%, -40%) rotate(-90deg) scale(2.2)");
    }

    #[test]
    fn test_to_css_negative_zero() {
        let t = TransformData {
            position: Vec2::new(-0.0, -0.0),
            ..TransformData::default()
        };
        assert_eq!(t.to_css(), "translate(0%, 0%) rotate(0deg) scale(1)");
    }

    #[test]
    fn test_affine_identity() {
        let size = Size::new(200.0, 100.0);
        let p = Point::new(30.0, 70.0);
        assert_point_eq(TransformData::new().affine(size) * p, p);
    }

    #[test]
    fn test_affine_rotates_about_center() {
        let t = TransformData {
            rotation: 90,
            ..TransformData::default()
        };
        let affine = t.affine(Size::new(100.0, 100.0));
        assert_point_eq(affine * Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert_point_eq(affine * Point::new(50.0, 50.0), Point::new(50.0, 50.0));
    }

    #[test]
    fn test_affine_translate_and_scale() {
        let t = TransformData {
            position: Vec2::new(10.0, -50.0),
            rotation: 0,
            scale: 2.0,
        };
        let affine = t.affine(Size::new(200.0, 100.0));
        // Centre moves by 10% of width and -50% of height.
        assert_point_eq(affine * Point::new(100.0, 50.0), Point::new(120.0, 0.0));
        // Corner doubles its distance from the centre.
        assert_point_eq(affine * Point::new(0.0, 0.0), Point::new(-80.0, -100.0));
    }
}
