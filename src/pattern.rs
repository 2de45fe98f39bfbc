use crate::tuple::Tuple4D;
use crate::matrix::Matrix4D;
use crate::color::Color;
use crate::shape::Shape;
use crate::error::GeometryError;

/// The procedural texture a `Pattern` evaluates in its own space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PatternKind {
    /// Alternates between two colors on `floor(x)` parity.
    Stripe(Color, Color),

    /// Linearly blends from the first color to the second over each unit of
    /// `x`.
    Gradient(Color, Color),

    /// Concentric rings in the X-Z plane, alternating on the parity of the
    /// floored distance from the Y axis.
    Ring(Color, Color),

    /// A 3D checkerboard of unit cubes.
    Checker(Color, Color),

    /// A checkerboard wrapped around the origin by spherical UV mapping,
    /// 20 squares around and 10 from pole to pole. Only the direction of
    /// the point matters.
    SphericalChecker(Color, Color),

    /// Returns the pattern-space point itself as a color. For testing.
    Test,
}

/// A procedural pattern with its own transform.
///
/// Patterns are evaluated in *pattern space*: a world point is first mapped
/// into the shape's object space, then through the inverse of the pattern's
/// transform. Like `Shape`, the inverse is computed once when the transform
/// is assigned.
#[derive(Copy, Clone, Debug)]
pub struct Pattern {
    pub kind: PatternKind,
    transform: Matrix4D,
    inverse: Matrix4D,
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Pattern) -> bool {
        self.kind == other.kind && self.transform == other.transform
    }
}

impl Pattern {
    pub fn new(kind: PatternKind) -> Pattern {
        Pattern {
            kind,
            transform: Matrix4D::identity(),
            inverse: Matrix4D::identity(),
        }
    }

    pub fn stripe(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternKind::Stripe(a, b))
    }

    pub fn gradient(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternKind::Gradient(a, b))
    }

    pub fn ring(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternKind::Ring(a, b))
    }

    pub fn checker(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternKind::Checker(a, b))
    }

    pub fn spherical_checker(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternKind::SphericalChecker(a, b))
    }

    pub fn test() -> Pattern {
        Pattern::new(PatternKind::Test)
    }

    pub fn transform(&self) -> &Matrix4D {
        &self.transform
    }

    /// Assigns the pattern transform, failing if it cannot be inverted.
    pub fn set_transform(&mut self, transform: Matrix4D)
        -> Result<(), GeometryError> {
        self.inverse = transform.inverse()?;
        self.transform = transform;

        Ok(())
    }

    /// Builder form of `set_transform`.
    pub fn with_transform(mut self, transform: Matrix4D)
        -> Result<Pattern, GeometryError> {
        self.set_transform(transform)?;
        Ok(self)
    }

    /// The pattern color at a point already in pattern space.
    pub fn pattern_at(&self, p: Tuple4D) -> Color {
        match self.kind {
            PatternKind::Stripe(a, b) => {
                if (p.x.floor() as i64).rem_euclid(2) == 0 { a } else { b }
            },
            PatternKind::Gradient(a, b) => {
                let fraction = p.x - p.x.floor();
                a + (b - a) * fraction
            },
            PatternKind::Ring(a, b) => {
                let distance = (p.x.powi(2) + p.z.powi(2)).sqrt();
                if (distance.floor() as i64).rem_euclid(2) == 0 { a } else { b }
            },
            PatternKind::Checker(a, b) => {
                let sum = p.x.floor() + p.y.floor() + p.z.floor();
                if (sum as i64).rem_euclid(2) == 0 { a } else { b }
            },
            PatternKind::SphericalChecker(a, b) => {
                let (u, v) = spherical_map(p);
                let sum = (u * 20.0).floor() + (v * 10.0).floor();
                if (sum as i64).rem_euclid(2) == 0 { a } else { b }
            },
            PatternKind::Test => Color::rgb(p.x, p.y, p.z),
        }
    }

    /// The pattern color at `world_point` on `shape`.
    pub fn pattern_at_shape(&self, shape: &Shape, world_point: Tuple4D)
        -> Color {
        let object_point = shape.world_to_object(world_point);
        let pattern_point = self.inverse * object_point;

        self.pattern_at(pattern_point)
    }
}

/// Maps a point to `(u, v)` in `[0, 1]`: `u` is the azimuth around the Y
/// axis and `v` runs from the +Y pole to the -Y pole. The origin maps to
/// the +Y pole.
fn spherical_map(p: Tuple4D) -> (f64, f64) {
    let theta = p.x.atan2(p.z) + std::f64::consts::PI;
    let radius = (p.x.powi(2) + p.y.powi(2) + p.z.powi(2)).sqrt();
    let phi = if radius == 0.0 { 0.0 } else { (p.y / radius).acos() };

    (theta / (2.0 * std::f64::consts::PI), phi / std::f64::consts::PI)
}

#[test]
fn stripe_pattern_is_constant_along_y_and_z() {
    let pattern = Pattern::stripe(Color::white(), Color::black());

    for i in 0..3 {
        let f = i as f64;
        assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, f, 0.0)),
            Color::white());
        assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, f)),
            Color::white());
    }
}

#[test]
fn stripe_pattern_alternates_along_x() {
    let pattern = Pattern::stripe(Color::white(), Color::black());
    let cases = [
        ( 0.0, Color::white()),
        ( 0.9, Color::white()),
        ( 1.0, Color::black()),
        (-0.1, Color::black()),
        (-1.0, Color::black()),
        (-1.1, Color::white()),
    ];

    for (x, expected) in cases.iter() {
        assert_eq!(pattern.pattern_at(Tuple4D::point(*x, 0.0, 0.0)), *expected);
    }
}

#[test]
fn gradient_interpolates_between_colors() {
    let pattern = Pattern::gradient(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.25, 0.0, 0.0)),
        Color::rgb(0.75, 0.75, 0.75));
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.5, 0.0, 0.0)),
        Color::rgb(0.5, 0.5, 0.5));
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.75, 0.0, 0.0)),
        Color::rgb(0.25, 0.25, 0.25));
}

#[test]
fn ring_extends_in_x_and_z() {
    let pattern = Pattern::ring(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(1.0, 0.0, 0.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 1.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.708, 0.0, 0.708)),
        Color::black());
}

#[test]
fn checkers_repeat_in_every_dimension() {
    let pattern = Pattern::checker(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.99, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(1.01, 0.0, 0.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 1.01, 0.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 1.01)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(-0.5, 0.0, 0.0)),
        Color::black());
}

#[test]
fn spherical_checkers_follow_direction() {
    let pattern = Pattern::spherical_checker(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 1.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 2.5)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.4f64.sin(), 0.0, 0.4f64.cos())),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 1.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::origin()), Color::white());
}

#[test]
fn pattern_with_object_transformation() {
    let shape = Shape::sphere()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0)).unwrap();
    let pattern = Pattern::test();

    assert_eq!(pattern.pattern_at_shape(&shape, Tuple4D::point(2.0, 3.0, 4.0)),
        Color::rgb(1.0, 1.5, 2.0));
}

#[test]
fn pattern_with_pattern_transformation() {
    let shape = Shape::sphere();
    let pattern = Pattern::test()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0)).unwrap();

    assert_eq!(pattern.pattern_at_shape(&shape, Tuple4D::point(2.0, 3.0, 4.0)),
        Color::rgb(1.0, 1.5, 2.0));
}

#[test]
fn pattern_with_both_transformations() {
    let shape = Shape::sphere()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0)).unwrap();
    let pattern = Pattern::test()
        .with_transform(Matrix4D::translation(0.5, 1.0, 1.5)).unwrap();

    assert_eq!(pattern.pattern_at_shape(&shape, Tuple4D::point(2.5, 3.0, 3.5)),
        Color::rgb(0.75, 0.5, 0.25));
}

#[test]
fn singular_pattern_transform_is_rejected() {
    let mut pattern = Pattern::stripe(Color::white(), Color::black());

    assert!(pattern.set_transform(Matrix4D::scaling(0.0, 1.0, 1.0)).is_err());
    assert_eq!(*pattern.transform(), Matrix4D::identity());
}
