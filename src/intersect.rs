use std::ops::Index;

use crate::consts::{ EPSILON, VACUUM_RI };
use crate::tuple::Tuple4D;
use crate::ray::Ray4D;
use crate::shape::Shape;

/// An intersection.
///
/// Parameter `t` is the offset along the ray that produced the intersection;
/// `what` is the shape that was struck.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub what: &'a Shape,
}

/// Two intersections are equal if their offsets are equal and they refer to
/// the *same* shape (pointer equality, not structural equality).
impl<'a> PartialEq for Intersection<'a> {
    fn eq(&self, other: &Intersection<'a>) -> bool {
        self.t == other.t && std::ptr::eq(self.what, other.what)
    }
}

impl<'a> Intersection<'a> {
    pub fn new(t: f64, what: &'a Shape) -> Intersection<'a> {
        Intersection { t, what }
    }
}

/// A collection of intersections.
///
/// A thin wrapper around a vector of `Intersection`s. An empty collection is
/// a miss, not an error.
#[derive(Clone, Debug, Default)]
pub struct Intersections<'a> {
    pub intersections: Vec<Intersection<'a>>,
}

impl<'a> From<Vec<Intersection<'a>>> for Intersections<'a> {
    fn from(intersections: Vec<Intersection<'a>>) -> Intersections<'a> {
        Intersections { intersections }
    }
}

impl<'a> Index<usize> for Intersections<'a> {
    type Output = Intersection<'a>;

    fn index(&self, i: usize) -> &Intersection<'a> {
        &self.intersections[i]
    }
}

impl<'a> Intersections<'a> {
    pub fn new() -> Intersections<'a> {
        Intersections { intersections: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Intersection<'a>> {
        self.intersections.iter()
    }

    /// Moves every intersection of `other` into this collection.
    pub fn append(&mut self, mut other: Intersections<'a>) {
        self.intersections.append(&mut other.intersections);
    }

    /// The hit: the intersection with the lowest non-negative `t`.
    ///
    /// Sorts the collection first, so the containment walk in
    /// `IntersectionComputation` sees the same order.
    pub fn hit(&mut self) -> Option<Intersection<'a>> {
        self.sort();
        self.intersections.iter().find(|i| i.t >= 0.0).copied()
    }

    /// Sorts the intersections by ascending `t`. NaN offsets compare equal.
    pub fn sort(&mut self) {
        self.intersections.sort_by(|a, b|
            a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal)
        );
    }
}

/// Precomputed state for shading a single hit.
#[derive(Clone, Debug)]
pub struct IntersectionComputation<'a> {
    /// The offset of the hit along the ray.
    pub t: f64,

    /// The shape that was hit.
    pub obj: &'a Shape,

    /// The point where the intersection occurs.
    pub point: Tuple4D,

    /// `point` nudged along the normal by `EPSILON`, used as the origin of
    /// shadow and reflection rays so a surface does not occlude itself.
    pub over_point: Tuple4D,

    /// `point` nudged against the normal, used as the origin of refracted
    /// rays.
    pub under_point: Tuple4D,

    /// Points back toward the ray origin.
    pub eyev: Tuple4D,

    /// Surface normal, flipped to face the eye when the hit is inside.
    pub normalv: Tuple4D,

    /// The ray direction reflected about `normalv`.
    pub reflectv: Tuple4D,

    pub inside: bool,

    /// Refractive index of the medium being exited.
    pub n1: f64,

    /// Refractive index of the medium being entered.
    pub n2: f64,
}

impl<'a> IntersectionComputation<'a> {
    /// Prepares the shading state for `hit`, one of the intersections of `r`.
    ///
    /// `xs` must be the full, ascending-sorted list of intersections `hit`
    /// came from; it is walked to find the refractive indices on either side
    /// of the surface.
    pub fn new(r: &Ray4D, hit: &Intersection<'a>, xs: &Intersections<'a>)
        -> IntersectionComputation<'a> {
        let t = hit.t;
        let obj = hit.what;
        let point = r.position(t);
        let eyev = -r.direction;
        let mut normalv = obj.normal_at(point);

        let inside = if normalv.dot(&eyev) < 0.0 {
            normalv = -normalv;
            true
        } else {
            false
        };

        let over_point = point + normalv * EPSILON;
        let under_point = point - normalv * EPSILON;
        let reflectv = r.direction.reflect(&normalv);

        let (n1, n2) = Self::refraction_indices(hit, xs);

        IntersectionComputation {
            t, obj,
            point, over_point, under_point,
            eyev, normalv, reflectv,
            inside,
            n1, n2,
        }
    }

    /// Walks `xs` in order keeping a stack of the shapes the ray is inside.
    /// Entering a shape pushes it, leaving removes it; `n1` is read off the
    /// top of the stack just before the hit, `n2` just after.
    fn refraction_indices(hit: &Intersection<'a>, xs: &Intersections<'a>)
        -> (f64, f64) {
        let mut n1 = VACUUM_RI;
        let mut n2 = VACUUM_RI;
        let mut containers: Vec<&'a Shape> = Vec::new();

        for i in xs.iter() {
            let is_hit = i == hit;

            if is_hit {
                n1 = innermost_index(&containers);
            }

            match containers.iter().position(|&s| std::ptr::eq(s, i.what)) {
                Some(j) => { containers.remove(j); },
                None => containers.push(i.what),
            }

            if is_hit {
                n2 = innermost_index(&containers);
                break;
            }
        }

        (n1, n2)
    }

    /// The Schlick approximation of the Fresnel reflectance at this hit: the
    /// fraction of light reflected rather than refracted, in `[0, 1]`.
    pub fn schlick(&self) -> f64 {
        let mut cos = self.eyev.dot(&self.normalv);

        // Total internal reflection is only possible going into a less
        // dense medium
        if self.n1 > self.n2 {
            let n = self.n1 / self.n2;
            let sin2_t = n.powi(2) * (1.0 - cos.powi(2));
            if sin2_t >= 1.0 {
                return 1.0;
            }

            cos = (1.0 - sin2_t).sqrt();
        }

        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cos).powi(5)
    }
}

/// Refractive index of the most recently entered shape, or vacuum.
fn innermost_index(containers: &[&Shape]) -> f64 {
    containers.last().map_or(VACUUM_RI, |s| s.material.refractive_index)
}

#[cfg(test)]
fn z_ray(z: f64) -> Ray4D {
    Ray4D::new(Tuple4D::point(0.0, 0.0, z), Tuple4D::vector(0.0, 0.0, 1.0))
}

#[test]
fn hit_when_all_positive() {
    let s = Shape::sphere();
    let i1 = Intersection::new(1.0, &s);
    let i2 = Intersection::new(2.0, &s);
    let mut xs = Intersections::from(vec![i2, i1]);

    assert_eq!(xs.hit(), Some(i1));
}

#[test]
fn hit_when_some_negative() {
    let s = Shape::sphere();
    let i1 = Intersection::new(-1.0, &s);
    let i2 = Intersection::new(1.0, &s);
    let mut xs = Intersections::from(vec![i2, i1]);

    assert_eq!(xs.hit(), Some(i2));
}

#[test]
fn hit_when_all_negative() {
    let s = Shape::sphere();
    let mut xs = Intersections::from(vec![
        Intersection::new(-2.0, &s),
        Intersection::new(-1.0, &s),
    ]);

    assert_eq!(xs.hit(), None);
}

#[test]
fn hit_is_lowest_nonnegative() {
    let s = Shape::sphere();
    let i4 = Intersection::new(2.0, &s);
    let mut xs = Intersections::from(vec![
        Intersection::new(5.0, &s),
        Intersection::new(7.0, &s),
        Intersection::new(-3.0, &s),
        i4,
    ]);

    assert_eq!(xs.hit(), Some(i4));
}

#[test]
fn hit_on_empty_collection() {
    assert_eq!(Intersections::new().hit(), None);
}

#[test]
fn intersections_compare_by_identity() {
    let a = Shape::sphere();
    let b = Shape::sphere();

    assert_eq!(a, b);
    assert_eq!(Intersection::new(1.0, &a), Intersection::new(1.0, &a));
    assert_ne!(Intersection::new(1.0, &a), Intersection::new(1.0, &b));
}

#[test]
fn precompute_outside_hit() {
    let s = Shape::sphere();
    let r = z_ray(-5.0);
    let i = Intersection::new(4.0, &s);
    let comps = IntersectionComputation::new(&r, &i, &Intersections::from(vec![i]));

    assert_eq!(comps.t, 4.0);
    assert!(std::ptr::eq(comps.obj, &s));
    assert_eq!(comps.point, Tuple4D::point(0.0, 0.0, -1.0));
    assert_eq!(comps.eyev, Tuple4D::vector(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Tuple4D::vector(0.0, 0.0, -1.0));
    assert!(!comps.inside);
}

#[test]
fn precompute_inside_hit() {
    let s = Shape::sphere();
    let r = z_ray(0.0);
    let i = Intersection::new(1.0, &s);
    let comps = IntersectionComputation::new(&r, &i, &Intersections::from(vec![i]));

    assert_eq!(comps.point, Tuple4D::point(0.0, 0.0, 1.0));
    assert_eq!(comps.eyev, Tuple4D::vector(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Tuple4D::vector(0.0, 0.0, -1.0));
    assert!(comps.inside);
}

#[test]
fn precompute_over_point() {
    use crate::matrix::Matrix4D;

    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 1.0)).unwrap();
    let r = z_ray(-5.0);
    let i = Intersection::new(5.0, &s);
    let comps = IntersectionComputation::new(&r, &i, &Intersections::from(vec![i]));

    assert!(comps.over_point.z < -EPSILON / 2.0);
    assert!(comps.point.z > comps.over_point.z);
}

#[test]
fn precompute_under_point() {
    use crate::matrix::Matrix4D;

    let s = Shape::glass_sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 1.0)).unwrap();
    let r = z_ray(-5.0);
    let i = Intersection::new(5.0, &s);
    let comps = IntersectionComputation::new(&r, &i, &Intersections::from(vec![i]));

    assert!(comps.under_point.z > EPSILON / 2.0);
    assert!(comps.point.z < comps.under_point.z);
}

#[test]
fn precompute_reflection_vector() {
    let p = Shape::plane();
    let h = 2.0f64.sqrt() / 2.0;
    let r = Ray4D::new(
        Tuple4D::point(0.0, 1.0, -1.0),
        Tuple4D::vector(0.0, -h, h)
    );
    let i = Intersection::new(2.0f64.sqrt(), &p);
    let comps = IntersectionComputation::new(&r, &i, &Intersections::from(vec![i]));

    assert_eq!(comps.reflectv, Tuple4D::vector(0.0, h, h));
}

#[test]
fn refraction_indices_at_nested_boundaries() {
    use crate::matrix::Matrix4D;

    let mut a = Shape::glass_sphere()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0)).unwrap();
    a.material.refractive_index = 1.5;

    let mut b = Shape::glass_sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, -0.25)).unwrap();
    b.material.refractive_index = 2.0;

    let mut c = Shape::glass_sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 0.25)).unwrap();
    c.material.refractive_index = 2.5;

    let r = z_ray(-4.0);
    let xs = Intersections::from(vec![
        Intersection::new(2.0, &a),
        Intersection::new(2.75, &b),
        Intersection::new(3.25, &c),
        Intersection::new(4.75, &b),
        Intersection::new(5.25, &c),
        Intersection::new(6.0, &a),
    ]);

    let expected = [
        (1.0, 1.5),
        (1.5, 2.0),
        (2.0, 2.5),
        (2.5, 2.5),
        (2.5, 1.5),
        (1.5, 1.0),
    ];

    for (index, (n1, n2)) in expected.iter().enumerate() {
        let comps = IntersectionComputation::new(&r, &xs[index], &xs);
        assert_eq!(comps.n1, *n1);
        assert_eq!(comps.n2, *n2);
    }
}

#[test]
fn schlick_under_total_internal_reflection() {
    let s = Shape::glass_sphere();
    let h = 2.0f64.sqrt() / 2.0;
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, h),
        Tuple4D::vector(0.0, 1.0, 0.0)
    );
    let xs = Intersections::from(vec![
        Intersection::new(-h, &s),
        Intersection::new(h, &s),
    ]);
    let comps = IntersectionComputation::new(&r, &xs[1], &xs);

    assert_eq!(comps.schlick(), 1.0);
}

#[test]
fn schlick_with_perpendicular_viewing_angle() {
    let s = Shape::glass_sphere();
    let r = Ray4D::new(Tuple4D::origin(), Tuple4D::vector(0.0, 1.0, 0.0));
    let xs = Intersections::from(vec![
        Intersection::new(-1.0, &s),
        Intersection::new(1.0, &s),
    ]);
    let comps = IntersectionComputation::new(&r, &xs[1], &xs);

    assert!((comps.schlick() - 0.04).abs() < EPSILON);
}

#[test]
fn schlick_with_small_angle() {
    let s = Shape::glass_sphere();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.99, -2.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let xs = Intersections::from(vec![Intersection::new(1.8589, &s)]);
    let comps = IntersectionComputation::new(&r, &xs[0], &xs);

    assert!((comps.schlick() - 0.48873).abs() < 0.0001);
}
