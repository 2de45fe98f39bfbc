use crate::consts::EPSILON;
use crate::tuple::Tuple4D;
use crate::ray::Ray4D;
use crate::light::Material;
use crate::matrix::Matrix4D;
use crate::error::GeometryError;
use crate::intersect::{ Intersection, Intersections };

/// The analytic surfaces a `Shape` can be. Each is defined in its own
/// object space; the owning `Shape` places it in the world.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ShapeType {
    /// A unit sphere centered at the object-space origin.
    Sphere,

    /// The X-Z plane, with its normal pointing up along Y.
    Plane,

    /// An axis-aligned cube spanning `[-1, 1]` on every axis.
    Cube,

    /// An infinitely long, open cylinder of radius 1 around the Y axis.
    Cylinder,
}

/// A surface in the world: a `ShapeType` plus a transform and a material.
///
/// The transform maps object space to world space. It is private so that
/// its inverse (needed for every intersection and normal) can be validated
/// and cached when it is assigned; a `Shape` can never hold a transform it
/// cannot invert.
///
/// Shapes are mutated while a scene is being built. Rendering only ever
/// borrows them immutably.
#[derive(Clone, Debug)]
pub struct Shape {
    pub ty: ShapeType,
    pub material: Material,

    transform: Matrix4D,
    inverse: Matrix4D,
    inverse_transpose: Matrix4D,
}

/// Structural equality: type, transform and material.
impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
            && self.transform == other.transform
            && self.material == other.material
    }
}

impl Shape {
    /// Creates a shape with identity transform and default material.
    pub fn new(ty: ShapeType) -> Shape {
        Shape {
            ty,
            material: Default::default(),
            transform: Matrix4D::identity(),
            inverse: Matrix4D::identity(),
            inverse_transpose: Matrix4D::identity(),
        }
    }

    pub fn sphere() -> Shape {
        Shape::new(ShapeType::Sphere)
    }

    pub fn plane() -> Shape {
        Shape::new(ShapeType::Plane)
    }

    pub fn cube() -> Shape {
        Shape::new(ShapeType::Cube)
    }

    pub fn cylinder() -> Shape {
        Shape::new(ShapeType::Cylinder)
    }

    /// A unit sphere made of glass. Handy for refraction tests and scenes.
    pub fn glass_sphere() -> Shape {
        let mut s = Shape::sphere();
        s.material = Material::glass();
        s
    }

    pub fn transform(&self) -> &Matrix4D {
        &self.transform
    }

    /// Assigns the object-to-world transform.
    ///
    /// Fails, leaving the shape untouched, if `transform` is not invertible.
    pub fn set_transform(&mut self, transform: Matrix4D)
        -> Result<(), GeometryError> {
        let inverse = transform.inverse()?;

        self.transform = transform;
        self.inverse = inverse;
        self.inverse_transpose = inverse.transposition();

        Ok(())
    }

    /// Builder form of `set_transform`.
    pub fn with_transform(mut self, transform: Matrix4D)
        -> Result<Shape, GeometryError> {
        self.set_transform(transform)?;
        Ok(self)
    }

    /// Assigns a transform whose inverse is already known, so nothing can
    /// fail. `inverse` must invert `transform`.
    pub(crate) fn with_inverted_transform(mut self, transform: Matrix4D,
        inverse: Matrix4D) -> Shape {
        debug_assert!(transform * inverse == Matrix4D::identity());

        self.transform = transform;
        self.inverse = inverse;
        self.inverse_transpose = inverse.transposition();
        self
    }

    pub fn with_material(mut self, material: Material) -> Shape {
        self.material = material;
        self
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Converts a point from world to object space.
    pub fn world_to_object(&self, point: Tuple4D) -> Tuple4D {
        self.inverse * point
    }

    /// Converts an object-space normal to a unit world-space normal.
    ///
    /// Normals transform by the inverse transpose. Translation leaks into
    /// `w` along the way, so it is zeroed before renormalizing.
    pub fn normal_to_world(&self, normal: Tuple4D) -> Tuple4D {
        let mut world_normal = self.inverse_transpose * normal;
        world_normal.w = 0.0;
        world_normal.normalize()
    }

    /// Intersects a world-space ray with this shape.
    ///
    /// The ray is moved into object space, so the returned `t` values are
    /// valid along the original ray. The result may be empty.
    pub fn intersect(&self, ray: &Ray4D) -> Intersections {
        let local_ray = ray.transform(&self.inverse);
        self.local_intersect(&local_ray)
    }

    /// The unit surface normal at a world-space point on this shape.
    pub fn normal_at(&self, world_point: Tuple4D) -> Tuple4D {
        let local_point = self.world_to_object(world_point);
        let local_normal = self.local_normal_at(&local_point);
        self.normal_to_world(local_normal)
    }

    /// Intersects an object-space ray with this shape.
    pub fn local_intersect(&self, ray: &Ray4D) -> Intersections {
        let ts = match self.ty {
            ShapeType::Sphere => intersect_sphere(ray),
            ShapeType::Plane => intersect_plane(ray),
            ShapeType::Cube => intersect_cube(ray),
            ShapeType::Cylinder => intersect_cylinder(ray),
        };

        Intersections::from(
            ts.into_iter().map(|t| Intersection::new(t, self)).collect::<Vec<_>>()
        )
    }

    /// The (unnormalized) object-space normal at an object-space point.
    pub fn local_normal_at(&self, at: &Tuple4D) -> Tuple4D {
        match self.ty {
            ShapeType::Sphere => Tuple4D::vector(at.x, at.y, at.z),
            ShapeType::Plane => Tuple4D::vector(0.0, 1.0, 0.0),
            ShapeType::Cube => normal_at_cube(at),
            ShapeType::Cylinder => Tuple4D::vector(at.x, 0.0, at.z),
        }
    }
}

/// Solves `a*t^2 + b*t + c = 0`, returning both roots in ascending order, or
/// nothing when the discriminant is negative. A tangent yields the same
/// root twice.
fn solve_quadratic(a: f64, b: f64, c: f64) -> Vec<f64> {
    let discriminant = b.powi(2) - 4.0 * a * c;
    if discriminant < 0.0 {
        return Vec::new();
    }

    let root = discriminant.sqrt();
    let t0 = (-b - root) / (2.0 * a);
    let t1 = (-b + root) / (2.0 * a);

    if t0 <= t1 { vec![t0, t1] } else { vec![t1, t0] }
}

fn intersect_sphere(ray: &Ray4D) -> Vec<f64> {
    // Subtracting the center point leaves a vector
    let sphere_to_ray = ray.origin - Tuple4D::origin();

    let a = ray.direction.dot(&ray.direction);
    let b = 2.0 * ray.direction.dot(&sphere_to_ray);
    let c = sphere_to_ray.dot(&sphere_to_ray) - 1.0;

    solve_quadratic(a, b, c)
}

/// Parallel and coplanar rays both miss.
fn intersect_plane(ray: &Ray4D) -> Vec<f64> {
    if ray.direction.y.abs() < EPSILON {
        return Vec::new();
    }

    vec![-ray.origin.y / ray.direction.y]
}

fn intersect_cube(ray: &Ray4D) -> Vec<f64> {
    let (xtmin, xtmax) = check_axis(ray.origin.x, ray.direction.x);
    let (ytmin, ytmax) = check_axis(ray.origin.y, ray.direction.y);
    let (ztmin, ztmax) = check_axis(ray.origin.z, ray.direction.z);

    let tmin = xtmin.max(ytmin).max(ztmin);
    let tmax = xtmax.min(ytmax).min(ztmax);

    if tmin > tmax {
        return Vec::new();
    }

    vec![tmin, tmax]
}

/// Slab test for one axis of the cube: the `t` values where the ray crosses
/// the planes at -1 and 1. A ray parallel to the slab gets infinite values
/// signed by which side of each plane its origin lies on.
fn check_axis(origin: f64, direction: f64) -> (f64, f64) {
    let tmin_numerator = -1.0 - origin;
    let tmax_numerator = 1.0 - origin;

    let (tmin, tmax) = if direction.abs() >= EPSILON {
        (tmin_numerator / direction, tmax_numerator / direction)
    } else {
        (tmin_numerator * std::f64::INFINITY,
            tmax_numerator * std::f64::INFINITY)
    };

    if tmin > tmax { (tmax, tmin) } else { (tmin, tmax) }
}

/// The face normal is the axis with the largest absolute component; ties go
/// to x, then y.
fn normal_at_cube(p: &Tuple4D) -> Tuple4D {
    let xa = p.x.abs();
    let ya = p.y.abs();
    let za = p.z.abs();

    let max_component = xa.max(ya).max(za);
    if max_component == xa {
        Tuple4D::vector(p.x, 0.0, 0.0)
    } else if max_component == ya {
        Tuple4D::vector(0.0, p.y, 0.0)
    } else {
        Tuple4D::vector(0.0, 0.0, p.z)
    }
}

/// Only the X and Z components matter; a ray parallel to the Y axis misses.
fn intersect_cylinder(ray: &Ray4D) -> Vec<f64> {
    let a = ray.direction.x.powi(2) + ray.direction.z.powi(2);
    if a.abs() < EPSILON {
        return Vec::new();
    }

    let b = 2.0 * ray.origin.x * ray.direction.x
          + 2.0 * ray.origin.z * ray.direction.z;
    let c = ray.origin.x.powi(2) + ray.origin.z.powi(2) - 1.0;

    solve_quadratic(a, b, c)
}

#[cfg(test)]
fn ts(xs: &Intersections) -> Vec<f64> {
    xs.iter().map(|i| i.t).collect()
}

#[cfg(test)]
fn ray(origin: (f64, f64, f64), direction: (f64, f64, f64)) -> Ray4D {
    Ray4D::new(
        Tuple4D::point(origin.0, origin.1, origin.2),
        Tuple4D::vector(direction.0, direction.1, direction.2),
    )
}

#[test]
fn default_shape() {
    let s = Shape::sphere();

    assert_eq!(*s.transform(), Matrix4D::identity());
    assert_eq!(*s.material(), Material::default());
}

#[test]
fn singular_transform_is_rejected() {
    let mut s = Shape::sphere();
    let t = Matrix4D::translation(2.0, 3.0, 4.0);

    s.set_transform(t).unwrap();
    assert!(s.set_transform(Matrix4D::scaling(1.0, 0.0, 1.0)).is_err());
    assert_eq!(*s.transform(), t);
}

#[test]
fn known_inverse_matches_computed_inverse() {
    let m = Matrix4D::scaling(0.5, 0.5, 0.5);
    let known = Shape::sphere()
        .with_inverted_transform(m, Matrix4D::scaling(2.0, 2.0, 2.0));
    let computed = Shape::sphere().with_transform(m).unwrap();

    assert_eq!(known, computed);
    assert_eq!(known.world_to_object(Tuple4D::point(1.0, 1.0, 1.0)),
        Tuple4D::point(2.0, 2.0, 2.0));
    assert_eq!(known.normal_at(Tuple4D::point(0.0, 0.5, 0.0)),
        computed.normal_at(Tuple4D::point(0.0, 0.5, 0.0)));
}

#[test]
fn ray_intersects_sphere() {
    let s = Shape::sphere();

    assert_eq!(ts(&s.intersect(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)))),
        vec![4.0, 6.0]);
    assert_eq!(ts(&s.intersect(&ray((0.0, 1.0, -5.0), (0.0, 0.0, 1.0)))),
        vec![5.0, 5.0]);
    assert!(s.intersect(&ray((0.0, 2.0, -5.0), (0.0, 0.0, 1.0))).is_empty());
    assert_eq!(ts(&s.intersect(&ray((0.0, 0.0, 0.0), (0.0, 0.0, 1.0)))),
        vec![-1.0, 1.0]);
    assert_eq!(ts(&s.intersect(&ray((0.0, 0.0, 5.0), (0.0, 0.0, 1.0)))),
        vec![-6.0, -4.0]);
}

#[test]
fn intersect_sets_the_object() {
    let s = Shape::sphere();
    let xs = s.intersect(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)));

    assert_eq!(xs.len(), 2);
    assert!(std::ptr::eq(xs[0].what, &s));
    assert!(std::ptr::eq(xs[1].what, &s));
}

#[test]
fn intersect_scaled_sphere() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0)).unwrap();

    assert_eq!(ts(&s.intersect(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)))),
        vec![3.0, 7.0]);
}

#[test]
fn intersect_translated_sphere() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(5.0, 0.0, 0.0)).unwrap();

    assert!(s.intersect(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0))).is_empty());
}

#[test]
fn normal_on_sphere() {
    let s = Shape::sphere();
    let k = 3.0f64.sqrt() / 3.0;

    assert_eq!(s.normal_at(Tuple4D::point(1.0, 0.0, 0.0)),
        Tuple4D::vector(1.0, 0.0, 0.0));
    assert_eq!(s.normal_at(Tuple4D::point(0.0, 1.0, 0.0)),
        Tuple4D::vector(0.0, 1.0, 0.0));
    assert_eq!(s.normal_at(Tuple4D::point(0.0, 0.0, 1.0)),
        Tuple4D::vector(0.0, 0.0, 1.0));

    let n = s.normal_at(Tuple4D::point(k, k, k));
    assert_eq!(n, Tuple4D::vector(k, k, k));
    assert_eq!(n, n.normalize());
}

#[test]
fn normal_on_translated_sphere() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 1.0, 0.0)).unwrap();

    let n = s.normal_at(Tuple4D::point(0.0, 1.70711, -0.70711));
    assert!((n.y - 0.70711).abs() < 0.0001);
    assert!((n.z + 0.70711).abs() < 0.0001);
    assert_eq!(n.w, 0.0);
}

#[test]
fn normal_on_transformed_sphere() {
    let m = Matrix4D::scaling(1.0, 0.5, 1.0)
        * Matrix4D::rotation_z(std::f64::consts::PI / 5.0);
    let s = Shape::sphere().with_transform(m).unwrap();
    let h = 2.0f64.sqrt() / 2.0;

    let n = s.normal_at(Tuple4D::point(0.0, h, -h));
    assert!(n.x.abs() < 0.0001);
    assert!((n.y - 0.97014).abs() < 0.0001);
    assert!((n.z + 0.24254).abs() < 0.0001);
}

#[test]
fn normal_on_plane_is_constant() {
    let p = Shape::plane();
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(p.local_normal_at(&Tuple4D::point(0.0, 0.0, 0.0)), up);
    assert_eq!(p.local_normal_at(&Tuple4D::point(10.0, 0.0, -10.0)), up);
    assert_eq!(p.local_normal_at(&Tuple4D::point(-5.0, 0.0, 150.0)), up);
}

#[test]
fn ray_parallel_or_coplanar_with_plane() {
    let p = Shape::plane();

    assert!(p.local_intersect(&ray((0.0, 10.0, 0.0), (0.0, 0.0, 1.0))).is_empty());
    assert!(p.local_intersect(&ray((0.0, 0.0, 0.0), (0.0, 0.0, 1.0))).is_empty());
}

#[test]
fn ray_intersecting_plane() {
    let p = Shape::plane();

    let above = p.local_intersect(&ray((0.0, 1.0, 0.0), (0.0, -1.0, 0.0)));
    assert_eq!(ts(&above), vec![1.0]);
    assert!(std::ptr::eq(above[0].what, &p));

    let below = p.local_intersect(&ray((0.0, -1.0, 0.0), (0.0, 1.0, 0.0)));
    assert_eq!(ts(&below), vec![1.0]);
}

#[test]
fn ray_intersects_cube() {
    let c = Shape::cube();
    let cases = [
        (( 5.0,  0.5,  0.0), (-1.0,  0.0,  0.0),  4.0, 6.0),
        ((-5.0,  0.5,  0.0), ( 1.0,  0.0,  0.0),  4.0, 6.0),
        (( 0.5,  5.0,  0.0), ( 0.0, -1.0,  0.0),  4.0, 6.0),
        (( 0.5, -5.0,  0.0), ( 0.0,  1.0,  0.0),  4.0, 6.0),
        (( 0.5,  0.0,  5.0), ( 0.0,  0.0, -1.0),  4.0, 6.0),
        (( 0.5,  0.0, -5.0), ( 0.0,  0.0,  1.0),  4.0, 6.0),
        (( 0.0,  0.5,  0.0), ( 0.0,  0.0,  1.0), -1.0, 1.0),
    ];

    for (origin, direction, t1, t2) in cases.iter() {
        let xs = c.local_intersect(&ray(*origin, *direction));
        assert_eq!(ts(&xs), vec![*t1, *t2]);
    }
}

#[test]
fn ray_misses_cube() {
    let c = Shape::cube();
    let cases = [
        ((-2.0,  0.0,  0.0), (0.2673, 0.5345, 0.8018)),
        (( 0.0, -2.0,  0.0), (0.8018, 0.2673, 0.5345)),
        (( 0.0,  0.0, -2.0), (0.5345, 0.8018, 0.2673)),
        (( 2.0,  0.0,  2.0), (0.0, 0.0, -1.0)),
        (( 0.0,  2.0,  2.0), (0.0, -1.0, 0.0)),
        (( 2.0,  2.0,  0.0), (-1.0, 0.0, 0.0)),
    ];

    for (origin, direction) in cases.iter() {
        assert!(c.local_intersect(&ray(*origin, *direction)).is_empty());
    }
}

#[test]
fn normal_on_cube() {
    let c = Shape::cube();
    let cases = [
        (( 1.0,  0.5, -0.8), ( 1.0,  0.0,  0.0)),
        ((-1.0, -0.2,  0.9), (-1.0,  0.0,  0.0)),
        ((-0.4,  1.0, -0.1), ( 0.0,  1.0,  0.0)),
        (( 0.3, -1.0, -0.7), ( 0.0, -1.0,  0.0)),
        ((-0.6,  0.3,  1.0), ( 0.0,  0.0,  1.0)),
        (( 0.4,  0.4, -1.0), ( 0.0,  0.0, -1.0)),
        (( 1.0,  1.0,  1.0), ( 1.0,  0.0,  0.0)),
        ((-1.0, -1.0, -1.0), (-1.0,  0.0,  0.0)),
    ];

    for (p, n) in cases.iter() {
        assert_eq!(c.local_normal_at(&Tuple4D::point(p.0, p.1, p.2)),
            Tuple4D::vector(n.0, n.1, n.2));
    }
}

#[test]
fn ray_misses_cylinder() {
    let cyl = Shape::cylinder();
    let cases = [
        ((1.0, 0.0,  0.0), (0.0, 1.0, 0.0)),
        ((0.0, 0.0,  0.0), (0.0, 1.0, 0.0)),
        ((0.0, 0.0, -5.0), (1.0, 1.0, 1.0)),
    ];

    for (origin, direction) in cases.iter() {
        let d = Tuple4D::vector(direction.0, direction.1, direction.2)
            .normalize();
        let r = Ray4D::new(Tuple4D::point(origin.0, origin.1, origin.2), d);
        assert!(cyl.local_intersect(&r).is_empty());
    }
}

#[test]
fn ray_strikes_cylinder() {
    let cyl = Shape::cylinder();
    let cases = [
        ((1.0, 0.0, -5.0), (0.0, 0.0, 1.0), 5.0, 5.0),
        ((0.0, 0.0, -5.0), (0.0, 0.0, 1.0), 4.0, 6.0),
        ((0.5, 0.0, -5.0), (0.1, 1.0, 1.0), 6.80798, 7.08872),
    ];

    for (origin, direction, t0, t1) in cases.iter() {
        let d = Tuple4D::vector(direction.0, direction.1, direction.2)
            .normalize();
        let r = Ray4D::new(Tuple4D::point(origin.0, origin.1, origin.2), d);
        let xs = cyl.local_intersect(&r);

        assert_eq!(xs.len(), 2);
        assert!((xs[0].t - t0).abs() < 0.0001);
        assert!((xs[1].t - t1).abs() < 0.0001);
    }
}

#[test]
fn normal_on_cylinder() {
    let cyl = Shape::cylinder();
    let cases = [
        (( 1.0,  0.0,  0.0), ( 1.0, 0.0,  0.0)),
        (( 0.0,  5.0, -1.0), ( 0.0, 0.0, -1.0)),
        (( 0.0, -2.0,  1.0), ( 0.0, 0.0,  1.0)),
        ((-1.0,  1.0,  0.0), (-1.0, 0.0,  0.0)),
    ];

    for (p, n) in cases.iter() {
        assert_eq!(cyl.local_normal_at(&Tuple4D::point(p.0, p.1, p.2)),
            Tuple4D::vector(n.0, n.1, n.2));
    }
}

#[test]
fn shapes_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Shape>();
}
